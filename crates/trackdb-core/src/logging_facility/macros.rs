//! Operation boundary logging
//!
//! Every engine operation logs one start event and one end (or end_error)
//! event carrying `component`, `op` and `event`, plus the operation's own
//! counters. Field names come from `trackdb_core_types::schema`.

/// Log the start of an operation, with the input sizes as extra fields
///
/// # Example
///
/// ```
/// # use trackdb_core::log_op_start;
/// # use trackdb_core_types::schema::{OP_CONFIG_LOAD, OP_DIFF};
/// log_op_start!(OP_CONFIG_LOAD);
/// log_op_start!(OP_DIFF, rows_a = 3, rows_b = 4);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = trackdb_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = trackdb_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation. `duration_ms` comes first.
///
/// # Example
///
/// ```
/// # use trackdb_core::log_op_end;
/// # use trackdb_core_types::schema::{OP_DIFF, OP_RECORD_EQUAL};
/// log_op_end!(
///     OP_DIFF,
///     duration_ms = 3,
///     key_count = 5,
///     changed_rows_a = 1,
///     changed_rows_b = 1,
///     outcome = "compared"
/// );
/// log_op_end!(OP_RECORD_EQUAL, duration_ms = 1, outcome = "pass");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = trackdb_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = trackdb_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log a failed operation. The error is converted to `ExError` and
/// reported as `err.kind` and `err.code`.
///
/// # Example
///
/// ```
/// # use trackdb_core::{log_op_error, errors::TrackDbError};
/// # use trackdb_core_types::schema::OP_CATALOG_LOAD;
/// let err = TrackDbError::Io {
///     path: "locale/ja.yml".to_string(),
///     reason: "not found".to_string(),
/// };
/// log_op_error!(OP_CATALOG_LOAD, err, duration_ms = 1, path = "locale/ja.yml");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = trackdb_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = trackdb_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($field)*
        );
    }};
}
