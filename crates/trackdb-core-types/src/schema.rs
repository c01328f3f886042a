//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Record set sizes
pub const FIELD_ROWS_A: &str = "rows_a";
pub const FIELD_ROWS_B: &str = "rows_b";
pub const FIELD_KEY_COUNT: &str = "key_count";

// Diff outcome
pub const FIELD_CHANGED_ROWS_A: &str = "changed_rows_a";
pub const FIELD_CHANGED_ROWS_B: &str = "changed_rows_b";
pub const FIELD_OUTCOME: &str = "outcome";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical operation names
pub const OP_DIFF: &str = "records.diff";
pub const OP_DIFF_COLUMNS: &str = "records.diff_columns";
pub const OP_RECORD_EQUAL: &str = "assert.record_equal";
pub const OP_RECORD_CONTAIN: &str = "assert.record_contain";
pub const OP_CONFIG_LOAD: &str = "config.load";
pub const OP_CATALOG_LOAD: &str = "catalog.load";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
