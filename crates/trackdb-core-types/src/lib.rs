//! Core types shared across trackdb facilities
//!
//! This crate provides the canonical schema constants used by the logging
//! macros and by tests that assert on captured events:
//!
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
