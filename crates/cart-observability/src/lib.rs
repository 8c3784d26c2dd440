//! Observability for the shopping cart widget.
//!
//! This crate provides:
//! - `CartLogger` - Structured logging with cart context
//! - `LogBuilder` - Fluent construction of entries with typed fields
//! - `LogRecorder` - In-memory capture of emitted entries

mod logging;

pub use logging::*;
