//! # Formats Module
//!
//! Byte formats for persisted state. File I/O lives in the app layer.

mod save;

pub use save::*;
