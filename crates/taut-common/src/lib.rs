//! Common utilities for the Taut minifier.
//!
//! This crate provides shared infrastructure used by the lexer and the engine:
//! - **Warning System** - colored, deduplicated terminal output for recoverable issues
//! - **Byte Helpers** - HTML whitespace classification and in-place byte rewriting

pub mod bytes;
pub mod warning;
