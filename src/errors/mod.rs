//! Error types and error handling for the front end.
//!
//! This module defines the diagnostics recorded while parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each kind of syntax error
//! - Helpful error messages and suggestions

pub mod errors;
