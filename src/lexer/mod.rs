//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into tokens for the parser. It handles:
//!
//! - On-demand scanning, one token per call
//! - Recognition of keywords, identifiers, integers, operators and delimiters
//! - Token position tracking for error reporting
//! - Whitespace skipping and `ILLEGAL` tokens for unknown characters

pub mod lexer;
pub mod tokens;
