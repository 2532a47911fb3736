//! Integration tests for the processor module
//!
//! Runs the full read, parse and store pipeline over temporary CSV files.

pub mod error_handling;
