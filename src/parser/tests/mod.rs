//! Unit tests for the hierarchy parser components
//!
//! Covers indentation detection, hierarchy reconstruction, value coercion,
//! month header resolution and the full single-pass parse.

pub mod indent_tests;
pub mod months_tests;
pub mod values_tests;
