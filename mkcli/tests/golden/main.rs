//! Golden tests for the generated shell text.
//!
//! Each test pins the complete output of one compiler so any change to the
//! emitted code shows up as a reviewable diff.

#[path = "../common/mod.rs"]
mod common;

mod script_tests;
