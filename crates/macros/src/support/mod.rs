//! Internal support utilities for proc-macros.
//!
//! This module provides shared functionality for parsing attributes,
//! generating diagnostics, and collecting record fields.

pub mod attrs;
pub mod diag;
pub mod utils;
