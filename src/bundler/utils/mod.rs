//! Shared helpers for bundle construction.

pub mod fs;
