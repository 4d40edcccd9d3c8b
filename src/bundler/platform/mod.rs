//! Platform-specific bundle layouts.
//!
//! Only the macOS `.app` layout is produced. It is plain directory and file
//! manipulation, so it builds and runs on any host.

pub mod macos;
