//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod fs;
pub mod process;

pub use config::HeaderConfig;
pub use diagnostic::Diagnostic;
