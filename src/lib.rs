//! headerweld - consolidate C headers for FFI binding generation
//!
//! This crate merges a library's public headers into a single header that a
//! binding generator can consume: comments and non-constant macros are
//! stripped, declarations the compiled library does not export are
//! commented out, and functions declared in more than one header are kept
//! only once.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::errors::HeaderError;
pub use crate::core::platform::{Platform, SymbolNaming};
pub use crate::core::symbols::{ExportedSymbolSet, SeenFunctionSet};
pub use crate::ops::{consolidate, ConsolidateOptions, Consolidated, ConsolidationReport, SymbolSource};
pub use crate::util::config::HeaderConfig;
