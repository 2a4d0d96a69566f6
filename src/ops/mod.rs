//! High-level operations.

pub mod consolidate;

pub use consolidate::{
    consolidate, section_marker, ConsolidateOptions, Consolidated, ConsolidationContext,
    ConsolidationReport, FileReport, SymbolSource,
};
