//! Header text transforms.
//!
//! Each pass takes header text and returns rewritten text; they are applied
//! in order by [`crate::ops::consolidate`].

pub mod duplicate_filter;
pub mod scrub;
pub mod symbol_filter;

pub use duplicate_filter::{remove_repeated, DuplicateOutcome};
pub use scrub::scrub;
pub use symbol_filter::SymbolFilter;
