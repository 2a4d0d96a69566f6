//! Core data structures for headerweld.
//!
//! - Declarations and the reasons one is dropped
//! - Exported and already-kept function name sets
//! - Host platform defaults and symbol naming
//! - Fatal error types

pub mod declaration;
pub mod errors;
pub mod platform;
pub mod symbols;

pub use declaration::{Declaration, Exclusion, ExclusionReason};
pub use errors::HeaderError;
pub use platform::{Platform, PlatformDefaults, SymbolNaming};
pub use symbols::{ExportedSymbolSet, SeenFunctionSet};
