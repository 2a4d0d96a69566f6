//! Drop re-declarations of functions that were already kept.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::declaration::{Declaration, Exclusion, ExclusionReason};
use crate::core::symbols::SeenFunctionSet;

/// An `extern` statement whose name is the first identifier followed by `(`
/// on its first line.
static EXTERN_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^extern .*?(?P<function>\w+)\((?s:.)*?;").unwrap()
});

/// Result of running the duplicate filter over one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateOutcome {
    /// Rewritten text
    pub content: String,
    /// Number of declarations kept
    pub kept: usize,
    /// Declarations commented out as repeated
    pub exclusions: Vec<Exclusion>,
}

/// Comment out every declaration naming a function already in `seen`,
/// adding first occurrences to it.
///
/// Declarations already turned into comments by the symbol filter no longer
/// start with `extern`, so they neither match nor claim a slot in `seen`.
pub fn remove_repeated(content: &str, seen: &mut SeenFunctionSet) -> DuplicateOutcome {
    let mut kept = 0;
    let mut exclusions = Vec::new();

    let filtered = EXTERN_FUNCTION.replace_all(content, |caps: &Captures| {
        let decl = Declaration::new(caps.get(0).map_or("", |m| m.as_str()));
        let function = caps.name("function").map_or("", |m| m.as_str());

        if seen.insert(function) {
            kept += 1;
            decl.text().to_string()
        } else {
            tracing::warn!("Removing repeated function: {}", function);
            let reason = ExclusionReason::Repeated;
            let replacement = decl.comment_out(&reason);
            exclusions.push(Exclusion::new(function, reason));
            replacement
        }
    });

    DuplicateOutcome {
        content: filtered.into_owned(),
        kept,
        exclusions,
    }
}
