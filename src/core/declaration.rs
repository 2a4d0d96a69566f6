//! `extern` function declarations and the reasons one gets dropped.

use std::fmt;

use serde::Serialize;

/// A single `extern ...;` statement matched in header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    text: &'a str,
}

impl<'a> Declaration<'a> {
    pub fn new(text: &'a str) -> Self {
        Declaration { text }
    }

    /// The raw statement text, including the trailing `;`.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The declared function name.
    ///
    /// Last whitespace-separated token before the first `(`, with leading
    /// pointer markers removed. A declaration without parentheses yields its
    /// last token as-is (e.g. `x;` for `extern int x;`).
    pub fn function_name(&self) -> &'a str {
        let head = self.text.split('(').next().unwrap_or_default().trim();
        head.split_whitespace()
            .next_back()
            .unwrap_or_default()
            .trim_start_matches('*')
    }

    /// First deny-listed type name that occurs anywhere in the declaration.
    ///
    /// This is a plain substring search, so `json_object_ptr` also matches
    /// `json_object`.
    pub fn unsupported_type<'t>(&self, deny_list: &'t [String]) -> Option<&'t str> {
        deny_list
            .iter()
            .find(|ty| self.text.contains(ty.as_str()))
            .map(String::as_str)
    }

    /// Neutralize the declaration into a block comment noting why.
    pub fn comment_out(&self, reason: &ExclusionReason) -> String {
        format!("/* {}  ({}) */", self.text, reason)
    }
}

/// Why a declaration was commented out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// The library does not export the function.
    Undefined,
    /// The declaration mentions a type the binding layer cannot represent.
    UndefinedType(String),
    /// An earlier declaration of the same function was already kept.
    Repeated,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::Undefined => write!(f, "undefined"),
            ExclusionReason::UndefinedType(ty) => write!(f, "undefined type {}", ty),
            ExclusionReason::Repeated => write!(f, "repeated"),
        }
    }
}

/// A declaration dropped from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    pub function: String,
    pub reason: ExclusionReason,
}

impl Exclusion {
    pub fn new(function: impl Into<String>, reason: ExclusionReason) -> Self {
        Exclusion {
            function: function.into(),
            reason,
        }
    }
}
