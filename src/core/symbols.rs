//! Exported and already-emitted function name sets.

use std::collections::{BTreeSet, HashSet};
use std::ffi::OsStr;
use std::path::Path;

use crate::core::errors::HeaderError;
use crate::core::platform::SymbolNaming;
use crate::util::process::ProcessBuilder;

/// Type marker `nm` prints for defined global text symbols.
const GLOBAL_TEXT_MARKER: &str = " T ";

/// Function symbols a compiled library actually exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportedSymbolSet {
    symbols: HashSet<String>,
}

impl ExportedSymbolSet {
    /// Run `nm -g` on a library and collect its global text symbols.
    pub fn read(nm: &Path, library: &Path) -> Result<Self, HeaderError> {
        let output = ProcessBuilder::new(nm)
            .args([OsStr::new("-g"), library.as_os_str()])
            .exec_and_check()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let set = Self::from_nm_output(&stdout);
        tracing::info!(
            "Read {} exported functions from {}",
            set.len(),
            library.display()
        );
        Ok(set)
    }

    /// Parse an `nm -g` listing.
    ///
    /// Only lines carrying the ` T ` marker count; the symbol is the last
    /// space-separated token. Everything else is ignored.
    pub fn from_nm_output(listing: &str) -> Self {
        let symbols = listing
            .lines()
            .filter(|line| line.contains(GLOBAL_TEXT_MARKER))
            .filter_map(|line| line.split(' ').next_back())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        ExportedSymbolSet { symbols }
    }

    /// Whether `function` is exported, honoring the platform's naming rule.
    pub fn defines(&self, function: &str, naming: SymbolNaming) -> bool {
        self.symbols.contains(function)
            || (naming.accepts_underscore() && self.symbols.contains(&format!("_{}", function)))
    }

    /// Whether the exact symbol name is present.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExportedSymbolSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ExportedSymbolSet {
            symbols: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Names of functions whose declaration has already been kept in this run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenFunctionSet {
    functions: BTreeSet<String>,
}

impl SeenFunctionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a kept function. Returns `false` if it was already seen.
    pub fn insert(&mut self, function: &str) -> bool {
        if self.functions.contains(function) {
            return false;
        }
        self.functions.insert(function.to_string())
    }

    pub fn contains(&self, function: &str) -> bool {
        self.functions.contains(function)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Iterate seen names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINUX_LISTING: &str = "\
                 U abort@GLIBC_2.2.5
0000000000041d60 T temporal_copy
0000000000052a10 T tint_make
0000000000123456 D meos_errno
                 w __gmon_start__
0000000000052b00 T geo_as_text
";

    #[test]
    fn test_from_nm_output() {
        let set = ExportedSymbolSet::from_nm_output(LINUX_LISTING);

        assert_eq!(set.len(), 3);
        assert!(set.contains("temporal_copy"));
        assert!(set.contains("tint_make"));
        assert!(set.contains("geo_as_text"));
        assert!(!set.contains("meos_errno"));
        assert!(!set.contains("abort@GLIBC_2.2.5"));
    }

    #[test]
    fn test_malformed_lines_ignored() {
        let set = ExportedSymbolSet::from_nm_output("garbage\n\n/usr/lib/libmeos.so:\nT\n");
        assert!(set.is_empty());
    }

    #[test]
    fn test_underscore_naming() {
        let set = ExportedSymbolSet::from_nm_output("0000000000003f50 T _tint_make\n");

        assert!(set.defines("tint_make", SymbolNaming::UnderscorePrefixed));
        assert!(!set.defines("tint_make", SymbolNaming::Plain));
        assert!(set.defines("_tint_make", SymbolNaming::Plain));
    }

    #[test]
    fn test_seen_function_set() {
        let mut seen = SeenFunctionSet::new();

        assert!(seen.insert("baz"));
        assert!(!seen.insert("baz"));
        assert!(seen.insert("foo"));
        assert_eq!(seen.iter().collect::<Vec<_>>(), vec!["baz", "foo"]);
    }
}
