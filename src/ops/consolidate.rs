//! Implementation of the header consolidation run.
//!
//! Each input header is scrubbed, checked against the library's exported
//! symbols, de-duplicated against everything kept so far, and appended to
//! the output behind a marker naming its source file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::builder::duplicate_filter::remove_repeated;
use crate::builder::scrub::scrub;
use crate::builder::symbol_filter::SymbolFilter;
use crate::core::declaration::Exclusion;
use crate::core::platform::SymbolNaming;
use crate::core::symbols::{ExportedSymbolSet, SeenFunctionSet};
use crate::util::config::{CallbackConfig, HeaderConfig};
use crate::util::fs::{read_header, read_to_string, write_atomic};
use crate::util::process::find_nm;

/// Where the exported symbol set comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolSource {
    /// Keep every declaration without checking symbols.
    Skip,
    /// Run `nm -g` on this shared library.
    Library(PathBuf),
    /// Read a previously captured `nm -g` listing.
    Listing(PathBuf),
}

impl SymbolSource {
    /// Load the symbol set, running the dump tool at most once.
    pub fn load(&self, nm: Option<&Path>) -> Result<Option<ExportedSymbolSet>> {
        match self {
            SymbolSource::Skip => Ok(None),
            SymbolSource::Library(library) => {
                let nm = find_nm(nm)?;
                tracing::debug!("Using `{}` to read {}", nm.display(), library.display());
                Ok(Some(ExportedSymbolSet::read(&nm, library)?))
            }
            SymbolSource::Listing(path) => {
                let listing = read_to_string(path)?;
                let set = ExportedSymbolSet::from_nm_output(&listing);
                tracing::info!(
                    "Read {} exported functions from listing {}",
                    set.len(),
                    path.display()
                );
                Ok(Some(set))
            }
        }
    }
}

/// Options for a consolidation run.
#[derive(Debug, Clone)]
pub struct ConsolidateOptions {
    /// Directory holding the input headers
    pub include_dir: PathBuf,

    /// Header file names, in merge order
    pub headers: Vec<String>,

    /// Exported symbol source
    pub symbols: SymbolSource,

    /// Symbol naming convention of the library's platform
    pub naming: SymbolNaming,

    /// Symbol dump tool override
    pub nm: Option<PathBuf>,

    /// Types the binding layer cannot represent
    pub unsupported_types: Vec<String>,

    /// Text placed before the first header section
    pub type_stubs: String,

    /// Error callback appended after the last section
    pub callback: CallbackConfig,
}

impl ConsolidateOptions {
    /// Create options from a loaded configuration.
    pub fn new(include_dir: impl Into<PathBuf>, config: &HeaderConfig) -> Self {
        ConsolidateOptions {
            include_dir: include_dir.into(),
            headers: config.headers.clone(),
            symbols: SymbolSource::Skip,
            naming: SymbolNaming::Plain,
            nm: config.nm.clone(),
            unsupported_types: config.unsupported_types.clone(),
            type_stubs: config.type_stubs.clone(),
            callback: config.callback.clone(),
        }
    }

    /// Set the exported symbol source.
    pub fn with_symbols(mut self, symbols: SymbolSource) -> Self {
        self.symbols = symbols;
        self
    }

    /// Set the symbol naming convention.
    pub fn with_naming(mut self, naming: SymbolNaming) -> Self {
        self.naming = naming;
        self
    }
}

/// Per-file outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Header file name
    pub file: String,
    /// Declarations kept
    pub kept: usize,
    /// Declarations commented out, in textual order
    pub exclusions: Vec<Exclusion>,
}

/// Summary of a consolidation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidationReport {
    /// Whether declarations were checked against exported symbols
    pub symbols_checked: bool,
    /// One entry per header, in merge order
    pub files: Vec<FileReport>,
}

impl ConsolidationReport {
    /// Total declarations kept across all files.
    pub fn kept(&self) -> usize {
        self.files.iter().map(|f| f.kept).sum()
    }

    /// Total declarations commented out across all files.
    pub fn excluded(&self) -> usize {
        self.files.iter().map(|f| f.exclusions.len()).sum()
    }
}

/// A merged header and how it was produced.
#[derive(Debug, Clone)]
pub struct Consolidated {
    /// The full header text
    pub header: String,
    /// Run summary
    pub report: ConsolidationReport,
}

impl Consolidated {
    /// Write the header to `destination`, replacing any existing file.
    pub fn write(&self, destination: &Path) -> Result<()> {
        write_atomic(destination, &self.header)?;
        tracing::info!("Wrote {}", destination.display());
        Ok(())
    }
}

/// State for one consolidation run.
///
/// Owns the set of functions already kept so later files cannot
/// re-declare them; it is created per run and dropped with it.
#[derive(Debug)]
pub struct ConsolidationContext<'a> {
    symbols: Option<SymbolFilter<'a>>,
    seen: SeenFunctionSet,
}

impl<'a> ConsolidationContext<'a> {
    /// Create a context. Without a symbol filter every declaration survives
    /// the symbol check.
    pub fn new(symbols: Option<SymbolFilter<'a>>) -> Self {
        ConsolidationContext {
            symbols,
            seen: SeenFunctionSet::new(),
        }
    }

    /// Filter one header's raw text into its output section body.
    pub fn process(&mut self, file: &str, raw: &str) -> (String, FileReport) {
        let scrubbed = scrub(raw);

        let (checked, mut exclusions) = match &self.symbols {
            Some(filter) => filter.apply(&scrubbed),
            None => (scrubbed, Vec::new()),
        };

        let outcome = remove_repeated(&checked, &mut self.seen);
        exclusions.extend(outcome.exclusions);

        tracing::debug!(
            "{}: kept {} declarations, removed {}",
            file,
            outcome.kept,
            exclusions.len()
        );

        let report = FileReport {
            file: file.to_string(),
            kept: outcome.kept,
            exclusions,
        };
        (outcome.content, report)
    }

    /// Functions kept so far.
    pub fn seen(&self) -> &SeenFunctionSet {
        &self.seen
    }
}

/// Marker comment opening each file's section.
pub fn section_marker(file: &str) -> String {
    format!("// -------------------- {} --------------------\n", file)
}

/// Merge the configured headers into one filtered header.
///
/// Fails without producing anything if the symbol dump fails or any header
/// is missing.
pub fn consolidate(opts: &ConsolidateOptions) -> Result<Consolidated> {
    let symbols = opts.symbols.load(opts.nm.as_deref())?;
    let filter = symbols.as_ref().map(|set| {
        SymbolFilter::new(set)
            .with_naming(opts.naming)
            .with_unsupported_types(&opts.unsupported_types)
    });
    if filter.is_none() {
        tracing::info!("Skipping symbol verification; all declarations are kept");
    }

    let mut ctx = ConsolidationContext::new(filter);
    let mut header = opts.type_stubs.clone();
    let mut files = Vec::with_capacity(opts.headers.len());

    for file in &opts.headers {
        let path = opts.include_dir.join(file);
        let raw = read_header(&path)
            .with_context(|| format!("failed to consolidate headers from {}", opts.include_dir.display()))?;

        let (section, report) = ctx.process(file, &raw);
        // the marker always starts its own line
        if !header.is_empty() && !header.ends_with('\n') {
            header.push('\n');
        }
        header.push_str(&section_marker(file));
        header.push_str(&section);
        files.push(report);
    }

    header.push_str("\n\n");
    header.push_str(&opts.callback.declaration());
    header.push('\n');

    let report = ConsolidationReport {
        symbols_checked: symbols.is_some(),
        files,
    };
    tracing::info!(
        "Merged {} headers: {} declarations kept, {} removed",
        report.files.len(),
        report.kept(),
        report.excluded()
    );

    Ok(Consolidated { header, report })
}
