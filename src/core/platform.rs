//! Host platform detection and per-platform defaults.
//!
//! The default include directory, library path and exported-symbol naming
//! convention are looked up from a [`Platform`] value instead of being
//! branched on inline, so the filters never inspect the host themselves.

use std::fmt;
use std::path::PathBuf;

use crate::core::errors::HeaderError;

/// How a platform spells C function names in a binary's symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolNaming {
    /// Symbols carry the C name unchanged (ELF).
    #[default]
    Plain,
    /// Symbols carry a leading underscore (Mach-O).
    UnderscorePrefixed,
}

impl SymbolNaming {
    /// Whether a `_name` symbol also counts as defining `name`.
    pub fn accepts_underscore(&self) -> bool {
        matches!(self, SymbolNaming::UnderscorePrefixed)
    }
}

/// Host platforms with known library install locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Any Linux host.
    Linux,
    /// macOS on Apple silicon (Homebrew under /opt/homebrew).
    MacArm,
    /// macOS on Intel (Homebrew under /usr/local).
    MacIntel,
    /// Anything else; no defaults.
    Other,
}

/// Default inputs for a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDefaults {
    /// Directory holding the library's headers
    pub include_dir: PathBuf,
    /// The installed shared library
    pub library: PathBuf,
}

impl Platform {
    /// Detect the platform this process runs on.
    pub fn host() -> Self {
        Self::from_parts(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Classify an (OS, architecture) pair as reported by `std::env::consts`.
    pub fn from_parts(os: &str, arch: &str) -> Self {
        match (os, arch) {
            ("linux", _) => Platform::Linux,
            ("macos", "aarch64") => Platform::MacArm,
            ("macos", _) => Platform::MacIntel,
            _ => Platform::Other,
        }
    }

    /// Symbol naming convention of binaries built for this platform.
    pub fn symbol_naming(&self) -> SymbolNaming {
        match self {
            Platform::MacArm | Platform::MacIntel => SymbolNaming::UnderscorePrefixed,
            Platform::Linux | Platform::Other => SymbolNaming::Plain,
        }
    }

    /// Default include directory and library path.
    pub fn defaults(&self) -> Result<PlatformDefaults, HeaderError> {
        let (include_dir, library) = match self {
            Platform::Linux => ("/usr/local/include", "/usr/local/lib/libmeos.so"),
            Platform::MacArm => ("/opt/homebrew/include", "/opt/homebrew/lib/libmeos.dylib"),
            Platform::MacIntel => ("/usr/local/include", "/usr/local/lib/libmeos.dylib"),
            Platform::Other => {
                return Err(HeaderError::UnsupportedPlatform {
                    os: std::env::consts::OS.to_string(),
                    arch: std::env::consts::ARCH.to_string(),
                })
            }
        };

        Ok(PlatformDefaults {
            include_dir: PathBuf::from(include_dir),
            library: PathBuf::from(library),
        })
    }

    /// Get the platform name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacArm => "macos-arm64",
            Platform::MacIntel => "macos-x86_64",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
