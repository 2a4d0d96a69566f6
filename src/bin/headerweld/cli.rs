//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use headerweld::core::platform::Platform;

/// headerweld - merge C headers into one binding-ready header
///
/// With no positional arguments the include directory and library are
/// taken from the defaults for the host platform.
#[derive(Parser)]
#[command(name = "headerweld")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the headers to merge
    pub include_dir: Option<PathBuf>,

    /// Shared library whose exported symbols decide which declarations survive
    pub library: Option<PathBuf>,

    /// Where to write the merged header [default: builder/meos.h]
    pub destination: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Config file [default: ./headerweld.toml if present]
    #[arg(short, long, env = "HEADERWELD_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep every declaration without checking exported symbols
    #[arg(long, conflicts_with = "symbols")]
    pub no_symbols: bool,

    /// Read exported symbols from a saved `nm -g` listing instead of the library
    #[arg(long, value_name = "FILE")]
    pub symbols: Option<PathBuf>,

    /// Symbol dump tool to run [default: $NM, then nm]
    #[arg(long, value_name = "PATH")]
    pub nm: Option<PathBuf>,

    /// Platform whose defaults and symbol naming apply [default: host]
    #[arg(long, value_enum)]
    pub platform: Option<PlatformArg>,

    /// Print the merged header instead of writing it
    #[arg(long)]
    pub stdout: bool,

    /// Write a JSON report of kept and removed declarations
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// Platforms selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Linux,
    #[value(name = "macos-arm64")]
    MacosArm,
    #[value(name = "macos-x86_64")]
    MacosIntel,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Linux => Platform::Linux,
            PlatformArg::MacosArm => Platform::MacArm,
            PlatformArg::MacosIntel => Platform::MacIntel,
        }
    }
}
