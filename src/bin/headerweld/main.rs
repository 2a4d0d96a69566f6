//! headerweld CLI - merge C headers into one binding-ready header

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;
use headerweld::core::errors::HeaderError;
use headerweld::core::platform::Platform;
use headerweld::ops::{consolidate, ConsolidateOptions, SymbolSource};
use headerweld::util::config::HeaderConfig;
use headerweld::util::diagnostic::{self, suggestions, Diagnostic};
use headerweld::util::fs::write_atomic;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        match e.downcast_ref::<HeaderError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("headerweld=debug")
    } else if cli.quiet {
        EnvFilter::new("headerweld=warn")
    } else {
        EnvFilter::new("headerweld=info")
    };

    // stdout may carry the header itself
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(false)
        .without_time()
        .init();

    let cwd = std::env::current_dir()?;
    let config = match &cli.config {
        Some(path) => HeaderConfig::load(path)?,
        None => HeaderConfig::discover(&cwd)?,
    };

    let platform = cli.platform.map(Platform::from).unwrap_or_else(Platform::host);
    tracing::debug!("Platform: {}", platform);

    let (include_dir, library) = match cli.include_dir {
        Some(dir) => (dir, cli.library),
        None => {
            let defaults = platform.defaults()?;
            (defaults.include_dir, Some(defaults.library))
        }
    };

    let symbols = if cli.no_symbols {
        SymbolSource::Skip
    } else if let Some(listing) = cli.symbols {
        SymbolSource::Listing(listing)
    } else if let Some(library) = library {
        SymbolSource::Library(library)
    } else {
        if !cli.quiet {
            let warning = Diagnostic::warning(
                "no library given; declarations are not checked against exported symbols",
            )
            .with_suggestion(suggestions::SKIP_SYMBOLS);
            diagnostic::emit(&warning, color);
        }
        SymbolSource::Skip
    };

    let mut opts = ConsolidateOptions::new(&include_dir, &config)
        .with_symbols(symbols)
        .with_naming(platform.symbol_naming());
    if cli.nm.is_some() {
        opts.nm = cli.nm;
    }

    tracing::info!("Merging headers from {}", include_dir.display());
    let merged = consolidate(&opts)?;

    if cli.stdout {
        print!("{}", merged.header);
    } else {
        let destination = cli.destination.unwrap_or(config.output);
        merged.write(&destination)?;
    }

    if let Some(report_path) = cli.report {
        let json = serde_json::to_string_pretty(&merged.report)
            .context("failed to serialize report")?;
        write_atomic(&report_path, &json)?;
        tracing::info!("Wrote report to {}", report_path.display());
    }

    Ok(())
}
