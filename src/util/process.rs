//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::core::errors::HeaderError;

/// Name of the symbol dump tool looked up on PATH.
pub const DEFAULT_NM: &str = "nm";

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Execute the command and wait for completion.
    pub fn exec(&self) -> Result<Output, HeaderError> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| HeaderError::ToolInvocation {
                command: self.display_command(),
                message: e.to_string(),
            })
    }

    /// Execute and require success.
    pub fn exec_and_check(&self) -> Result<Output, HeaderError> {
        let output = self.exec()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HeaderError::ToolInvocation {
                command: self.display_command(),
                message: format!(
                    "exit code {:?}\n{}",
                    output.status.code(),
                    stderr.trim_end()
                ),
            });
        }
        Ok(output)
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Locate the symbol dump tool.
///
/// An explicit override wins, then the `NM` environment variable, then `nm`
/// on PATH.
pub fn find_nm(override_path: Option<&Path>) -> Result<PathBuf, HeaderError> {
    if let Some(path) = override_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return find_executable(&path.to_string_lossy()).ok_or_else(|| {
            HeaderError::ToolNotFound {
                tool: path.display().to_string(),
            }
        });
    }

    if let Ok(nm) = std::env::var("NM") {
        if let Some(path) = find_executable(&nm) {
            return Ok(path);
        }
        tracing::warn!("NM={} not found, falling back to `{}`", nm, DEFAULT_NM);
    }

    find_executable(DEFAULT_NM).ok_or_else(|| HeaderError::ToolNotFound {
        tool: DEFAULT_NM.to_string(),
    })
}
