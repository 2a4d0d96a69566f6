//! Configuration file support for headerweld.
//!
//! Settings are read from `headerweld.toml` in the working directory, or
//! from the file given with `--config`. Every table is optional; missing
//! keys fall back to the defaults below, which reproduce the MEOS build.
//!
//! ```toml
//! headers = ["meos.h", "meos_catalog.h", "meos_internal.h"]
//! unsupported_types = ["json_object"]
//! output = "builder/meos.h"
//!
//! [callback]
//! language = "Python"
//! name = "py_error_handler"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::HeaderError;

/// Name of the project config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "headerweld.toml";

/// Stand-ins for GSL and PROJ types the MEOS headers use without including
/// their definitions.
pub const DEFAULT_TYPE_STUBS: &str = r#"
typedef struct
  {
    const char *name;
    unsigned long int max;
    unsigned long int min;
    size_t size;
    void (*set) (void *state, unsigned long int seed);
    unsigned long int (*get) (void *state);
    double (*get_double) (void *state);
  }
gsl_rng_type;

typedef struct
  {
    const gsl_rng_type * type;
    void *state;
  }
gsl_rng;

struct pj_ctx;
typedef struct pj_ctx PJ_CONTEXT;
"#;

/// Header consolidation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Header file names, merged in this order
    pub headers: Vec<String>,

    /// Type names whose presence disqualifies a declaration
    pub unsupported_types: Vec<String>,

    /// Text placed before the first header section
    pub type_stubs: String,

    /// Error callback declared at the end of the header
    pub callback: CallbackConfig,

    /// Where the merged header is written
    pub output: PathBuf,

    /// Symbol dump tool override
    pub nm: Option<PathBuf>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        HeaderConfig {
            headers: vec![
                "meos.h".to_string(),
                "meos_catalog.h".to_string(),
                "meos_internal.h".to_string(),
            ],
            unsupported_types: vec!["json_object".to_string()],
            type_stubs: DEFAULT_TYPE_STUBS.to_string(),
            callback: CallbackConfig::default(),
            output: PathBuf::from("builder/meos.h"),
            nm: None,
        }
    }
}

impl HeaderConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, HeaderError> {
        let contents = std::fs::read_to_string(path).map_err(|source| HeaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|e| HeaderError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `headerweld.toml` from `dir` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self, HeaderError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// The callback the binding layer registers for error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackConfig {
    /// Language named in the `extern "..."` linkage annotation
    pub language: String,

    /// Callback function name
    pub name: String,
}

impl Default for CallbackConfig {
    fn default() -> Self {
        CallbackConfig {
            language: "Python".to_string(),
            name: "py_error_handler".to_string(),
        }
    }
}

impl CallbackConfig {
    /// The declaration appended to the merged header.
    pub fn declaration(&self) -> String {
        format!(
            "extern \"{}\" void {}(int, int, char*);",
            self.language, self.name
        )
    }
}
