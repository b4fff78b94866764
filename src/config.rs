use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "isopret-terms.toml";

/// Top-level configuration loaded from isopret-terms.toml.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct CounterConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub dir: PathBuf,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file: PathBuf,
}

// --- Default implementations ---

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("/home/robinp/data/isopret"),
            files: vec![
                "isoform_function_list_bp.txt".to_string(),
                "isoform_function_list_mf.txt".to_string(),
                "isoform_function_list_cc.txt".to_string(),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("isopret_term_counts.tsv"),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("no input files configured")]
    NoInputFiles,
    #[error("output file path is empty")]
    EmptyOutput,
}

impl CounterConfig {
    /// Parse a config from TOML text. Missing sections and keys keep their defaults.
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load the config file at `path`.
    ///
    /// When `required` is false a missing file yields the defaults; any other
    /// read failure, and any parse failure, is an error.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents, path),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.dir {
            self.input.dir = dir.clone();
        }
        if let Some(output) = &overrides.output {
            self.output.file = output.clone();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.files.is_empty() {
            return Err(ConfigError::NoInputFiles);
        }
        if self.output.file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutput);
        }
        Ok(())
    }

    /// Full paths of the input files, in configured order.
    pub fn input_paths(&self) -> Vec<PathBuf> {
        self.input
            .files
            .iter()
            .map(|name| self.input.dir.join(name))
            .collect()
    }
}
