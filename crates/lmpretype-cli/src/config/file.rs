use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings read from a TOML configuration file. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub ordering: Option<String>,
    pub tolerance: Option<f64>,
    pub header_match: Option<String>,
    pub min_atom_fields: Option<usize>,
    pub atom_layout: Option<String>,
    pub warn_unmapped: Option<bool>,
    pub elements: Option<PathBuf>,
    pub type_table: Option<PathBuf>,
}

impl FileConfig {
    /// Loads the file; relative table paths are resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let mut config: FileConfig =
            toml::from_str(&content).map_err(|e| CliError::FileParsing {
                path: path.to_path_buf(),
                source: e.into(),
            })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.elements = config.elements.map(|p| resolve_relative(base, p));
        config.type_table = config.type_table.map(|p| resolve_relative(base, p));
        Ok(config)
    }
}

fn resolve_relative(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
