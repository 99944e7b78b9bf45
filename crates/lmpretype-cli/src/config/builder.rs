use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::Cli;
use crate::error::{CliError, Result};
use lmpretype::core::elements::ElementTable;
use lmpretype::engine::config::RetypeConfigBuilder;
use lmpretype::engine::ordering::{
    ByAtomicNumber, FixedTable, FixedTypeTable, OrderingKind, OrderingPolicy,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

/// Merges CLI flags, `--set` overrides, the config file and the ordering's defaults,
/// in that order of precedence.
pub fn build_config(cli: &Cli) -> Result<AppConfig> {
    let file_config = if let Some(config_path) = &cli.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let file_config = apply_set_values(file_config, &cli.set_values)?;

    let kind = match cli.ordering {
        Some(arg) => arg.into(),
        None => match file_config.ordering.as_deref() {
            Some(value) => parse_value::<OrderingKind>("ordering", value)?,
            None => OrderingKind::AtomicNumber,
        },
    };
    debug!("Using '{}' ordering", kind);

    let elements = match cli.elements.as_ref().or(file_config.elements.as_ref()) {
        Some(path) => load_elements(path)?,
        None => ElementTable::builtin(),
    };

    let type_table_path = cli.type_table.as_ref().or(file_config.type_table.as_ref());
    let ordering = match kind {
        OrderingKind::AtomicNumber => {
            if let Some(path) = type_table_path {
                warn!(
                    "Ignoring type table {:?}: it only applies to the fixed-table ordering",
                    path
                );
            }
            OrderingPolicy::AtomicNumber(ByAtomicNumber)
        }
        OrderingKind::FixedTable => {
            let table = match type_table_path {
                Some(path) => load_type_table(path)?,
                None => FixedTypeTable::from_element_order(&elements),
            };
            OrderingPolicy::FixedTable(FixedTable::new(table))
        }
    };

    let mut builder = RetypeConfigBuilder::new()
        .ordering(ordering)
        .elements(elements);

    if let Some(tolerance) = cli.tolerance.or(file_config.tolerance) {
        builder = builder.tolerance(tolerance);
    }
    if let Some(value) = file_config.header_match.as_deref() {
        builder = builder.header_match(parse_value("header-match", value)?);
    }
    if let Some(fields) = file_config.min_atom_fields {
        builder = builder.min_atom_fields(fields);
    }
    if let Some(value) = file_config.atom_layout.as_deref() {
        builder = builder.atom_layout(parse_value("atom-layout", value)?);
    }
    if cli.quiet_unmapped {
        builder = builder.warn_unmapped(false);
    } else if let Some(warn_unmapped) = file_config.warn_unmapped {
        builder = builder.warn_unmapped(warn_unmapped);
    }

    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: cli.input.clone(),
        output_path: cli.output.clone(),
        core_config,
    })
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))
}

fn load_elements(path: &Path) -> Result<ElementTable> {
    debug!("Loading element table from {:?}", path);
    ElementTable::load(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn load_type_table(path: &Path) -> Result<FixedTypeTable> {
    debug!("Loading type table from {:?}", path);
    FixedTypeTable::load_csv(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let (key, value_str) = (key.trim(), value_str.trim());

        match key {
            "ordering" => config.ordering = Some(value_str.to_string()),
            "header-match" => config.header_match = Some(value_str.to_string()),
            "atom-layout" => config.atom_layout = Some(value_str.to_string()),
            "elements" => config.elements = Some(PathBuf::from(value_str)),
            "type-table" => config.type_table = Some(PathBuf::from(value_str)),
            "tolerance" => {
                config.tolerance = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?);
            }
            "min-atom-fields" => {
                config.min_atom_fields = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            }
            "warn-unmapped" => {
                config.warn_unmapped = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
                })?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
