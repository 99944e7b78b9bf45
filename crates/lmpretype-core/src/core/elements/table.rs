use super::data::ELEMENT_DATA;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// A chemical element as known to the mass identifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ElementEntry {
    pub symbol: String,
    #[serde(rename = "mass")]
    pub atomic_mass: f64,
    /// Only required by the atomic-number ordering.
    #[serde(default)]
    pub atomic_number: Option<u8>,
}

impl ElementEntry {
    pub fn new(symbol: &str, atomic_mass: f64, atomic_number: Option<u8>) -> Self {
        Self {
            symbol: symbol.to_string(),
            atomic_mass,
            atomic_number,
        }
    }

    pub fn matches_mass(&self, mass: f64, tolerance: f64) -> bool {
        (mass - self.atomic_mass).abs() < tolerance
    }
}

#[derive(Debug, Error)]
pub enum ElementError {
    #[error("Unknown mass: {mass} (no element within {tolerance} amu)")]
    UnknownMass { mass: f64, tolerance: f64 },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid element table: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementTableFile {
    element: Vec<ElementEntry>,
}

/// An ordered, immutable lookup table of elements.
///
/// Table order decides which entry wins when several lie within tolerance of a mass.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTable {
    entries: Vec<ElementEntry>,
}

impl Default for ElementTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ElementTable {
    pub fn builtin() -> Self {
        let entries = ELEMENT_DATA
            .entries()
            .map(|(symbol, &(mass, z))| ElementEntry::new(symbol, mass, Some(z)))
            .collect();
        Self { entries }
    }

    pub fn new(entries: Vec<ElementEntry>) -> Result<Self, ElementError> {
        if entries.is_empty() {
            return Err(ElementError::Invalid("table has no elements".to_string()));
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.symbol.trim().is_empty() {
                return Err(ElementError::Invalid("empty element symbol".to_string()));
            }
            if !seen.insert(entry.symbol.as_str()) {
                return Err(ElementError::Invalid(format!(
                    "duplicate element symbol '{}'",
                    entry.symbol
                )));
            }
            if !entry.atomic_mass.is_finite() || entry.atomic_mass <= 0.0 {
                return Err(ElementError::Invalid(format!(
                    "element '{}' has invalid mass {}",
                    entry.symbol, entry.atomic_mass
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self, ElementError> {
        let content = std::fs::read_to_string(path).map_err(|e| ElementError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ElementError::Toml { source, .. } => ElementError::Toml {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ElementError> {
        let file: ElementTableFile = toml::from_str(content).map_err(|e| ElementError::Toml {
            path: "<string>".to_string(),
            source: e,
        })?;
        Self::new(file.element)
    }

    /// Returns the first element whose reference mass lies strictly within `tolerance`.
    pub fn identify(&self, mass: f64, tolerance: f64) -> Result<&ElementEntry, ElementError> {
        self.entries
            .iter()
            .find(|entry| entry.matches_mass(mass, tolerance))
            .ok_or(ElementError::UnknownMass { mass, tolerance })
    }

    pub fn get(&self, symbol: &str) -> Option<&ElementEntry> {
        self.entries.iter().find(|entry| entry.symbol == symbol)
    }

    pub fn position(&self, symbol: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.symbol == symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn builtin_table_identifies_common_masses() {
        let table = ElementTable::builtin();
        assert_eq!(table.identify(26.982, 1.0).unwrap().symbol, "Al");
        assert_eq!(table.identify(183.84, 1.0).unwrap().symbol, "W");
        assert_eq!(table.identify(1.0, 1.0).unwrap().symbol, "H");
        assert_eq!(table.identify(55.0, 1.0).unwrap().symbol, "Fe");
    }

    #[test]
    fn identify_uses_strict_tolerance_bound() {
        let table = ElementTable::new(vec![ElementEntry::new("X", 10.0, Some(5))]).unwrap();
        assert!(table.identify(10.99, 1.0).is_ok());
        assert!(matches!(
            table.identify(11.0, 1.0),
            Err(ElementError::UnknownMass { .. })
        ));
        assert!(table.identify(10.4, 0.5).is_ok());
        assert!(table.identify(10.6, 0.5).is_err());
    }

    #[test]
    fn identify_returns_first_entry_in_table_order_when_ambiguous() {
        let table = ElementTable::new(vec![
            ElementEntry::new("B", 10.8, Some(5)),
            ElementEntry::new("C", 12.0, Some(6)),
        ])
        .unwrap();
        assert_eq!(table.identify(11.5, 2.0).unwrap().symbol, "B");
    }

    #[test]
    fn identify_fails_for_unknown_mass() {
        let table = ElementTable::builtin();
        let err = table.identify(300.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("Unknown mass: 300"));
    }

    #[test]
    fn new_rejects_invalid_tables() {
        assert!(matches!(
            ElementTable::new(vec![]),
            Err(ElementError::Invalid(_))
        ));
        assert!(matches!(
            ElementTable::new(vec![
                ElementEntry::new("Fe", 55.8, Some(26)),
                ElementEntry::new("Fe", 56.0, Some(26)),
            ]),
            Err(ElementError::Invalid(_))
        ));
        assert!(matches!(
            ElementTable::new(vec![ElementEntry::new("Fe", -1.0, None)]),
            Err(ElementError::Invalid(_))
        ));
    }

    #[test]
    fn get_and_position_find_by_symbol() {
        let table = ElementTable::builtin();
        assert_eq!(table.get("Cu").unwrap().atomic_number, Some(29));
        assert_eq!(table.position("H"), Some(0));
        assert_eq!(table.position("W"), Some(12));
        assert!(table.get("U").is_none());
    }

    #[test]
    fn load_reads_toml_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("elements.toml");
        fs::write(
            &path,
            r#"
            [[element]]
            symbol = "Si"
            mass = 28.085
            atomic-number = 14

            [[element]]
            symbol = "Ge"
            mass = 72.63
            "#,
        )
        .unwrap();

        let table = ElementTable::load(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.identify(28.0, 0.5).unwrap().symbol, "Si");
        assert_eq!(table.get("Ge").unwrap().atomic_number, None);
    }

    #[test]
    fn load_reports_path_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "this is not toml").unwrap();
        match ElementTable::load(&path) {
            Err(ElementError::Toml { path: p, .. }) => assert!(p.ends_with("broken.toml")),
            other => panic!("expected TOML error, got {:?}", other),
        }
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = ElementTable::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ElementError::Io { .. })));
    }
}
