use super::LammpsError;
use super::sections::FileSections;
use crate::core::elements::{ElementError, ElementTable};
use crate::core::models::types::{TypeAssignment, TypeElementMap, TypeId};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum MassLineError {
    #[error("expected a type ID and a mass")]
    TooFewFields,
    #[error("invalid type ID '{0}'")]
    InvalidTypeId(String),
    #[error("invalid mass '{0}'")]
    InvalidMass(String),
    #[error(transparent)]
    UnknownMass(#[from] ElementError),
    #[error("type {0} is already declared")]
    DuplicateType(TypeId),
}

/// A Masses line that was not turned into a type assignment.
#[derive(Debug)]
pub struct SkippedLine {
    pub line: usize,
    pub content: String,
    pub reason: MassLineError,
}

#[derive(Debug, Default)]
pub struct MassesParse {
    pub types: TypeElementMap,
    pub skipped: Vec<SkippedLine>,
}

/// Strips a trailing `#` comment and returns the remaining tokens.
pub(crate) fn data_tokens(line: &str) -> Vec<&str> {
    line.split('#')
        .next()
        .unwrap_or("")
        .split_whitespace()
        .collect()
}

pub fn parse_mass_line(
    line: &str,
    table: &ElementTable,
    tolerance: f64,
) -> Result<TypeAssignment, MassLineError> {
    let tokens = data_tokens(line);
    if tokens.len() < 2 {
        return Err(MassLineError::TooFewFields);
    }
    let type_id: TypeId = tokens[0]
        .parse()
        .ok()
        .filter(|&id| id > 0)
        .ok_or_else(|| MassLineError::InvalidTypeId(tokens[0].to_string()))?;
    let mass: f64 = tokens[1]
        .parse()
        .map_err(|_| MassLineError::InvalidMass(tokens[1].to_string()))?;
    let element = table.identify(mass, tolerance)?;

    Ok(TypeAssignment {
        type_id,
        mass,
        element: element.clone(),
    })
}

pub fn parse_masses<S: AsRef<str>>(
    lines: &[S],
    sections: &FileSections,
    table: &ElementTable,
    tolerance: f64,
) -> Result<MassesParse, LammpsError> {
    let mut parsed = MassesParse::default();

    for idx in sections.masses_block() {
        let raw = lines[idx].as_ref();
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let outcome = parse_mass_line(line, table, tolerance).and_then(|assignment| {
            let type_id = assignment.type_id;
            if parsed.types.insert(assignment) {
                Ok(type_id)
            } else {
                Err(MassLineError::DuplicateType(type_id))
            }
        });

        match outcome {
            Ok(type_id) => {
                if let Some(a) = parsed.types.get(type_id) {
                    debug!(
                        "Type {}: {} (Z={:?}, mass={})",
                        a.type_id, a.element.symbol, a.element.atomic_number, a.mass
                    );
                }
            }
            Err(reason) => {
                warn!("Could not parse line {}: {} ({})", idx, line, reason);
                parsed.skipped.push(SkippedLine {
                    line: idx,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    if parsed.types.is_empty() {
        return Err(LammpsError::EmptyMasses {
            first_line: sections.masses + 1,
            last_line: sections.atoms,
        });
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections_for(lines: &[&str]) -> FileSections {
        FileSections {
            masses: 0,
            atoms: lines.len(),
        }
    }

    #[test]
    fn parses_type_and_mass_ignoring_comments() {
        let table = ElementTable::builtin();
        let a = parse_mass_line("2 183.84 # W", &table, 1.0).unwrap();
        assert_eq!(a.type_id, 2);
        assert_eq!(a.element.symbol, "W");
        assert_eq!(a.mass, 183.84);
    }

    #[test]
    fn mass_line_errors_are_classified() {
        let table = ElementTable::builtin();
        assert!(matches!(
            parse_mass_line("1 # only id", &table, 1.0),
            Err(MassLineError::TooFewFields)
        ));
        assert!(matches!(
            parse_mass_line("abc notanumber", &table, 1.0),
            Err(MassLineError::InvalidTypeId(_))
        ));
        assert!(matches!(
            parse_mass_line("0 12.011", &table, 1.0),
            Err(MassLineError::InvalidTypeId(_))
        ));
        assert!(matches!(
            parse_mass_line("1 heavy", &table, 1.0),
            Err(MassLineError::InvalidMass(_))
        ));
        assert!(matches!(
            parse_mass_line("1 250.0", &table, 1.0),
            Err(MassLineError::UnknownMass(_))
        ));
    }

    #[test]
    fn malformed_lines_are_skipped_without_aborting() {
        let lines = [
            "Masses\n",
            "\n",
            "abc notanumber\n",
            "# a comment\n",
            "1 26.982 # Al\n",
            "2 250.0\n",
            "\n",
        ];
        let parsed = parse_masses(
            &lines,
            &sections_for(&lines),
            &ElementTable::builtin(),
            1.0,
        )
        .unwrap();
        assert_eq!(parsed.types.len(), 1);
        assert_eq!(parsed.types.get(1).unwrap().element.symbol, "Al");
        assert_eq!(parsed.skipped.len(), 2);
        assert_eq!(parsed.skipped[0].line, 2);
        assert_eq!(parsed.skipped[1].line, 5);
    }

    #[test]
    fn duplicate_type_declarations_keep_the_first() {
        let lines = ["Masses\n", "1 26.982\n", "1 183.84\n"];
        let parsed = parse_masses(
            &lines,
            &sections_for(&lines),
            &ElementTable::builtin(),
            1.0,
        )
        .unwrap();
        assert_eq!(parsed.types.len(), 1);
        assert_eq!(parsed.types.get(1).unwrap().element.symbol, "Al");
        assert!(matches!(
            parsed.skipped[0].reason,
            MassLineError::DuplicateType(1)
        ));
    }

    #[test]
    fn empty_masses_block_is_an_error() {
        let lines = ["Masses\n", "\n", "# nothing\n", "x y\n"];
        let result = parse_masses(
            &lines,
            &sections_for(&lines),
            &ElementTable::builtin(),
            1.0,
        );
        assert!(matches!(result, Err(LammpsError::EmptyMasses { .. })));
    }
}
