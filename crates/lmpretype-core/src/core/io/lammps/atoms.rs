use crate::core::models::types::TypeId;
use std::str::FromStr;

const WIDE_COLUMN_GAP: &str = "       ";
const COMPACT_COLUMN_GAP: &str = "    ";

/// Column layout used when re-emitting atom records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AtomLayout {
    /// Atomsk-style: three 20-character coordinate columns, extra columns appended.
    #[default]
    Wide,
    /// Up to three coordinate tokens joined by fixed spacing; later columns are dropped.
    Compact,
}

impl FromStr for AtomLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wide" => Ok(AtomLayout::Wide),
            "compact" => Ok(AtomLayout::Compact),
            other => Err(format!(
                "unknown atom layout '{}', expected 'wide' or 'compact'",
                other
            )),
        }
    }
}

impl AtomLayout {
    /// Formats a record, or returns `None` when the layout cannot represent it.
    pub fn format(self, atom_id: i64, new_type: TypeId, columns: &[&str]) -> Option<String> {
        match self {
            AtomLayout::Wide => {
                let [x, y, z, extra @ ..] = columns else {
                    return None;
                };
                let mut line = format!(
                    "      {:6}    {}        {:>20}{gap}{:>20}{gap}{:>20}",
                    atom_id,
                    new_type,
                    x,
                    y,
                    z,
                    gap = WIDE_COLUMN_GAP
                );
                if !extra.is_empty() {
                    line.push_str(WIDE_COLUMN_GAP);
                    line.push_str(&extra.join(WIDE_COLUMN_GAP));
                }
                Some(line)
            }
            AtomLayout::Compact => {
                let mut line = format!("{:>8} {:>4}{}", atom_id, new_type, COMPACT_COLUMN_GAP);
                for (i, column) in columns.iter().take(3).enumerate() {
                    if i > 0 {
                        line.push_str(COMPACT_COLUMN_GAP);
                    }
                    line.push_str(column);
                }
                Some(line)
            }
        }
    }
}

/// A whitespace-split atom line: `atom-ID type columns...`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord<'a> {
    pub atom_id: i64,
    pub atom_type: i64,
    pub columns: Vec<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AtomLine<'a> {
    /// Blank or comment line.
    Ignored,
    Record(AtomRecord<'a>),
    /// Anything that does not look like an atom record.
    Unparseable,
}

pub fn classify_atom_line(line: &str, min_fields: usize) -> AtomLine<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return AtomLine::Ignored;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.len() < min_fields.max(2) {
        return AtomLine::Unparseable;
    }
    let (Ok(atom_id), Ok(atom_type)) = (tokens[0].parse::<i64>(), tokens[1].parse::<i64>())
    else {
        return AtomLine::Unparseable;
    };

    AtomLine::Record(AtomRecord {
        atom_id,
        atom_type,
        columns: tokens[2..].to_vec(),
    })
}
