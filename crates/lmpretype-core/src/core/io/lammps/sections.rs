use super::LammpsError;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

const HINT_SCAN_LINES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Masses,
    Atoms,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Masses => write!(f, "Masses"),
            Section::Atoms => write!(f, "Atoms"),
        }
    }
}

/// How section header lines are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMatch {
    /// `Masses` must be the only token on its line; `Atoms` must start the line.
    #[default]
    Strict,
    /// Any line containing the keyword is a header.
    Loose,
}

impl HeaderMatch {
    pub fn is_masses_header(self, line: &str) -> bool {
        let trimmed = line.trim();
        match self {
            HeaderMatch::Strict => {
                trimmed == "Masses"
                    || (trimmed.starts_with("Masses") && trimmed.split_whitespace().count() == 1)
            }
            HeaderMatch::Loose => trimmed.contains("Masses"),
        }
    }

    pub fn is_atoms_header(self, line: &str) -> bool {
        let trimmed = line.trim();
        match self {
            HeaderMatch::Strict => trimmed.starts_with("Atoms"),
            HeaderMatch::Loose => trimmed.contains("Atoms"),
        }
    }
}

impl FromStr for HeaderMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(HeaderMatch::Strict),
            "loose" => Ok(HeaderMatch::Loose),
            other => Err(format!(
                "unknown header matching '{}', expected 'strict' or 'loose'",
                other
            )),
        }
    }
}

/// A line shown to the user when a section header cannot be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHint {
    pub line: usize,
    pub content: String,
}

impl fmt::Display for SectionHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {:?}", self.line, self.content)
    }
}

/// Zero-based line indices of the two section headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSections {
    pub masses: usize,
    pub atoms: usize,
}

impl FileSections {
    /// Lines strictly between the Masses and Atoms headers.
    pub fn masses_block(&self) -> Range<usize> {
        self.masses + 1..self.atoms
    }

    pub fn preamble(&self) -> Range<usize> {
        0..self.masses + 1
    }
}

/// Finds the Masses and Atoms headers.
///
/// A later Masses header replaces an earlier one until an Atoms header is reached;
/// Atoms headers seen before any Masses header are ignored.
pub fn locate_sections<S: AsRef<str>>(
    lines: &[S],
    matching: HeaderMatch,
) -> Result<FileSections, LammpsError> {
    let mut masses = None;
    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if matching.is_masses_header(line) {
            masses = Some(i);
        } else if matching.is_atoms_header(line) {
            if let Some(masses) = masses {
                return Ok(FileSections { masses, atoms: i });
            }
        }
    }

    Err(match masses {
        None => missing(Section::Masses, lines),
        Some(_) => missing(Section::Atoms, lines),
    })
}

fn missing<S: AsRef<str>>(section: Section, lines: &[S]) -> LammpsError {
    let hints = lines
        .iter()
        .take(HINT_SCAN_LINES)
        .enumerate()
        .filter(|(_, line)| {
            let line = line.as_ref();
            line.contains("Mass") || line.contains("Atom")
        })
        .map(|(i, line)| SectionHint {
            line: i,
            content: line.as_ref().to_string(),
        })
        .collect();
    LammpsError::SectionNotFound {
        section,
        total_lines: lines.len(),
        hints,
    }
}
