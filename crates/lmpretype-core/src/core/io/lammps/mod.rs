//! Reading and rewriting LAMMPS data files.
//!
//! Only the `Masses` and `Atoms` sections are interpreted. Everything before the
//! `Masses` header is carried through untouched, which keeps box bounds, counts and
//! any custom header comments intact.

pub mod atoms;
pub mod masses;
pub mod sections;
pub mod writer;

use sections::{Section, SectionHint};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LammpsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Could not find the {section} section ({total_lines} lines scanned)")]
    SectionNotFound {
        section: Section,
        total_lines: usize,
        hints: Vec<SectionHint>,
    },
    #[error("No element types found in the Masses section (lines {first_line}-{last_line})")]
    EmptyMasses { first_line: usize, last_line: usize },
}

/// A data file held in memory as raw lines, terminators included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFile {
    lines: Vec<String>,
}

impl DataFile {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.split_inclusive('\n').map(str::to_owned).collect(),
        }
    }

    pub fn read_from(reader: &mut impl Read) -> Result<Self, LammpsError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Self::parse(&content))
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, LammpsError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
