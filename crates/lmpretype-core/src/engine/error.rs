use thiserror::Error;

use super::ordering::OrderingError;
use crate::core::io::lammps::LammpsError;

#[derive(Debug, Error)]
pub enum RetypeError {
    #[error(transparent)]
    Lammps(#[from] LammpsError),

    #[error(transparent)]
    Ordering(#[from] OrderingError),

    #[error("Failed to write output: {0}")]
    Write(#[source] std::io::Error),
}

impl RetypeError {
    /// Data conditions that abort a run before any output is written.
    ///
    /// These are reported to the user rather than treated as process failures.
    pub fn is_reported_condition(&self) -> bool {
        matches!(
            self,
            RetypeError::Lammps(LammpsError::SectionNotFound { .. })
                | RetypeError::Lammps(LammpsError::EmptyMasses { .. })
                | RetypeError::Ordering(OrderingError::ElementNotConfigured { .. })
                | RetypeError::Ordering(OrderingError::MissingAtomicNumber { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::lammps::sections::Section;

    #[test]
    fn data_conditions_are_reported_conditions() {
        let missing = RetypeError::from(LammpsError::SectionNotFound {
            section: Section::Atoms,
            total_lines: 3,
            hints: vec![],
        });
        assert!(missing.is_reported_condition());

        let empty = RetypeError::from(LammpsError::EmptyMasses {
            first_line: 1,
            last_line: 2,
        });
        assert!(empty.is_reported_condition());

        let unconfigured = RetypeError::from(OrderingError::ElementNotConfigured {
            symbol: "Mo".to_string(),
            type_id: 3,
        });
        assert!(unconfigured.is_reported_condition());
    }

    #[test]
    fn io_failures_are_not_reported_conditions() {
        let io = RetypeError::from(LammpsError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        )));
        assert!(!io.is_reported_condition());

        let write = RetypeError::Write(std::io::Error::other("disk full"));
        assert!(!write.is_reported_condition());
        assert!(write.to_string().starts_with("Failed to write output"));
    }
}
