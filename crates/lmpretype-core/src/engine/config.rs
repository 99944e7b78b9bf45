use super::ordering::{ByAtomicNumber, FixedTable, FixedTypeTable, OrderingKind, OrderingPolicy};
use crate::core::elements::ElementTable;
use crate::core::io::lammps::atoms::AtomLayout;
use crate::core::io::lammps::sections::HeaderMatch;
use crate::core::io::lammps::writer::RewriteOptions;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Parsing and formatting settings that travel with each ordering strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantDefaults {
    pub tolerance: f64,
    pub header_match: HeaderMatch,
    pub min_atom_fields: usize,
    pub atom_layout: AtomLayout,
}

impl VariantDefaults {
    pub const ATOMIC_NUMBER: Self = Self {
        tolerance: 1.0,
        header_match: HeaderMatch::Strict,
        min_atom_fields: 4,
        atom_layout: AtomLayout::Wide,
    };

    pub const FIXED_TABLE: Self = Self {
        tolerance: 0.5,
        header_match: HeaderMatch::Loose,
        min_atom_fields: 2,
        atom_layout: AtomLayout::Compact,
    };

    pub fn for_kind(kind: OrderingKind) -> Self {
        match kind {
            OrderingKind::AtomicNumber => Self::ATOMIC_NUMBER,
            OrderingKind::FixedTable => Self::FIXED_TABLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetypeConfig {
    pub ordering: OrderingPolicy,
    pub elements: ElementTable,
    pub tolerance: f64,
    pub header_match: HeaderMatch,
    pub min_atom_fields: usize,
    pub atom_layout: AtomLayout,
    pub warn_unmapped: bool,
}

impl RetypeConfig {
    /// Atomic-number ordering with the built-in element table.
    pub fn by_atomic_number() -> Self {
        Self::with_defaults(
            OrderingPolicy::AtomicNumber(ByAtomicNumber),
            ElementTable::builtin(),
        )
    }

    /// Fixed-table ordering with the built-in element table.
    pub fn fixed_table(table: FixedTypeTable) -> Self {
        Self::with_defaults(
            OrderingPolicy::FixedTable(FixedTable::new(table)),
            ElementTable::builtin(),
        )
    }

    fn with_defaults(ordering: OrderingPolicy, elements: ElementTable) -> Self {
        let defaults = VariantDefaults::for_kind(ordering.kind());
        Self {
            ordering,
            elements,
            tolerance: defaults.tolerance,
            header_match: defaults.header_match,
            min_atom_fields: defaults.min_atom_fields,
            atom_layout: defaults.atom_layout,
            warn_unmapped: true,
        }
    }

    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            layout: self.atom_layout,
            min_atom_fields: self.min_atom_fields,
            warn_unmapped: self.warn_unmapped,
        }
    }
}

/// Builds a [`RetypeConfig`]; unset settings fall back to the ordering's variant defaults.
#[derive(Default)]
pub struct RetypeConfigBuilder {
    ordering: Option<OrderingPolicy>,
    elements: Option<ElementTable>,
    tolerance: Option<f64>,
    header_match: Option<HeaderMatch>,
    min_atom_fields: Option<usize>,
    atom_layout: Option<AtomLayout>,
    warn_unmapped: Option<bool>,
}

impl RetypeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = Some(ordering);
        self
    }
    pub fn elements(mut self, elements: ElementTable) -> Self {
        self.elements = Some(elements);
        self
    }
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
    pub fn header_match(mut self, header_match: HeaderMatch) -> Self {
        self.header_match = Some(header_match);
        self
    }
    pub fn min_atom_fields(mut self, fields: usize) -> Self {
        self.min_atom_fields = Some(fields);
        self
    }
    pub fn atom_layout(mut self, layout: AtomLayout) -> Self {
        self.atom_layout = Some(layout);
        self
    }
    pub fn warn_unmapped(mut self, warn: bool) -> Self {
        self.warn_unmapped = Some(warn);
        self
    }

    pub fn build(self) -> Result<RetypeConfig, ConfigError> {
        let ordering = self
            .ordering
            .ok_or(ConfigError::MissingParameter("ordering"))?;
        let defaults = VariantDefaults::for_kind(ordering.kind());

        let tolerance = self.tolerance.unwrap_or(defaults.tolerance);
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "tolerance",
                reason: format!("must be a positive number, got {}", tolerance),
            });
        }
        let min_atom_fields = self.min_atom_fields.unwrap_or(defaults.min_atom_fields);
        if min_atom_fields < 2 {
            return Err(ConfigError::InvalidParameter {
                name: "min_atom_fields",
                reason: format!("an atom record needs at least 2 fields, got {}", min_atom_fields),
            });
        }

        Ok(RetypeConfig {
            ordering,
            elements: self.elements.unwrap_or_default(),
            tolerance,
            header_match: self.header_match.unwrap_or(defaults.header_match),
            min_atom_fields,
            atom_layout: self.atom_layout.unwrap_or(defaults.atom_layout),
            warn_unmapped: self.warn_unmapped.unwrap_or(true),
        })
    }
}
