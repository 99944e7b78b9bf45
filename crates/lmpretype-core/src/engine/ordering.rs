use crate::core::elements::ElementTable;
use crate::core::models::types::{TypeElementMap, TypeId, TypeMapping};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderingError {
    #[error("Element '{symbol}' (type {type_id}) has no entry in the fixed type table")]
    ElementNotConfigured { symbol: String, type_id: TypeId },
    #[error("Element '{symbol}' (type {type_id}) has no atomic number")]
    MissingAtomicNumber { symbol: String, type_id: TypeId },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid type table: {0}")]
    Invalid(String),
}

/// Strategy turning discovered type/element assignments into a new type numbering.
pub trait ElementOrdering {
    fn name(&self) -> &'static str;

    /// Builds a mapping holding exactly one entry per declared type.
    fn build_mapping(&self, types: &TypeElementMap) -> Result<TypeMapping, OrderingError>;
}

/// Numbers types `1..=N` by ascending atomic number, keeping discovery order on ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByAtomicNumber;

impl ElementOrdering for ByAtomicNumber {
    fn name(&self) -> &'static str {
        "atomic-number"
    }

    fn build_mapping(&self, types: &TypeElementMap) -> Result<TypeMapping, OrderingError> {
        let mut keyed = types
            .iter()
            .map(|a| {
                a.element
                    .atomic_number
                    .map(|z| (z, a))
                    .ok_or_else(|| OrderingError::MissingAtomicNumber {
                        symbol: a.element.symbol.clone(),
                        type_id: a.type_id,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // `sort_by_key` is stable, so equal atomic numbers keep their discovery order.
        keyed.sort_by_key(|&(z, _)| z);

        let mut mapping = TypeMapping::new();
        for (new_type, (_, assignment)) in (1..).zip(keyed) {
            mapping.insert(assignment.type_id, new_type, &assignment.element);
        }
        Ok(mapping)
    }
}

/// Element symbol to target type ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedTypeTable {
    targets: BTreeMap<String, TypeId>,
}

#[derive(Debug, Deserialize)]
struct TypeTableRow {
    element: String,
    #[serde(rename = "type")]
    type_id: TypeId,
}

impl FixedTypeTable {
    pub fn new<I, S>(targets: I) -> Result<Self, OrderingError>
    where
        I: IntoIterator<Item = (S, TypeId)>,
        S: Into<String>,
    {
        let mut table = BTreeMap::new();
        let mut owners: BTreeMap<TypeId, String> = BTreeMap::new();
        for (symbol, type_id) in targets {
            let symbol = symbol.into();
            if type_id == 0 {
                return Err(OrderingError::Invalid(format!(
                    "element '{}' targets type 0; type IDs start at 1",
                    symbol
                )));
            }
            if table.insert(symbol.clone(), type_id).is_some() {
                return Err(OrderingError::Invalid(format!(
                    "element '{}' appears more than once",
                    symbol
                )));
            }
            // One new type carries exactly one element in the regenerated Masses block.
            if let Some(owner) = owners.insert(type_id, symbol.clone()) {
                return Err(OrderingError::Invalid(format!(
                    "elements '{}' and '{}' both target type {}",
                    owner, symbol, type_id
                )));
            }
        }
        Ok(Self { targets: table })
    }

    /// Assigns every element its 1-based position in `elements`.
    pub fn from_element_order(elements: &ElementTable) -> Self {
        let targets = (1..)
            .zip(elements.iter())
            .map(|(id, element)| (element.symbol.clone(), id))
            .collect();
        Self { targets }
    }

    pub fn load_csv(path: &Path) -> Result<Self, OrderingError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_path(path)
            .map_err(|e| OrderingError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;

        let mut rows = Vec::new();
        for result in reader.deserialize::<TypeTableRow>() {
            let row = result.map_err(|e| OrderingError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            rows.push((row.element, row.type_id));
        }
        if rows.is_empty() {
            return Err(OrderingError::Invalid(format!(
                "'{}' contains no rows",
                path.display()
            )));
        }
        Self::new(rows)
    }

    pub fn get(&self, symbol: &str) -> Option<TypeId> {
        self.targets.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Looks up each element's target type in a fixed table; no sorting takes place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTable {
    table: FixedTypeTable,
}

impl FixedTable {
    pub fn new(table: FixedTypeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FixedTypeTable {
        &self.table
    }
}

impl ElementOrdering for FixedTable {
    fn name(&self) -> &'static str {
        "fixed-table"
    }

    fn build_mapping(&self, types: &TypeElementMap) -> Result<TypeMapping, OrderingError> {
        let mut mapping = TypeMapping::new();
        for assignment in types.iter() {
            let new_type = self.table.get(&assignment.element.symbol).ok_or_else(|| {
                OrderingError::ElementNotConfigured {
                    symbol: assignment.element.symbol.clone(),
                    type_id: assignment.type_id,
                }
            })?;
            mapping.insert(assignment.type_id, new_type, &assignment.element);
        }
        Ok(mapping)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingKind {
    #[default]
    AtomicNumber,
    FixedTable,
}

impl fmt::Display for OrderingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingKind::AtomicNumber => write!(f, "atomic-number"),
            OrderingKind::FixedTable => write!(f, "fixed-table"),
        }
    }
}

impl FromStr for OrderingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atomic-number" | "z" => Ok(OrderingKind::AtomicNumber),
            "fixed-table" | "table" => Ok(OrderingKind::FixedTable),
            other => Err(format!(
                "unknown ordering '{}', expected 'atomic-number' or 'fixed-table'",
                other
            )),
        }
    }
}

/// The ordering strategy chosen for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderingPolicy {
    AtomicNumber(ByAtomicNumber),
    FixedTable(FixedTable),
}

impl OrderingPolicy {
    pub fn kind(&self) -> OrderingKind {
        match self {
            OrderingPolicy::AtomicNumber(_) => OrderingKind::AtomicNumber,
            OrderingPolicy::FixedTable(_) => OrderingKind::FixedTable,
        }
    }
}

impl ElementOrdering for OrderingPolicy {
    fn name(&self) -> &'static str {
        match self {
            OrderingPolicy::AtomicNumber(p) => p.name(),
            OrderingPolicy::FixedTable(p) => p.name(),
        }
    }

    fn build_mapping(&self, types: &TypeElementMap) -> Result<TypeMapping, OrderingError> {
        match self {
            OrderingPolicy::AtomicNumber(p) => p.build_mapping(types),
            OrderingPolicy::FixedTable(p) => p.build_mapping(types),
        }
    }
}
