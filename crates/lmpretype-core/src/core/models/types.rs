use crate::core::elements::ElementEntry;
use std::collections::BTreeMap;
use std::fmt;

pub type TypeId = u32;

/// A declared atom type together with the element inferred from its mass.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAssignment {
    pub type_id: TypeId,
    pub mass: f64,
    pub element: ElementEntry,
}

/// Declared type IDs mapped to elements, in order of discovery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeElementMap {
    assignments: Vec<TypeAssignment>,
}

impl TypeElementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an assignment unless the type ID is already present.
    ///
    /// Returns `false` when the type was already declared; the first declaration is kept.
    pub fn insert(&mut self, assignment: TypeAssignment) -> bool {
        if self.contains(assignment.type_id) {
            return false;
        }
        self.assignments.push(assignment);
        true
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.get(type_id).is_some()
    }

    pub fn get(&self, type_id: TypeId) -> Option<&TypeAssignment> {
        self.assignments.iter().find(|a| a.type_id == type_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeAssignment> {
        self.assignments.iter()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Old-type to new-type mapping along with the element carried by each new type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMapping {
    old_to_new: BTreeMap<TypeId, TypeId>,
    new_types: BTreeMap<TypeId, ElementEntry>,
}

impl TypeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, old_type: TypeId, new_type: TypeId, element: &ElementEntry) {
        self.old_to_new.insert(old_type, new_type);
        self.new_types
            .entry(new_type)
            .or_insert_with(|| element.clone());
    }

    pub fn get(&self, old_type: TypeId) -> Option<TypeId> {
        self.old_to_new.get(&old_type).copied()
    }

    /// Looks up a raw type value as read from an atom record.
    pub fn get_raw(&self, old_type: i64) -> Option<TypeId> {
        TypeId::try_from(old_type).ok().and_then(|t| self.get(t))
    }

    pub fn pairs(&self) -> impl Iterator<Item = (TypeId, TypeId)> + '_ {
        self.old_to_new.iter().map(|(&old, &new)| (old, new))
    }

    /// New type IDs in ascending order with their elements.
    pub fn new_types(&self) -> impl Iterator<Item = (TypeId, &ElementEntry)> {
        self.new_types.iter().map(|(&id, element)| (id, element))
    }

    pub fn len(&self) -> usize {
        self.old_to_new.len()
    }

    pub fn is_empty(&self) -> bool {
        self.old_to_new.is_empty()
    }
}

/// Prints `{old: new, ...}` ordered by new type, then old type.
impl fmt::Display for TypeMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self.pairs().collect();
        pairs.sort_by_key(|&(old, new)| (new, old));

        write!(f, "{{")?;
        for (i, (old, new)) in pairs.into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", old, new)?;
        }
        write!(f, "}}")
    }
}
