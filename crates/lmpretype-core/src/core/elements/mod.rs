//! Element identification from atomic masses.
//!
//! The built-in table covers the elements commonly found in metallic and organic
//! LAMMPS inputs. A replacement table can be injected, either programmatically or
//! from a TOML file, so that mass matching is reproducible at the tolerance
//! boundaries.

pub mod data;
pub mod table;

pub use table::{ElementEntry, ElementError, ElementTable};
