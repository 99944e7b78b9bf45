//! # Core Module
//!
//! The stateless foundation of the library: the element table used to recognize
//! species from their masses, the type data models, and the LAMMPS data-file reader
//! and writer.
//!
//! ## Architecture
//!
//! - **Element Identification** ([`elements`]) - Static element data and tolerance-based mass matching
//! - **Type Models** ([`models`]) - Declared type/element assignments and old-to-new type mappings
//! - **File I/O** ([`io`]) - Section location, Masses parsing and fixed-width rewriting

pub mod elements;
pub mod io;
pub mod models;
