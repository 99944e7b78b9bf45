//! # LMP-RETYPE Core Library
//!
//! Reorders the atom types of LAMMPS data files so that the same element always ends
//! up with the same type ID, either by ascending atomic number or through a fixed
//! element-to-type table.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Element data, type models and the LAMMPS data-file
//!   reader and writer. Nothing here holds state between calls.
//!
//! - **[`engine`]: The Decisions.** Ordering strategies behind a single
//!   `ElementOrdering` interface, run configuration, progress reporting and errors.
//!
//! - **[`workflows`]: The Public API.** Complete runs over in-memory text or file paths.

pub mod core;
pub mod engine;
pub mod workflows;
