//! # Workflows Module
//!
//! High-level entry points that tie the [`core`](crate::core) file handling and the
//! [`engine`](crate::engine) ordering strategies into complete runs.
//!
//! - **Retype Workflow** ([`retype`]) - Read a data file, remap its atom types and write the result.

pub mod retype;
