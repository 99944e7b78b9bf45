//! # Engine Module
//!
//! The decision-making layer of a retype run: which ordering strategy turns the
//! discovered types into new type IDs, with which parsing and formatting settings, and
//! how progress and failures are surfaced.
//!
//! - **Ordering Strategies** ([`ordering`]) - By atomic number or by a fixed element-to-type table
//! - **Configuration** ([`config`]) - Run settings, variant defaults and the config builder
//! - **Progress Monitoring** ([`progress`]) - Stage transitions reported to front ends
//! - **Error Handling** ([`error`]) - The run-level error taxonomy

pub mod config;
pub mod error;
pub mod ordering;
pub mod progress;
