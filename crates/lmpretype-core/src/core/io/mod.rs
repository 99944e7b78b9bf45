//! Provides input/output functionality for molecular simulation file formats.

pub mod lammps;
