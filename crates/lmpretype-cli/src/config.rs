pub mod builder;
pub mod file;
pub mod models;

pub use builder::build_config;
