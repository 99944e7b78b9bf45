//! Data models shared by the parser, the ordering strategies and the rewriter.

pub mod types;
