//! CLI subcommand implementations.

pub mod add;
pub mod calc;
pub mod delete;
pub mod list;
pub mod stats;
