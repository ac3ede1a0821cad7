//! Fuel consumption tracker CLI library.
//!
//! This crate provides the CLI interface for the fuel consumption tracker.

mod cli;
pub mod commands;
mod config;

pub use cli::{AddArgs, Cli, Commands};
pub use config::Config;
