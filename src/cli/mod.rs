//! Command-line interface for nostalgia.
//!
//! This module provides CLI commands for running the web server and for
//! exercising the catalog search modes from the terminal.

mod commands;

pub use commands::{run, Cli, Commands};
