//! CLI module for promptreg - command-line interface and subcommands.

pub mod commands;

pub use commands::Cli;
