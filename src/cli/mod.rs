//! CLI module for toolshed - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for browsing the tool
//! dictionary, showing toolboxes, and building or exporting a project plan.

pub mod commands;

pub use commands::Cli;
