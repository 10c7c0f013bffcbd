//! CLI module for flowsmith
//!
//! Subcommands:
//! - `serve`: run the HTTP API
//! - `generate`: run the pipeline once for a query and print the result

pub mod generate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Flowsmith - natural language to validated workflow configurations
#[derive(Parser)]
#[command(name = "flowsmith")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Generate a workflow config for a single query
    Generate(generate::GenerateArgs),
}
