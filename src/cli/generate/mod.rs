//! Generate command - one pipeline run from the terminal

use std::io::{self, BufRead, Write};

use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::pipeline::GenerationPipeline;

#[derive(Args)]
pub struct GenerateArgs {
    /// Natural-language request; prompts interactively when omitted
    pub query: Option<String>,

    /// Number of examples to retrieve
    #[arg(long)]
    pub top_k: Option<usize>,
}

/// Run the pipeline once and print the result as pretty JSON.
pub async fn run(args: GenerateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let pipeline = GenerationPipeline::from_config(&config)?;

    let query = match args.query {
        Some(query) => query,
        None => read_query_interactively()?,
    };

    let outcome = pipeline.run(&query, args.top_k).await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}

fn read_query_interactively() -> anyhow::Result<String> {
    print!("Describe the workflow you need: ");
    io::stdout().flush()?;

    let mut query = String::new();
    io::stdin().lock().read_line(&mut query)?;

    Ok(query.trim().to_string())
}
