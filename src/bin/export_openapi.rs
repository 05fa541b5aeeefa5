//! Export OpenAPI specification to JSON file
//!
//! Usage:
//!   cargo run --bin export_openapi > openapi.json
//!
//! Or with file output:
//!   cargo run --bin export_openapi -- --output docs/openapi.json

use std::path::PathBuf;

use anyhow::Context;
use calorie_tracker::gateway::openapi::ApiDoc;
use clap::Parser;
use utoipa::OpenApi;

#[derive(Parser, Debug)]
#[command(about = "Write the OpenAPI document for the calorie tracker API")]
struct Args {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to serialize OpenAPI spec")?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("OpenAPI spec exported to: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
