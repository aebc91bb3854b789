// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use serde_json::json;
use std::env;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use ingestor::config::{load_and_validate_config, ProcessorRegistry, RuntimeBuilder};
use ingestor::document::{Document, Format, Provenance};
use ingestor::traits::ExpansionExecutor;

/// Name to show in usage text; argv may be empty when exec'd without one.
fn program_name(args: &[String]) -> &str {
    args.first().map_or("ingestor", String::as_str)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 5 {
        let program = program_name(&args);
        eprintln!("Usage: {} <config.yaml|config.toml> <format> <type> <payload-file>", program);
        eprintln!("Example: {} configs/envelope.yaml JSON envelope demos/upload.json", program);
        std::process::exit(2);
    }
    let (config_file, format, doc_type, payload_file) = (&args[1], &args[2], &args[3], &args[4]);

    let format: Format = match format.parse() {
        Ok(format) => format,
        Err(_) => bail!("unsupported format '{}' (expected JSON, YAML or BINARY)", format),
    };
    let payload = fs::read(payload_file)
        .with_context(|| format!("failed to read payload file '{}'", payload_file))?;

    let config = load_and_validate_config(config_file)
        .with_context(|| format!("failed to load config '{}'", config_file))?;
    let executor = RuntimeBuilder::from_config_global(&config)?;

    let root = Document::new(
        format,
        doc_type.as_str(),
        payload,
        Provenance::new(payload_file.as_str()).with_attribute("config", config_file.as_str()),
    );

    let start_time = Instant::now();
    let outcome = executor
        .expand(ProcessorRegistry::global().snapshot(), root)
        .await?;

    let discarded: Vec<_> = outcome
        .discarded
        .iter()
        .map(|d| {
            json!({
                "type": d.document.doc_type,
                "format": d.document.format,
                "depth": d.depth,
                "kind": d.reason.kind(),
                "reason": d.reason.to_string(),
            })
        })
        .collect();

    let report = json!({
        "strategy": executor.strategy(),
        "elapsed_ms": start_time.elapsed().as_millis() as u64,
        "leaves": outcome.leaves,
        "discarded": discarded,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
