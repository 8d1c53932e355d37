// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use anyhow::Context;
use clap::Parser;
use harlequin_wherobots_adapter::{AdapterError, CliArgs, init_logging};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // File logging when requested, stderr otherwise
    if !init_logging()? {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to set tracing subscriber")?;
    }

    let args = CliArgs::parse();
    let json = args.json;
    let options = args.into_options();
    options.validate()?;

    let catalog = options
        .catalog()
        .context("Failed to set up the Wherobots catalog client")?
        .get_catalog()
        .await
        .map_err(AdapterError::catalog_unavailable)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        print!("{}", catalog);
    }

    Ok(())
}
