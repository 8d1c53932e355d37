// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Command line options, mirroring the adapter options offered by the host.

use clap::Parser;
use harlequin_wherobots_catalog::DEFAULT_MAX_CONCURRENT_FETCHES;
use harlequin_wherobots_catalog::http::DEFAULT_TIMEOUT_SECS;

use crate::config::AdapterOptions;

/// Print the catalog tree of a Wherobots stack
#[derive(Debug, Parser)]
#[command(name = "wherobots-catalog", version, about)]
pub struct CliArgs {
    /// Base domain of the Wherobots stack, e.g. cloud.wherobots.com
    pub conn_str: Vec<String>,

    /// Wherobots API token
    #[arg(short = 't', long)]
    pub token: Option<String>,

    /// Wherobots API key
    #[arg(short = 'k', long = "api-key")]
    pub api_key: Option<String>,

    /// Runtime to provision for new SQL sessions
    #[arg(short = 'r', long)]
    pub runtime: Option<String>,

    /// Region to launch new SQL sessions into
    #[arg(short = 'R', long)]
    pub region: Option<String>,

    /// WebSocket URL of an existing SQL session
    #[arg(long = "ws-url")]
    pub ws_url: Option<String>,

    /// Maximum table schema requests in flight
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT_FETCHES)]
    pub max_concurrent_fetches: usize,

    /// Metadata request timeout in seconds
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Print the catalog as JSON instead of an indented tree
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    pub fn into_options(self) -> AdapterOptions {
        AdapterOptions {
            conn_str: self.conn_str,
            token: self.token,
            api_key: self.api_key,
            runtime: self.runtime,
            region: self.region,
            ws_url: self.ws_url,
            max_concurrent_fetches: self.max_concurrent_fetches,
            request_timeout_secs: self.timeout_secs,
        }
    }
}
