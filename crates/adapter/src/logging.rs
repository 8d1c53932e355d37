// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Adapter logging
//!
//! The host owns the terminal, so adapter logs only go to a file, and only
//! when one is named in the environment:
//!
//! - `WHEROBOTS_HARLEQUIN_ADAPTER_LOG`: path of the log file (appended to)
//! - `WHEROBOTS_HARLEQUIN_ADAPTER_DEBUG=1`: log at debug level instead of info

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::error::{AdapterError, AdapterResult};

pub const LOG_FILE_ENV: &str = "WHEROBOTS_HARLEQUIN_ADAPTER_LOG";
pub const LOG_DEBUG_ENV: &str = "WHEROBOTS_HARLEQUIN_ADAPTER_DEBUG";

/// Logging settings read from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub file: Option<PathBuf>,
    pub debug: bool,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(LOG_FILE_ENV).ok().as_deref(),
            std::env::var(LOG_DEBUG_ENV).ok().as_deref(),
        )
    }

    /// Build settings from raw variable values
    pub fn from_vars(file: Option<&str>, debug: Option<&str>) -> Self {
        Self {
            file: file.filter(|f| !f.is_empty()).map(PathBuf::from),
            debug: debug == Some("1"),
        }
    }

    pub fn level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

/// Install file logging if the environment asks for it
///
/// Returns `false` when no log file is configured.
pub fn init_logging() -> AdapterResult<bool> {
    init_with(&LogSettings::from_env())
}

/// Install file logging with explicit settings
///
/// # Errors
///
/// Returns `AdapterError::Logging` if the file cannot be opened or a global
/// subscriber is already set.
pub fn init_with(settings: &LogSettings) -> AdapterResult<bool> {
    let Some(path) = &settings.file else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AdapterError::Logging(format!("{}: {}", path.display(), e)))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(settings.level()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AdapterError::Logging(e.to_string()))?;

    Ok(true)
}
