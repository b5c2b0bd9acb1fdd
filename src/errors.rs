use thiserror::Error;

use crate::fetcher::FetchError;

/// Raised by the annotation reconciler when a settings-store write
/// fails. A rule that returns this skips the rest of its own body but
/// never aborts the evaluation: the caller logs it and moves on.
#[derive(Debug, Error)]
pub enum ReconcileError {
	#[error("settings store rejected the write: {0}")]
	Store(#[from] anyhow::Error),
}

/// Top-level bootstrap and evaluation-loop errors.
#[derive(Debug, Error)]
pub enum AppError {
	#[error("failed to load configuration: {0}")]
	Config(#[from] config::ConfigError),
	#[error("configuration failed validation: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("failed to build metric backend: {0}")]
	Backend(anyhow::Error),
	#[error(transparent)]
	Fetch(#[from] FetchError),
	#[error("failed to install the metrics exporter: {0}")]
	Metrics(#[from] prometheus::Error),
}
