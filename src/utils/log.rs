use std::fmt::Display;
use tracing::warn;

/// Logs an `Err` at `warn` level and passes it through unchanged —
/// the "logged and swallowed" pattern the derivation engine uses
/// around per-rule failures so one bad rule never aborts the rest of
/// the evaluation.
pub trait ResultLogger {
	fn log_warn(self, context: &str) -> Self;
}

impl<T, E: Display> ResultLogger for Result<T, E> {
	fn log_warn(self, context: &str) -> Self {
		match self {
			Ok(v) => Ok(v),
			Err(e) => {
				warn!(error = %e, context, "operation failed");
				Err(e)
			}
		}
	}
}
