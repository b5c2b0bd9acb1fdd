use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::{env, time::Duration};
use tracing_subscriber::filter::Builder;
use validator::{Validate, ValidationError};

#[derive(Clone, Deserialize, Validate)]
pub struct AppConfig {
	#[validate(nested)]
	pub project: Project,
	#[validate(nested)]
	pub backend: Backend,
	#[serde(default = "default_fetcher")]
	#[validate(nested)]
	pub fetcher: Fetcher,
	#[validate(nested)]
	pub evaluation: Evaluation,
	#[serde(default)]
	#[validate(nested)]
	pub log: Log,
}

#[derive(Clone, Deserialize, Validate)]
pub struct Project {
	#[validate(length(min = 1))]
	pub id: String,
	pub name: String,
}

#[derive(Clone, Deserialize, Validate)]
pub struct Backend {
	#[validate(custom(function = "validate_backend_url"))]
	pub url: String,
	#[serde(with = "humantime_serde", default = "default_backend_timeout")]
	pub timeout: Duration,
}

fn validate_backend_url(url: &str) -> Result<(), ValidationError> {
	if url.starts_with("http://") || url.starts_with("https://") {
		Ok(())
	} else {
		Err(ValidationError::new("backend url must be http(s)"))
	}
}

const fn default_backend_timeout() -> Duration {
	Duration::from_secs(30)
}

#[derive(Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_cache_config"))]
pub struct Fetcher {
	#[serde(default = "default_fetcher_concurrency")]
	#[validate(range(min = 1))]
	pub concurrency: usize,
	#[serde(default = "default_cache_max_capacity")]
	pub cache_max_capacity: u64,
	#[serde(with = "humantime_serde", default = "default_cache_duration")]
	pub cache_time_to_live: Duration,
	#[serde(with = "humantime_serde", default = "default_cache_duration")]
	pub cache_time_to_idle: Duration,
}

fn validate_cache_config(cfg: &Fetcher) -> Result<(), ValidationError> {
	if cfg.cache_time_to_idle > cfg.cache_time_to_live {
		return Err(ValidationError::new(
			"cache_time_to_idle must be no greater than cache_time_to_live",
		));
	}
	Ok(())
}

fn default_fetcher() -> Fetcher {
	Fetcher {
		concurrency: default_fetcher_concurrency(),
		cache_max_capacity: default_cache_max_capacity(),
		cache_time_to_live: default_cache_duration(),
		cache_time_to_idle: default_cache_duration(),
	}
}

const fn default_fetcher_concurrency() -> usize {
	16
}

const fn default_cache_max_capacity() -> u64 {
	// 1GB worth of cached fetch responses
	1024 * 1024 * 1024
}

const fn default_cache_duration() -> Duration {
	Duration::from_secs(2 * 60)
}

#[derive(Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_evaluation_config"))]
pub struct Evaluation {
	#[serde(with = "humantime_serde")]
	pub window: Duration,
	#[serde(with = "humantime_serde")]
	pub step: Duration,
	#[serde(with = "humantime_serde")]
	pub interval: Duration,
}

fn validate_evaluation_config(cfg: &Evaluation) -> Result<(), ValidationError> {
	if cfg.step.is_zero() {
		return Err(ValidationError::new("step must be non-zero"));
	}
	if cfg.window < cfg.step {
		return Err(ValidationError::new("window must be at least one step"));
	}
	Ok(())
}

#[derive(Clone, Deserialize, Validate)]
pub struct Log {
	#[serde(default = "default_log_file")]
	pub file: String,
	// see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives
	#[serde(default = "default_log_filter")]
	#[validate(custom(function = "validate_log_filter_directives"))]
	pub filter_directives: String,
}

impl Default for Log {
	fn default() -> Self {
		Self {
			file: default_log_file(),
			filter_directives: default_log_filter(),
		}
	}
}

fn default_log_file() -> String {
	"info.log".to_string()
}

fn default_log_filter() -> String {
	"info".to_string()
}

fn validate_log_filter_directives(dirs: &str) -> Result<(), ValidationError> {
	Builder::default()
		.parse(dirs)
		.map_err(|_| ValidationError::new("invalid log filter directives"))
		.map(|_| ())
}

impl AppConfig {
	pub fn new() -> Result<Self, ConfigError> {
		let path = env::var("COROOT_CONSTRUCTOR_CONFIG").unwrap_or("config.yaml".to_string());
		Config::builder()
			.add_source(File::with_name(&path))
			.build()?
			.try_deserialize()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn decodes_a_whole_config_file() -> anyhow::Result<()> {
		let cfg: AppConfig = Config::builder()
			.add_source(File::with_name("./testdata/config/config.yaml"))
			.build()?
			.try_deserialize()?;
		assert_eq!(cfg.project.id, "proj-1");
		assert_eq!(cfg.backend.url, "http://prometheus:9090");
		assert_eq!(cfg.fetcher.concurrency, 16);
		assert_eq!(cfg.evaluation.window, Duration::from_secs(300));
		Ok(())
	}

	#[test]
	fn applies_cache_defaults_when_fetcher_is_omitted() -> anyhow::Result<()> {
		let cfg: AppConfig = Config::builder()
			.add_source(File::with_name("./testdata/config/minimal.yaml"))
			.build()?
			.try_deserialize()?;
		assert_eq!(cfg.fetcher.cache_max_capacity, default_cache_max_capacity());
		assert_eq!(cfg.fetcher.cache_time_to_live, default_cache_duration());
		Ok(())
	}

	#[test]
	fn whole_file_passes_validation() -> anyhow::Result<()> {
		let cfg: AppConfig = Config::builder()
			.add_source(File::with_name("./testdata/config/config.yaml"))
			.build()?
			.try_deserialize()?;
		cfg.validate()?;
		Ok(())
	}

	#[test]
	fn backend_url_must_be_http() {
		let cfg = Backend {
			url: "prometheus:9090".to_string(),
			timeout: default_backend_timeout(),
		};
		assert!(cfg.validate().is_err());
	}

	#[test]
	fn evaluation_window_must_be_at_least_one_step() {
		let cfg = Evaluation {
			window: Duration::from_secs(10),
			step: Duration::from_secs(15),
			interval: Duration::from_secs(60),
		};
		assert!(cfg.validate().is_err());
	}

	#[test]
	fn fetcher_cache_idle_must_not_exceed_live() {
		let cfg = Fetcher {
			concurrency: 4,
			cache_max_capacity: default_cache_max_capacity(),
			cache_time_to_live: Duration::from_secs(60),
			cache_time_to_idle: Duration::from_secs(120),
		};
		assert!(cfg.validate().is_err());
	}
}
