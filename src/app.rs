use std::fs::OpenOptions;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

use crate::config::AppConfig;
use crate::engine::Engine;
use crate::errors::AppError;
use crate::fetcher::{CachingBackend, PrometheusBackend};
use crate::metrics;
use crate::settings::{InMemorySettingsStore, ProjectSettings};
use crate::state::AppState;
use crate::world::NullPopulator;
use timeseries::Window;

/// Boots the engine and runs its evaluation loop until cancelled
/// (ctrl-c). Each tick fetches the whole catalogue for the configured
/// project, runs every recording rule, and reconciles the project's
/// category/SLO settings — see [`crate::engine::Engine::evaluate`].
pub async fn start() -> Result<(), AppError> {
	let cfg = AppConfig::new()?;
	cfg.validate()?;

	init_tracing_subscriber(cfg.log.file.clone(), cfg.log.filter_directives.as_str());

	let instrumentations = metrics::setup_metrcis();

	let backend = PrometheusBackend::new(cfg.backend.url.clone(), cfg.backend.timeout).map_err(AppError::Backend)?;
	let backend = CachingBackend::new(backend, cfg.fetcher.cache_max_capacity, cfg.fetcher.cache_time_to_live);

	let engine = Engine {
		backend: Arc::new(backend),
		populator: Arc::new(NullPopulator),
		store: Arc::new(InMemorySettingsStore::new()),
		metrics: Arc::new(instrumentations),
		catalogue: Arc::new(catalogue::queries()),
		concurrency: cfg.fetcher.concurrency,
	};

	let state = AppState {
		config: Arc::new(cfg.clone()),
		engine,
		project_settings: Arc::new(Mutex::new(ProjectSettings::default())),
	};

	let cancel = CancellationToken::new();
	tokio::spawn(shutdown_signal(cancel.clone()));

	run_evaluation_loop(state, cancel).await;
	Ok(())
}

/// Evaluates on `cfg.evaluation.interval`, aligning each window's `to`
/// to the nearest completed step so re-runs stay deterministic
/// regardless of tick jitter. Exits as soon as `cancel` fires, without
/// starting a new evaluation — an in-flight one still runs to
/// completion or cancellation (spec §5: no partial settings writes).
async fn run_evaluation_loop(state: AppState, cancel: CancellationToken) {
	let mut ticker = tokio::time::interval(state.config.evaluation.interval);
	loop {
		tokio::select! {
			_ = cancel.cancelled() => {
				info!("evaluation loop shutting down");
				return;
			}
			_ = ticker.tick() => {
				let window = current_window(&state.config);
				let mut settings = state.project_settings.lock().await;
				if let Err(e) = state
					.engine
					.evaluate(&state.config.project.id, &mut settings, window, &cancel)
					.await
				{
					warn!(error = %e, "evaluation aborted");
				}
			}
		}
	}
}

fn current_window(cfg: &AppConfig) -> Window {
	let step = cfg.evaluation.step.as_secs().max(1) as i64;
	let now = std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.unwrap_or_default()
		.as_secs() as i64;
	let to = (now / step) * step;
	let from = to - cfg.evaluation.window.as_secs() as i64;
	Window::new(from, to, step)
}

async fn shutdown_signal(cancel: CancellationToken) {
	if tokio::signal::ctrl_c().await.is_ok() {
		cancel.cancel();
	}
}

fn init_tracing_subscriber(file: String, filter_directives: &str) {
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::new(filter_directives))
		.with(tracing_subscriber::fmt::layer().json().with_writer(move || get_writer(file.clone())))
		.init();
}

fn get_writer(file: String) -> Box<dyn std::io::Write> {
	if file.eq_ignore_ascii_case("stdout") {
		Box::new(std::io::stdout())
	} else if file.eq_ignore_ascii_case("stderr") {
		Box::new(std::io::stderr())
	} else {
		Box::new(OpenOptions::new().append(true).create(true).open(file).unwrap())
	}
}
