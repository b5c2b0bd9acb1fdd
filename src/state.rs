use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::engine::Engine;
use crate::settings::ProjectSettings;

/// Everything the evaluation loop in `app::start` needs to hold onto
/// across ticks: the resolved config, the wired-up [`Engine`], and the
/// single project's mutable settings (spec §5: the settings store is
/// the only mutable shared resource, and the caller — this state —
/// is what serializes access to it).
#[derive(Clone)]
pub struct AppState {
	pub config: Arc<AppConfig>,
	pub engine: Engine,
	pub project_settings: Arc<Mutex<ProjectSettings>>,
}
