use std::collections::BTreeMap;

use async_trait::async_trait;
use common::{ApplicationCategory, ApplicationId};
use tokio::sync::Mutex;

use crate::world::{CheckConfigSLOAvailability, CheckConfigSLOLatency};

/// The two checks the annotation reconciler owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckId {
	SloAvailability,
	SloLatency,
}

/// Per-category overrides a project can hold; `None` means "observed,
/// no override configured yet" — the categories rule's job is to make
/// sure every observed category has at least this placeholder entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationCategorySettings {
	pub custom_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectSettings {
	pub application_category_settings: BTreeMap<ApplicationCategory, Option<ApplicationCategorySettings>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckConfig {
	Availability(CheckConfigSLOAvailability),
	Latency(CheckConfigSLOLatency),
}

/// The persistence boundary the annotation reconciler writes through.
/// A real implementation durably stores project and per-application
/// check settings; constructing one is out of scope here.
#[async_trait]
pub trait SettingsStore: Send + Sync {
	async fn save_project_settings(&self, project_id: &str, settings: &ProjectSettings) -> anyhow::Result<()>;

	async fn save_check_config(
		&self,
		project_id: &str,
		app_id: &ApplicationId,
		check_id: CheckId,
		configs: Vec<CheckConfig>,
	) -> anyhow::Result<()>;
}

/// A `Mutex`-guarded in-memory store, for tests and for running the
/// engine without a real settings backend wired up. Also records every
/// write it receives, so tests can assert on idempotency (a rule that
/// recomputes the same value must not call through again).
#[derive(Default)]
pub struct InMemorySettingsStore {
	project_settings_writes: Mutex<Vec<(String, ProjectSettings)>>,
	check_config_writes: Mutex<Vec<(String, ApplicationId, CheckId, Vec<CheckConfig>)>>,
}

impl InMemorySettingsStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn project_settings_write_count(&self) -> usize {
		self.project_settings_writes.lock().await.len()
	}

	pub async fn check_config_write_count(&self) -> usize {
		self.check_config_writes.lock().await.len()
	}

	pub async fn last_check_config_write(&self) -> Option<(String, ApplicationId, CheckId, Vec<CheckConfig>)> {
		self.check_config_writes.lock().await.last().cloned()
	}
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
	async fn save_project_settings(&self, project_id: &str, settings: &ProjectSettings) -> anyhow::Result<()> {
		self.project_settings_writes
			.lock()
			.await
			.push((project_id.to_string(), settings.clone()));
		Ok(())
	}

	async fn save_check_config(
		&self,
		project_id: &str,
		app_id: &ApplicationId,
		check_id: CheckId,
		configs: Vec<CheckConfig>,
	) -> anyhow::Result<()> {
		self.check_config_writes
			.lock()
			.await
			.push((project_id.to_string(), app_id.clone(), check_id, configs));
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use common::ApplicationKind;
	use pretty_assertions::assert_eq;

	#[tokio::test]
	async fn in_memory_store_records_every_write() {
		let store = InMemorySettingsStore::new();
		let settings = ProjectSettings::default();
		store.save_project_settings("proj", &settings).await.unwrap();
		assert_eq!(store.project_settings_write_count().await, 1);

		let app_id = ApplicationId::new(ApplicationKind::Deployment, "prod", "checkout");
		store
			.save_check_config(
				"proj",
				&app_id,
				CheckId::SloAvailability,
				vec![CheckConfig::Availability(CheckConfigSLOAvailability::default())],
			)
			.await
			.unwrap();
		assert_eq!(store.check_config_write_count().await, 1);
	}
}
