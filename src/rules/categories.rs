use crate::errors::ReconcileError;
use crate::settings::{ProjectSettings, SettingsStore};
use crate::utils::log::ResultLogger;
use crate::world::World;

/// Ensures every application category observed in `world` has at least
/// a placeholder entry in the project's category settings, persisting
/// the change only when a new category was actually added. Emits no
/// metrics — its job is reconciling stored settings, not producing
/// series.
pub async fn rr_application_categories(
	store: &dyn SettingsStore,
	project_id: &str,
	settings: &mut ProjectSettings,
	world: &World,
) {
	let mut changed = false;
	for app in world.applications() {
		settings
			.application_category_settings
			.entry(app.category)
			.or_insert_with(|| {
				changed = true;
				None
			});
	}
	if !changed {
		return;
	}
	let _ = store
		.save_project_settings(project_id, settings)
		.await
		.map_err(ReconcileError::from)
		.log_warn("failed to persist project settings");
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::settings::InMemorySettingsStore;
	use crate::world::Application;
	use common::{ApplicationCategory, ApplicationId, ApplicationKind};
	use pretty_assertions::assert_eq;
	use std::collections::BTreeMap;

	fn app(category: ApplicationCategory) -> Application {
		Application {
			id: ApplicationId::new(ApplicationKind::Deployment, "prod", "checkout"),
			category,
			instances: vec![],
			log_messages: BTreeMap::new(),
			traffic_stats: Default::default(),
			annotations: BTreeMap::new(),
		}
	}

	#[tokio::test]
	async fn new_category_triggers_a_save() {
		let store = InMemorySettingsStore::new();
		let mut settings = ProjectSettings::default();
		let mut world = World::new();
		let a = app(ApplicationCategory::Database);
		world.applications.insert(a.id.clone(), a);

		rr_application_categories(&store, "proj", &mut settings, &world).await;

		assert_eq!(store.project_settings_write_count().await, 1);
		assert!(settings
			.application_category_settings
			.contains_key(&ApplicationCategory::Database));
	}

	#[tokio::test]
	async fn an_already_known_category_does_not_trigger_a_save() {
		let store = InMemorySettingsStore::new();
		let mut settings = ProjectSettings::default();
		settings
			.application_category_settings
			.insert(ApplicationCategory::Database, None);
		let mut world = World::new();
		let a = app(ApplicationCategory::Database);
		world.applications.insert(a.id.clone(), a);

		rr_application_categories(&store, "proj", &mut settings, &world).await;

		assert_eq!(store.project_settings_write_count().await, 0);
	}
}
