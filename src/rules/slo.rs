use crate::errors::ReconcileError;
use crate::rules::parse::{parse_objective, parse_threshold};
use crate::settings::{CheckConfig, CheckId, SettingsStore};
use crate::utils::log::ResultLogger;
use crate::world::{Application, CheckConfigSLOAvailability, CheckConfigSLOLatency, CheckConfigs, CheckConfigSource};

pub const ANNOTATION_SLO_AVAILABILITY_OBJECTIVE: &str = "coroot.com/slo-availability-objective";
pub const ANNOTATION_SLO_LATENCY_OBJECTIVE: &str = "coroot.com/slo-latency-objective";
pub const ANNOTATION_SLO_LATENCY_THRESHOLD: &str = "coroot.com/slo-latency-threshold";

/// Reconciles the availability SLO annotation into a persisted check
/// config. A no-op when the annotation is absent. Writes are
/// idempotent: a recomputed config equal to what's already stored is
/// never saved again.
pub async fn reconcile_availability(
	store: &dyn SettingsStore,
	project_id: &str,
	app: &Application,
	check_configs: &CheckConfigs,
) {
	let Some(objective_str) = app.get_annotation(ANNOTATION_SLO_AVAILABILITY_OBJECTIVE) else {
		return;
	};
	let saved = check_configs.get_availability(&app.id);
	let mut cfg = CheckConfigSLOAvailability {
		source: CheckConfigSource::KubernetesAnnotations,
		custom: false,
		error: String::new(),
		objective_percentage: saved.objective_percentage,
	};
	match parse_objective(objective_str) {
		Ok(v) => cfg.objective_percentage = v,
		Err(_) => {
			cfg.error = format!(
				"Invalid annotation '{}': invalid value",
				ANNOTATION_SLO_AVAILABILITY_OBJECTIVE
			);
			cfg.objective_percentage = 0.0;
		}
	}
	if cfg == saved {
		return;
	}
	let _ = store
		.save_check_config(project_id, &app.id, CheckId::SloAvailability, vec![CheckConfig::Availability(cfg)])
		.await
		.map_err(ReconcileError::from)
		.log_warn("failed to persist availability SLO check config");
}

/// Reconciles the latency SLO objective/threshold annotation pair. A
/// no-op when neither annotation is present. An invalid objective and
/// an invalid threshold are independent failures, but either one
/// forces the emitted objective percentage to zero (an SLO can't be
/// half-configured).
pub async fn reconcile_latency(
	store: &dyn SettingsStore,
	project_id: &str,
	app: &Application,
	check_configs: &CheckConfigs,
) {
	let objective_str = app.get_annotation(ANNOTATION_SLO_LATENCY_OBJECTIVE);
	let threshold_str = app.get_annotation(ANNOTATION_SLO_LATENCY_THRESHOLD);
	if objective_str.is_none() && threshold_str.is_none() {
		return;
	}

	let saved = check_configs.get_latency(&app.id, app.category);
	let mut objective = saved.objective_percentage;
	let mut threshold = saved.objective_bucket;
	let mut error = String::new();

	if let Some(s) = objective_str {
		match parse_objective(s) {
			Ok(v) => objective = v,
			Err(_) => {
				error = format!("Invalid annotation '{}': invalid value", ANNOTATION_SLO_LATENCY_OBJECTIVE);
			}
		}
	}
	if objective > 0.0 {
		if let Some(s) = threshold_str {
			match parse_threshold(s) {
				Ok(v) => threshold = v,
				Err(_) => {
					if error.is_empty() {
						error = format!("Invalid annotation '{}': invalid value", ANNOTATION_SLO_LATENCY_THRESHOLD);
					}
				}
			}
		}
	}

	let mut cfg = CheckConfigSLOLatency {
		source: CheckConfigSource::KubernetesAnnotations,
		custom: false,
		error: error.clone(),
		objective_percentage: objective,
		objective_bucket: threshold,
	};
	if !error.is_empty() {
		cfg.objective_percentage = 0.0;
	}

	if cfg == saved {
		return;
	}
	let _ = store
		.save_check_config(project_id, &app.id, CheckId::SloLatency, vec![CheckConfig::Latency(cfg)])
		.await
		.map_err(ReconcileError::from)
		.log_warn("failed to persist latency SLO check config");
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::settings::InMemorySettingsStore;
	use common::{ApplicationCategory, ApplicationId, ApplicationKind};
	use pretty_assertions::assert_eq;
	use std::collections::BTreeMap;

	fn app_with_annotations(annotations: &[(&str, &str)]) -> Application {
		Application {
			id: ApplicationId::new(ApplicationKind::Deployment, "prod", "checkout"),
			category: ApplicationCategory::Application,
			instances: vec![],
			log_messages: BTreeMap::new(),
			traffic_stats: Default::default(),
			annotations: annotations.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
		}
	}

	#[tokio::test]
	async fn valid_availability_annotation_is_saved() {
		let store = InMemorySettingsStore::new();
		let app = app_with_annotations(&[(ANNOTATION_SLO_AVAILABILITY_OBJECTIVE, "99.9%")]);
		let check_configs = CheckConfigs::default();

		reconcile_availability(&store, "proj", &app, &check_configs).await;

		assert_eq!(store.check_config_write_count().await, 1);
		let (_, _, _, configs) = store.last_check_config_write().await.unwrap();
		match &configs[0] {
			CheckConfig::Availability(cfg) => {
				assert_eq!(cfg.objective_percentage, 99.9);
				assert!(cfg.error.is_empty());
			}
			_ => panic!("expected an availability config"),
		}
	}

	#[tokio::test]
	async fn absent_annotation_is_a_no_op() {
		let store = InMemorySettingsStore::new();
		let app = app_with_annotations(&[]);
		let check_configs = CheckConfigs::default();

		reconcile_availability(&store, "proj", &app, &check_configs).await;

		assert_eq!(store.check_config_write_count().await, 0);
	}

	#[tokio::test]
	async fn invalid_threshold_with_valid_objective_zeroes_the_percentage_and_reports_the_offending_key() {
		let store = InMemorySettingsStore::new();
		let app = app_with_annotations(&[
			(ANNOTATION_SLO_LATENCY_OBJECTIVE, "99%"),
			(ANNOTATION_SLO_LATENCY_THRESHOLD, "not-a-duration"),
		]);
		let check_configs = CheckConfigs::default();

		reconcile_latency(&store, "proj", &app, &check_configs).await;

		assert_eq!(store.check_config_write_count().await, 1);
		let (_, _, _, configs) = store.last_check_config_write().await.unwrap();
		match &configs[0] {
			CheckConfig::Latency(cfg) => {
				assert_eq!(cfg.objective_percentage, 0.0);
				assert!(cfg.error.contains(ANNOTATION_SLO_LATENCY_THRESHOLD));
			}
			_ => panic!("expected a latency config"),
		}
	}

	#[tokio::test]
	async fn recomputing_the_same_config_does_not_save_again() {
		let store = InMemorySettingsStore::new();
		let app = app_with_annotations(&[(ANNOTATION_SLO_AVAILABILITY_OBJECTIVE, "99.9%")]);
		let mut check_configs = CheckConfigs::default();
		check_configs.set_availability(
			app.id.clone(),
			CheckConfigSLOAvailability {
				source: CheckConfigSource::KubernetesAnnotations,
				custom: false,
				error: String::new(),
				objective_percentage: 99.9,
			},
		);

		reconcile_availability(&store, "proj", &app, &check_configs).await;

		assert_eq!(store.check_config_write_count().await, 0);
	}
}
