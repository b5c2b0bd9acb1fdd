//! Orchestrates one full evaluation: fetch every catalogue query,
//! fold the results into a [`World`], run the derivation engine, and
//! reconcile the two settings-writing rules. This is the "evaluation
//! loop" `app::start` drives on a fixed interval per project.

use std::sync::Arc;
use std::time::Instant;

use catalogue::Query;
use timeseries::Window;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::fetcher::{fetch_all, FetchError, FetchReport, MetricBackend, QueryOutcome};
use crate::metric_values::MetricValues;
use crate::metrics::{FetchOutcomeTag, Instrumentations};
use crate::rules::{compute_rules, reconcile_project};
use crate::settings::{ProjectSettings, SettingsStore};
use crate::world::{Populator, World};

/// Everything one evaluation needs to talk to the outside world.
/// Cloning an `Engine` is cheap (every field is an `Arc`), so the same
/// instance can be shared across concurrently-evaluated projects —
/// though the caller must still serialize evaluations *within* one
/// project, per spec §5.
#[derive(Clone)]
pub struct Engine {
	pub backend: Arc<dyn MetricBackend>,
	pub populator: Arc<dyn Populator>,
	pub store: Arc<dyn SettingsStore>,
	pub metrics: Arc<Instrumentations>,
	pub catalogue: Arc<Vec<Query>>,
	pub concurrency: usize,
}

/// Everything one evaluation produced, useful for callers that want
/// to inspect what happened (e.g. the demo binary's log line, or a
/// test asserting on a specific rule's output).
pub struct EvaluationOutput {
	pub fetch_report: FetchReport,
	pub world: World,
	pub rule_outputs: Vec<(&'static str, Vec<MetricValues>)>,
}

impl Engine {
	/// Runs one evaluation over `window` for `project_id`, mutating
	/// `settings` in place (and persisting it through `self.store`
	/// when a rule actually changes it). Only fails on cancellation;
	/// every other failure mode is local to a query or a rule and is
	/// recorded in the returned [`FetchReport`] or logged, per spec §7.
	pub async fn evaluate(
		&self,
		project_id: &str,
		settings: &mut ProjectSettings,
		window: Window,
		cancel: &CancellationToken,
	) -> Result<EvaluationOutput, FetchError> {
		let started = Instant::now();
		let report = fetch_all(self.backend.as_ref(), &self.catalogue, window, self.concurrency, cancel).await?;

		for (name, outcome) in &report.outcomes {
			let tag = match outcome {
				QueryOutcome::Ok(_) => FetchOutcomeTag::Ok,
				QueryOutcome::SchemaViolation { .. } => FetchOutcomeTag::SchemaViolation,
				QueryOutcome::Transient(_) => FetchOutcomeTag::Transient,
			};
			self.metrics.record_fetch_outcome(name, tag);
		}

		let world = self.populator.populate(&report, window);

		let mut rule_outputs = Vec::with_capacity(compute_rules().len());
		for (name, f) in compute_rules() {
			let rule_started = Instant::now();
			let values = f(&world);
			self.metrics
				.observe_rule_duration(name, rule_started.elapsed().as_secs_f64());
			rule_outputs.push((name, values));
		}

		reconcile_project(self.store.as_ref(), project_id, settings, &world).await;

		self.metrics
			.observe_evaluation_duration(project_id, started.elapsed().as_secs_f64());
		info!(
			project_id,
			queries_ok = report.successful_query_count(),
			applications = world.applications.len(),
			"evaluation complete"
		);

		Ok(EvaluationOutput { fetch_report: report, world, rule_outputs })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fetcher::StaticBackend;
	use crate::settings::InMemorySettingsStore;
	use crate::world::NullPopulator;
	use pretty_assertions::assert_eq;

	fn window() -> Window {
		Window::new(0, 30, 15)
	}

	fn engine() -> Engine {
		Engine {
			backend: Arc::new(StaticBackend::new()),
			populator: Arc::new(NullPopulator),
			store: Arc::new(InMemorySettingsStore::new()),
			metrics: Arc::new(crate::metrics::setup_metrcis()),
			catalogue: Arc::new(catalogue::queries()),
			concurrency: 4,
		}
	}

	/// Quantified invariant 4: applying a rule to an empty World yields
	/// an empty result, for every rule.
	#[tokio::test]
	async fn an_empty_world_yields_no_rule_output() {
		let engine = engine();
		let mut settings = ProjectSettings::default();
		let out = engine
			.evaluate("proj", &mut settings, window(), &CancellationToken::new())
			.await
			.unwrap();
		assert_eq!(out.world.applications.len(), 0);
		for (name, values) in &out.rule_outputs {
			assert!(values.is_empty(), "rule {name} produced output against an empty world");
		}
	}

	#[tokio::test]
	async fn cancellation_aborts_the_evaluation() {
		let engine = engine();
		let mut settings = ProjectSettings::default();
		let cancel = CancellationToken::new();
		cancel.cancel();
		let result = engine.evaluate("proj", &mut settings, window(), &cancel).await;
		assert!(matches!(result, Err(FetchError::Cancelled)));
	}
}
