use common::{ApplicationCategory, ApplicationId, LogLevel, Protocol};
use ordered_float::OrderedFloat;
use std::collections::{BTreeMap, BTreeSet};
use timeseries::TimeSeries;

/// A connection-edge pattern bucket: a distinguishable family of log
/// lines within one (application, severity) pair.
#[derive(Debug, Clone)]
pub struct Pattern {
	pub multiline: bool,
	pub similar_pattern_hashes: BTreeSet<String>,
	pub sample: String,
	/// Canonical word-set string form used as the `words` label value.
	pub pattern: String,
	pub messages: TimeSeries,
}

/// Per-severity log volume for one application: either a flat
/// `messages` series (no patterns recognized yet) or a breakdown into
/// [`Pattern`]s.
#[derive(Debug, Clone)]
pub struct LogMessages {
	pub messages: TimeSeries,
	pub patterns: Vec<Pattern>,
}

/// An instance-to-application edge. `remote_application` resolves to
/// `None` when the destination hasn't been associated with a known
/// application yet — rules must skip such upstreams (spec invariant 5).
#[derive(Debug, Clone)]
pub struct Connection {
	pub remote_application: Option<ApplicationId>,
	pub successful_connections: TimeSeries,
	pub failed_connections: TimeSeries,
	pub active: TimeSeries,
	pub connection_time: TimeSeries,
	pub bytes_sent: TimeSeries,
	pub bytes_received: TimeSeries,
	pub retransmissions: TimeSeries,
	pub rtt: TimeSeries,
	pub requests_count: BTreeMap<Protocol, BTreeMap<String, TimeSeries>>,
	pub requests_latency: BTreeMap<Protocol, TimeSeries>,
	pub requests_histogram: BTreeMap<Protocol, BTreeMap<OrderedFloat<f32>, TimeSeries>>,
}

impl Connection {
	pub fn remote_application(&self) -> Option<&ApplicationId> {
		self.remote_application.as_ref()
	}
}

/// One running replica of an application; carries its outgoing edges.
#[derive(Debug, Clone, Default)]
pub struct Instance {
	pub upstreams: Vec<Connection>,
}

/// The three traffic classes the traffic rule reports, already
/// reduced to a single series each by the populator.
#[derive(Debug, Clone, Default)]
pub struct TrafficStats {
	pub internet_egress: Option<TimeSeries>,
	pub cross_az_egress: Option<TimeSeries>,
	pub cross_az_ingress: Option<TimeSeries>,
}

/// A logical workload and everything the derivation engine needs to
/// read about it.
#[derive(Debug, Clone)]
pub struct Application {
	pub id: ApplicationId,
	pub category: ApplicationCategory,
	pub instances: Vec<Instance>,
	pub log_messages: BTreeMap<LogLevel, LogMessages>,
	pub traffic_stats: TrafficStats,
	pub annotations: BTreeMap<String, String>,
}

impl Application {
	pub fn get_annotation(&self, key: &str) -> Option<&str> {
		self.annotations.get(key).map(String::as_str)
	}
}

/// Where a [`CheckConfigSLOAvailability`]/[`CheckConfigSLOLatency`]
/// value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckConfigSource {
	#[default]
	Unknown,
	KubernetesAnnotations,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckConfigSLOAvailability {
	pub source: CheckConfigSource,
	pub custom: bool,
	pub error: String,
	pub objective_percentage: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckConfigSLOLatency {
	pub source: CheckConfigSource,
	pub custom: bool,
	pub error: String,
	pub objective_percentage: f32,
	pub objective_bucket: f32,
}

/// Persistent per-application SLO check configuration, keyed by
/// [`ApplicationId`]. Owned by the World only for the duration of one
/// evaluation; the Annotation Reconciler is the sole writer.
#[derive(Debug, Clone, Default)]
pub struct CheckConfigs {
	availability: BTreeMap<ApplicationId, CheckConfigSLOAvailability>,
	latency: BTreeMap<ApplicationId, CheckConfigSLOLatency>,
}

impl CheckConfigs {
	pub fn get_availability(&self, app_id: &ApplicationId) -> CheckConfigSLOAvailability {
		self.availability.get(app_id).cloned().unwrap_or_default()
	}

	pub fn set_availability(&mut self, app_id: ApplicationId, cfg: CheckConfigSLOAvailability) {
		self.availability.insert(app_id, cfg);
	}

	/// Latency configs default to a category-dependent bucket: auxiliary
	/// (control-plane/monitoring) workloads default to a tighter
	/// threshold than ordinary applications.
	pub fn get_latency(
		&self,
		app_id: &ApplicationId,
		category: ApplicationCategory,
	) -> CheckConfigSLOLatency {
		self.latency.get(app_id).cloned().unwrap_or_else(|| {
			let objective_bucket = if category.is_auxiliary() { 0.1 } else { 1.0 };
			CheckConfigSLOLatency {
				objective_bucket,
				..Default::default()
			}
		})
	}

	pub fn set_latency(&mut self, app_id: ApplicationId, cfg: CheckConfigSLOLatency) {
		self.latency.insert(app_id, cfg);
	}
}

/// The decoded entity graph for a single evaluation window. Built once
/// by an external [`Populator`], read many times by the derivation
/// engine, then discarded.
#[derive(Debug, Clone, Default)]
pub struct World {
	pub applications: BTreeMap<ApplicationId, Application>,
	pub check_configs: CheckConfigs,
}

impl World {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn applications(&self) -> impl Iterator<Item = &Application> {
		self.applications.values()
	}
}

/// The entity-model construction contract. Implementations fold the
/// fetcher's [`crate::fetcher::FetchReport`] into a [`World`]; that
/// folding logic itself is out of scope here (it's a separate
/// subsystem) — this crate only needs the shape it must produce.
pub trait Populator: Send + Sync {
	fn populate(&self, fetched: &crate::fetcher::FetchReport, window: timeseries::Window) -> World;
}

/// A populator that always returns a fixed `World`, built ahead of
/// time by a test. Exists purely so engine/annotation tests can supply
/// hand-constructed scenarios without reimplementing the real
/// row-to-graph folding logic.
pub struct FixturePopulator {
	world: World,
}

impl FixturePopulator {
	pub fn new(world: World) -> Self {
		Self { world }
	}
}

impl Populator for FixturePopulator {
	fn populate(&self, _fetched: &crate::fetcher::FetchReport, _window: timeseries::Window) -> World {
		self.world.clone()
	}
}

/// The default production populator until the real row-to-graph
/// folding subsystem is wired in: always returns an empty `World`.
/// Evaluations still run end-to-end (fetch, derive, reconcile) with
/// this in place; they just never see any applications, since no rule
/// reads the fetched rows directly.
#[derive(Debug, Default)]
pub struct NullPopulator;

impl Populator for NullPopulator {
	fn populate(&self, _fetched: &crate::fetcher::FetchReport, window: timeseries::Window) -> World {
		let _ = window;
		World::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use common::ApplicationKind;
	use pretty_assertions::assert_eq;

	#[test]
	fn check_configs_default_to_empty_and_are_idempotent_to_compare() {
		let configs = CheckConfigs::default();
		let id = ApplicationId::new(ApplicationKind::Deployment, "prod", "checkout");
		let cfg = configs.get_availability(&id);
		assert_eq!(cfg, CheckConfigSLOAvailability::default());
	}

	#[test]
	fn fixture_populator_returns_the_same_world_every_call() {
		let mut world = World::new();
		let id = ApplicationId::new(ApplicationKind::Deployment, "prod", "checkout");
		world.applications.insert(
			id.clone(),
			Application {
				id,
				category: ApplicationCategory::Application,
				instances: vec![],
				log_messages: BTreeMap::new(),
				traffic_stats: TrafficStats::default(),
				annotations: BTreeMap::new(),
			},
		);
		let populator = FixturePopulator::new(world);
		let report = crate::fetcher::FetchReport::default();
		let w1 = populator.populate(&report, timeseries::Window::new(0, 30, 15));
		let w2 = populator.populate(&report, timeseries::Window::new(0, 30, 15));
		assert_eq!(w1.applications.len(), w2.applications.len());
	}

	#[test]
	fn null_populator_returns_an_empty_world() {
		let populator = NullPopulator;
		let report = crate::fetcher::FetchReport::default();
		let world = populator.populate(&report, timeseries::Window::new(0, 30, 15));
		assert!(world.applications.len() == 0);
	}
}
