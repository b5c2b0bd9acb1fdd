//! The derivation engine: a name-addressed table of pure recording
//! rules that turn a [`crate::world::World`] into output series, plus
//! a sequential reconciliation pass for the two rules that persist
//! settings instead of emitting metrics.

pub mod categories;
pub mod l7;
pub mod log_messages;
pub mod parse;
pub mod slo;
pub mod tcp;
pub mod traffic;

use crate::metric_values::MetricValues;
use crate::settings::{ProjectSettings, SettingsStore};
use crate::world::World;

pub use slo::{ANNOTATION_SLO_AVAILABILITY_OBJECTIVE, ANNOTATION_SLO_LATENCY_OBJECTIVE, ANNOTATION_SLO_LATENCY_THRESHOLD};

type ComputeRule = fn(&World) -> Vec<MetricValues>;

/// The metric-emitting rules, in the order they're evaluated. Order
/// only matters for the stability of log output and metrics; no rule
/// depends on another's result, since all of them read the same
/// `World` and never mutate it.
pub fn compute_rules() -> Vec<(&'static str, ComputeRule)> {
	vec![
		("rr_application_log_messages", log_messages::rr_application_log_messages),
		("rr_connection_tcp_successful", tcp::rr_connection_tcp_successful),
		("rr_connection_tcp_active", tcp::rr_connection_tcp_active),
		("rr_connection_tcp_failed", tcp::rr_connection_tcp_failed),
		("rr_connection_tcp_connection_time", tcp::rr_connection_tcp_connection_time),
		("rr_connection_tcp_bytes_sent", tcp::rr_connection_tcp_bytes_sent),
		("rr_connection_tcp_bytes_received", tcp::rr_connection_tcp_bytes_received),
		("rr_connection_tcp_retransmissions", tcp::rr_connection_tcp_retransmissions),
		("rr_connection_net_latency", tcp::rr_connection_net_latency),
		("rr_connection_l7_requests", l7::rr_connection_l7_requests),
		("rr_connection_l7_latency", l7::rr_connection_l7_latency),
		("rr_application_l7_histogram", l7::rr_application_l7_histogram),
		("rr_application_traffic", traffic::rr_application_traffic),
	]
}

/// Runs every compute rule against `world` and flattens the result.
/// Rules never observe each other's output; this is purely a
/// convenience for callers that don't care which rule produced which
/// row.
pub fn run_compute_rules(world: &World) -> Vec<(&'static str, Vec<MetricValues>)> {
	compute_rules()
		.into_iter()
		.map(|(name, f)| (name, f(world)))
		.collect()
}

/// Runs the two settings-reconciling rules (`rr_application_categories`
/// and the per-application SLO annotation reconciliation) in sequence.
/// Unlike the compute rules these emit no metrics; they write through
/// `store` when, and only when, the reconciled value actually changed.
pub async fn reconcile_project(
	store: &dyn SettingsStore,
	project_id: &str,
	settings: &mut ProjectSettings,
	world: &World,
) {
	categories::rr_application_categories(store, project_id, settings, world).await;
	for app in world.applications() {
		slo::reconcile_availability(store, project_id, app, &world.check_configs).await;
		slo::reconcile_latency(store, project_id, app, &world.check_configs).await;
	}
}
