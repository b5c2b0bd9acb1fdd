use std::collections::BTreeMap;

use common::{ApplicationCategory, ApplicationId, Labels, Protocol};
use timeseries::{nan_sum, Aggregate, Histogram};

use crate::metric_values::MetricValues;
use crate::world::World;

fn category_of(world: &World, id: &ApplicationId) -> ApplicationCategory {
	world
		.applications
		.get(id)
		.map(|a| a.category)
		.unwrap_or(ApplicationCategory::Application)
}

/// Emits `{app, dest, proto, status}` request-count series, summed
/// across every instance of `app` that talks to `dest`.
pub fn rr_connection_l7_requests(world: &World) -> Vec<MetricValues> {
	let mut res = Vec::new();
	for app in world.applications() {
		let mut by_key: BTreeMap<(ApplicationId, Protocol, String), Aggregate> = BTreeMap::new();
		for instance in &app.instances {
			for conn in &instance.upstreams {
				let Some(dest) = conn.remote_application() else {
					continue;
				};
				for (proto, by_status) in &conn.requests_count {
					for (status, ts) in by_status {
						let key = (dest.clone(), *proto, status.clone());
						by_key
							.entry(key)
							.or_insert_with(|| Aggregate::new(nan_sum))
							.add(ts);
					}
				}
			}
		}
		for ((dest, proto, status), agg) in by_key {
			let Some(ts) = agg.get() else { continue };
			if ts.is_empty() {
				continue;
			}
			let mut labels = Labels::new();
			labels.insert("app", app.id.to_string());
			labels.insert("dest", dest.to_string());
			labels.insert("proto", proto.to_string());
			labels.insert("status", status);
			res.push(MetricValues::new(labels, ts));
		}
	}
	res
}

/// Emits `{app, dest, proto}` latency series, summed across every
/// instance of `app` that talks to `dest` over `proto`.
pub fn rr_connection_l7_latency(world: &World) -> Vec<MetricValues> {
	let mut res = Vec::new();
	for app in world.applications() {
		let mut by_key: BTreeMap<(ApplicationId, Protocol), Aggregate> = BTreeMap::new();
		for instance in &app.instances {
			for conn in &instance.upstreams {
				let Some(dest) = conn.remote_application() else {
					continue;
				};
				for (proto, ts) in &conn.requests_latency {
					by_key
						.entry((dest.clone(), *proto))
						.or_insert_with(|| Aggregate::new(nan_sum))
						.add(ts);
				}
			}
		}
		for ((dest, proto), agg) in by_key {
			let Some(ts) = agg.get() else { continue };
			if ts.is_empty() {
				continue;
			}
			let mut labels = Labels::new();
			labels.insert("app", app.id.to_string());
			labels.insert("dest", dest.to_string());
			labels.insert("proto", proto.to_string());
			res.push(MetricValues::new(labels, ts));
		}
	}
	res
}

/// Emits `{app, le}` histogram bucket series, where `app` carries the
/// *destination* application's id. Unlike the other L7 rules this one
/// is not grouped per source application: every upstream targeting the
/// same destination, regardless of protocol, contributes to one merged
/// histogram keyed only by destination and bucket boundary. Upstreams
/// from an auxiliary application (the monitoring stack itself) into a
/// non-auxiliary destination are skipped, so sidecar-to-app traffic
/// doesn't inflate the destination's own latency distribution.
pub fn rr_application_l7_histogram(world: &World) -> Vec<MetricValues> {
	let mut by_dest: BTreeMap<ApplicationId, Histogram> = BTreeMap::new();
	for app in world.applications() {
		for instance in &app.instances {
			for conn in &instance.upstreams {
				let Some(dest) = conn.remote_application() else {
					continue;
				};
				if !category_of(world, dest).is_auxiliary() && app.category.is_auxiliary() {
					continue;
				}
				for buckets in conn.requests_histogram.values() {
					let mut conn_hist = Histogram::new();
					for (le, ts) in buckets {
						conn_hist.insert(le.0, ts.clone());
					}
					let merged = match by_dest.get(dest) {
						Some(existing) => existing.merge(&conn_hist),
						None => conn_hist,
					};
					by_dest.insert(dest.clone(), merged);
				}
			}
		}
	}
	let mut res = Vec::new();
	for (dest, hist) in by_dest {
		for (le, ts) in hist.buckets() {
			if ts.is_empty() {
				continue;
			}
			let mut labels = Labels::new();
			labels.insert("app", dest.to_string());
			labels.insert("le", format!("{le:.6}"));
			res.push(MetricValues::new(labels, ts.clone()));
		}
	}
	res
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::world::{Application, Connection, Instance};
	use common::ApplicationKind;
	use ordered_float::OrderedFloat;
	use pretty_assertions::assert_eq;
	use std::collections::BTreeMap as Map;
	use timeseries::{TimeSeries, Window};

	fn window() -> Window {
		Window::new(0, 15, 15)
	}

	fn blank_conn(dest: ApplicationId) -> Connection {
		Connection {
			remote_application: Some(dest),
			successful_connections: TimeSeries::empty(window()),
			failed_connections: TimeSeries::empty(window()),
			active: TimeSeries::empty(window()),
			connection_time: TimeSeries::empty(window()),
			bytes_sent: TimeSeries::empty(window()),
			bytes_received: TimeSeries::empty(window()),
			retransmissions: TimeSeries::empty(window()),
			rtt: TimeSeries::empty(window()),
			requests_count: Map::new(),
			requests_latency: Map::new(),
			requests_histogram: Map::new(),
		}
	}

	#[test]
	fn requests_are_grouped_by_destination_protocol_and_status() {
		let dest_id = ApplicationId::new(ApplicationKind::Deployment, "prod", "api");
		let mut conn = blank_conn(dest_id.clone());
		let mut by_status = Map::new();
		by_status.insert("200".to_string(), TimeSeries::new(window(), vec![5.0]));
		conn.requests_count.insert(Protocol::Http, by_status);

		let app_id = ApplicationId::new(ApplicationKind::Deployment, "prod", "web");
		let app = Application {
			id: app_id.clone(),
			category: ApplicationCategory::Application,
			instances: vec![Instance { upstreams: vec![conn] }],
			log_messages: Map::new(),
			traffic_stats: Default::default(),
			annotations: Map::new(),
		};
		let mut world = World::new();
		world.applications.insert(app_id, app);

		let out = rr_connection_l7_requests(&world);
		assert_eq!(out.len(), 1);
		assert_eq!(out[0].labels.get("status"), Some("200"));
		assert_eq!(out[0].values.points(), &[5.0]);
	}

	#[test]
	fn histogram_rule_merges_across_protocols_by_destination_and_bucket() {
		let dest_id = ApplicationId::new(ApplicationKind::Deployment, "prod", "api");
		world_with_two_histogram_upstreams(dest_id);
	}

	fn world_with_two_histogram_upstreams(dest_id: ApplicationId) {
		let mut conn_a = blank_conn(dest_id.clone());
		let mut buckets_a = Map::new();
		buckets_a.insert(OrderedFloat(0.1), TimeSeries::new(window(), vec![3.0]));
		conn_a.requests_histogram.insert(Protocol::Http, buckets_a);

		let mut conn_b = blank_conn(dest_id.clone());
		let mut buckets_b = Map::new();
		buckets_b.insert(OrderedFloat(0.1), TimeSeries::new(window(), vec![4.0]));
		conn_b.requests_histogram.insert(Protocol::Postgres, buckets_b);

		let app_id = ApplicationId::new(ApplicationKind::Deployment, "prod", "web");
		let app = Application {
			id: app_id.clone(),
			category: ApplicationCategory::Application,
			instances: vec![Instance { upstreams: vec![conn_a, conn_b] }],
			log_messages: Map::new(),
			traffic_stats: Default::default(),
			annotations: Map::new(),
		};
		let mut world = World::new();
		world.applications.insert(app_id, app);
		world.applications.insert(
			dest_id.clone(),
			Application {
				id: dest_id,
				category: ApplicationCategory::Database,
				instances: vec![],
				log_messages: Map::new(),
				traffic_stats: Default::default(),
				annotations: Map::new(),
			},
		);

		let out = rr_application_l7_histogram(&world);
		assert_eq!(out.len(), 1);
		assert_eq!(out[0].values.points(), &[7.0]);
	}

	#[test]
	fn auxiliary_source_to_non_auxiliary_destination_is_suppressed() {
		let dest_id = ApplicationId::new(ApplicationKind::Deployment, "prod", "api");
		let mut conn = blank_conn(dest_id.clone());
		let mut buckets = Map::new();
		buckets.insert(OrderedFloat(0.1), TimeSeries::new(window(), vec![3.0]));
		conn.requests_histogram.insert(Protocol::Http, buckets);

		let app_id = ApplicationId::new(ApplicationKind::Deployment, "prod", "node-exporter");
		let app = Application {
			id: app_id.clone(),
			category: ApplicationCategory::Monitoring,
			instances: vec![Instance { upstreams: vec![conn] }],
			log_messages: Map::new(),
			traffic_stats: Default::default(),
			annotations: Map::new(),
		};
		let mut world = World::new();
		world.applications.insert(app_id, app);
		world.applications.insert(
			dest_id.clone(),
			Application {
				id: dest_id,
				category: ApplicationCategory::Application,
				instances: vec![],
				log_messages: Map::new(),
				traffic_stats: Default::default(),
				annotations: Map::new(),
			},
		);

		assert!(rr_application_l7_histogram(&world).is_empty());
	}
}
