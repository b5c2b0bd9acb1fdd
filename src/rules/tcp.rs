use std::collections::BTreeMap;

use common::{ApplicationId, Labels};
use timeseries::{nan_sum, Aggregate, TimeSeries};

use crate::metric_values::MetricValues;
use crate::world::{Connection, World};

/// Groups every upstream connection of every application by destination
/// `ApplicationId` and sums the series `accessor` picks out of each
/// connection. This is the shared shape behind the eight TCP
/// connection-level recording rules: each just plugs in a different
/// field of [`Connection`].
pub fn agg_connections(world: &World, accessor: impl Fn(&Connection) -> &TimeSeries) -> Vec<MetricValues> {
	let mut res = Vec::new();
	for app in world.applications() {
		let mut by_dest: BTreeMap<ApplicationId, Aggregate> = BTreeMap::new();
		for instance in &app.instances {
			for conn in &instance.upstreams {
				let Some(dest) = conn.remote_application() else {
					continue;
				};
				by_dest
					.entry(dest.clone())
					.or_insert_with(|| Aggregate::new(nan_sum))
					.add(accessor(conn));
			}
		}
		for (dest, agg) in by_dest {
			if let Some(ts) = agg.get() {
				if !ts.is_empty() {
					let mut labels = Labels::new();
					labels.insert("app", app.id.to_string());
					labels.insert("dest", dest.to_string());
					res.push(MetricValues::new(labels, ts));
				}
			}
		}
	}
	res
}

pub fn rr_connection_tcp_successful(world: &World) -> Vec<MetricValues> {
	agg_connections(world, |c| &c.successful_connections)
}

pub fn rr_connection_tcp_active(world: &World) -> Vec<MetricValues> {
	agg_connections(world, |c| &c.active)
}

pub fn rr_connection_tcp_failed(world: &World) -> Vec<MetricValues> {
	agg_connections(world, |c| &c.failed_connections)
}

pub fn rr_connection_tcp_connection_time(world: &World) -> Vec<MetricValues> {
	agg_connections(world, |c| &c.connection_time)
}

pub fn rr_connection_tcp_bytes_sent(world: &World) -> Vec<MetricValues> {
	agg_connections(world, |c| &c.bytes_sent)
}

pub fn rr_connection_tcp_bytes_received(world: &World) -> Vec<MetricValues> {
	agg_connections(world, |c| &c.bytes_received)
}

pub fn rr_connection_tcp_retransmissions(world: &World) -> Vec<MetricValues> {
	agg_connections(world, |c| &c.retransmissions)
}

/// Coverage-weighted mean round-trip time: `Div(sum(Rtt), sum(Defined(Rtt)))`.
/// An upstream only contributes once its own `Rtt` series has at least
/// one sample — destinations with no RTT data at all never show up,
/// rather than showing up as an all-`NaN` average.
pub fn rr_connection_net_latency(world: &World) -> Vec<MetricValues> {
	let mut res = Vec::new();
	for app in world.applications() {
		let mut by_dest: BTreeMap<ApplicationId, (Aggregate, Aggregate)> = BTreeMap::new();
		for instance in &app.instances {
			for conn in &instance.upstreams {
				let Some(dest) = conn.remote_application() else {
					continue;
				};
				if conn.rtt.is_empty() {
					continue;
				}
				let entry = by_dest
					.entry(dest.clone())
					.or_insert_with(|| (Aggregate::new(nan_sum), Aggregate::new(nan_sum)));
				let coverage = conn.rtt.map(timeseries::defined);
				entry.0.add(&conn.rtt);
				entry.1.add(&coverage);
			}
		}
		for (dest, (sum, count)) in by_dest {
			let (Some(sum_ts), Some(count_ts)) = (sum.get(), count.get()) else {
				continue;
			};
			if sum_ts.is_empty() {
				continue;
			}
			let avg = timeseries::div(&sum_ts, &count_ts);
			let mut labels = Labels::new();
			labels.insert("app", app.id.to_string());
			labels.insert("dest", dest.to_string());
			labels.insert("agg", "avg");
			res.push(MetricValues::new(labels, avg));
		}
	}
	res
}
