use common::Labels;

use crate::metric_values::MetricValues;
use crate::world::World;

/// Emits `{app, kind}` series for each of an application's three
/// traffic classes, when the populator reported any samples for it.
pub fn rr_application_traffic(world: &World) -> Vec<MetricValues> {
	let mut res = Vec::new();
	for app in world.applications() {
		let classes = [
			("internet_egress", &app.traffic_stats.internet_egress),
			("cross_az_egress", &app.traffic_stats.cross_az_egress),
			("cross_az_ingress", &app.traffic_stats.cross_az_ingress),
		];
		for (kind, series) in classes {
			let Some(ts) = series else { continue };
			if ts.is_empty() {
				continue;
			}
			let mut labels = Labels::new();
			labels.insert("app", app.id.to_string());
			labels.insert("kind", kind);
			res.push(MetricValues::new(labels, ts.clone()));
		}
	}
	res
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::world::{Application, TrafficStats};
	use common::{ApplicationCategory, ApplicationId, ApplicationKind};
	use pretty_assertions::assert_eq;
	use std::collections::BTreeMap;
	use timeseries::{TimeSeries, Window};

	#[test]
	fn only_populated_classes_are_emitted() {
		let window = Window::new(0, 15, 15);
		let app_id = ApplicationId::new(ApplicationKind::Deployment, "prod", "checkout");
		let app = Application {
			id: app_id.clone(),
			category: ApplicationCategory::Application,
			instances: vec![],
			log_messages: BTreeMap::new(),
			traffic_stats: TrafficStats {
				internet_egress: Some(TimeSeries::new(window, vec![1.0])),
				cross_az_egress: None,
				cross_az_ingress: Some(TimeSeries::empty(window)),
			},
			annotations: BTreeMap::new(),
		};
		let mut world = World::new();
		world.applications.insert(app_id, app);

		let out = rr_application_traffic(&world);
		assert_eq!(out.len(), 1);
		assert_eq!(out[0].labels.get("kind"), Some("internet_egress"));
	}
}
