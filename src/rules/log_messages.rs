use common::Labels;
use timeseries::nan_sum;

use crate::metric_values::MetricValues;
use crate::world::World;

/// Emits `{application, level}` for a flat (unpatterned) log volume
/// series, or one `{application, level, multiline, similar, sample,
/// words}` row per recognized pattern — whichever the populator
/// produced for that severity. A series with zero total messages over
/// the whole window is dropped rather than emitted as an all-zero row.
pub fn rr_application_log_messages(world: &World) -> Vec<MetricValues> {
	let mut res = Vec::new();
	for app in world.applications() {
		for (level, log) in &app.log_messages {
			if log.patterns.is_empty() {
				if log.messages.reduce(nan_sum) > 0.0 {
					let mut labels = Labels::new();
					labels.insert("application", app.id.to_string());
					labels.insert("level", String::from(*level));
					res.push(MetricValues::new(labels, log.messages.clone()));
				}
				continue;
			}
			for pattern in &log.patterns {
				if pattern.messages.reduce(nan_sum) <= 0.0 {
					continue;
				}
				let mut labels = Labels::new();
				labels.insert("application", app.id.to_string());
				labels.insert("level", String::from(*level));
				labels.insert("multiline", pattern.multiline.to_string());
				labels.insert(
					"similar",
					pattern
						.similar_pattern_hashes
						.iter()
						.cloned()
						.collect::<Vec<_>>()
						.join(" "),
				);
				labels.insert("sample", pattern.sample.clone());
				labels.insert("words", pattern.pattern.clone());
				res.push(MetricValues::new(labels, pattern.messages.clone()));
			}
		}
	}
	res
}
