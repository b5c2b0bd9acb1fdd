use common::{Labels, LabelsHash};
use timeseries::TimeSeries;

/// A single labelled output row: the engine's unit of currency, both
/// for what the fetcher reads off the backend and what derivation
/// rules emit.
#[derive(Debug, Clone)]
pub struct MetricValues {
	pub labels: Labels,
	pub labels_hash: LabelsHash,
	pub values: TimeSeries,
}

impl MetricValues {
	pub fn new(labels: Labels, values: TimeSeries) -> Self {
		let labels_hash = labels.hash();
		Self {
			labels,
			labels_hash,
			values,
		}
	}
}
