use opentelemetry::{
	metrics::{Counter, Histogram, MeterProvider as _, Unit},
	KeyValue,
};
use opentelemetry_sdk::metrics::{self, SdkMeterProvider};
use prometheus::{Encoder, Registry, TextEncoder};

const METRIC_FETCH_TOTAL_NAME: &str = "metric_fetch_total";
const RECORDING_RULE_EVAL_DURATION_SECONDS: &str = "recording_rule_eval_duration_seconds";
const EVALUATION_DURATION_SECONDS: &str = "evaluation_duration_seconds";

/// Evaluation-loop counters and histograms, exported in Prometheus
/// text format. Shaped the same way the teacher's HTTP-request
/// instrumentation is (one counter + one histogram pair built off an
/// `opentelemetry_sdk::metrics::SdkMeterProvider`, gathered through a
/// `prometheus::Registry`), renamed to the recording-rule domain.
#[derive(Clone)]
pub struct Instrumentations {
	registry: Registry,
	_provider: SdkMeterProvider,
	pub metric_fetch_total: Counter<u64>,
	pub recording_rule_eval_duration: Histogram<f64>,
	pub evaluation_duration: Histogram<f64>,
}

/// One query's fetch outcome, as reported to `metric_fetch_total`.
#[derive(Clone, Copy, Debug)]
pub enum FetchOutcomeTag {
	Ok,
	SchemaViolation,
	Transient,
}

impl FetchOutcomeTag {
	fn as_str(self) -> &'static str {
		match self {
			FetchOutcomeTag::Ok => "ok",
			FetchOutcomeTag::SchemaViolation => "schema_violation",
			FetchOutcomeTag::Transient => "transient",
		}
	}
}

impl Instrumentations {
	pub fn record_fetch_outcome(&self, query: &str, outcome: FetchOutcomeTag) {
		self.metric_fetch_total.add(
			1,
			&[KeyValue::new("query", query.to_string()), KeyValue::new("outcome", outcome.as_str())],
		);
	}

	pub fn observe_rule_duration(&self, rule: &str, seconds: f64) {
		self.recording_rule_eval_duration
			.record(seconds, &[KeyValue::new("rule", rule.to_string())]);
	}

	pub fn observe_evaluation_duration(&self, project_id: &str, seconds: f64) {
		self.evaluation_duration
			.record(seconds, &[KeyValue::new("project_id", project_id.to_string())]);
	}
}

pub fn setup_metrcis() -> Instrumentations {
	let registry = Registry::new();
	let exporter = opentelemetry_prometheus::exporter()
		.with_registry(registry.clone())
		.build()
		.unwrap();
	let provider = SdkMeterProvider::builder()
		.with_reader(exporter)
		.with_view(
			metrics::new_view(
				metrics::Instrument::new().name("*_duration_*"),
				metrics::Stream::new().aggregation(metrics::Aggregation::ExplicitBucketHistogram {
					boundaries: vec![0.0, 0.1, 0.5, 1.0, 2.0, 3.0, 5.0, 8.0, 15.0, 30.0, 60.0, 120.0],
					record_min_max: true,
				}),
			)
			.unwrap(),
		)
		.build();
	let meter = provider.meter(env!("CARGO_PKG_NAME"));
	let metric_fetch_total = meter
		.u64_counter(METRIC_FETCH_TOTAL_NAME)
		.with_description("Outcomes of dispatched catalogue queries, by query name and outcome")
		.init();
	let recording_rule_eval_duration = meter
		.f64_histogram(RECORDING_RULE_EVAL_DURATION_SECONDS)
		.with_unit(Unit::new("s"))
		.with_description("Wall time spent evaluating a single recording rule")
		.init();
	let evaluation_duration = meter
		.f64_histogram(EVALUATION_DURATION_SECONDS)
		.with_unit(Unit::new("s"))
		.with_description("Wall time spent on one full fetch+derive+reconcile evaluation")
		.init();
	Instrumentations {
		registry,
		_provider: provider,
		metric_fetch_total,
		recording_rule_eval_duration,
		evaluation_duration,
	}
}

/// Renders the current state of the registry in Prometheus text
/// exposition format, for a `/metrics` scrape endpoint.
pub fn export_metrics(instrumentations: &Instrumentations) -> anyhow::Result<String> {
	let encoder = TextEncoder::new();
	let metric_families = instrumentations.registry.gather();
	let mut buffer = vec![];
	encoder.encode(&metric_families, &mut buffer)?;
	Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exported_text_contains_the_declared_metric_names() {
		let m = setup_metrcis();
		m.record_fetch_outcome("up", FetchOutcomeTag::Ok);
		m.observe_rule_duration("rr_application_traffic", 0.01);
		let text = export_metrics(&m).unwrap();
		assert!(text.contains(METRIC_FETCH_TOTAL_NAME));
		assert!(text.contains(RECORDING_RULE_EVAL_DURATION_SECONDS));
	}
}
