use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use catalogue::Query;
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use thiserror::Error;
use timeseries::{TimeSeries, Window};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::metric_values::MetricValues;

#[derive(Debug, Error)]
pub enum FetchError {
	#[error("evaluation was cancelled before fetching completed")]
	Cancelled,
}

/// The backend the fetcher dispatches queries against. `query` takes
/// already-substituted PromQL text (`$RANGE` resolved to a concrete
/// step literal) and the window to evaluate it over.
#[async_trait]
pub trait MetricBackend: Send + Sync {
	async fn query(&self, promql: &str, window: Window) -> anyhow::Result<Vec<MetricValues>>;
}

/// One query's fetch outcome. A transient failure (timeout, connection
/// refused, 5xx) is distinct from a schema violation (the backend
/// answered, but some row lacked a label the catalogue entry declares)
/// — the former is worth retrying on the next evaluation, the latter
/// is a standing defect in that query or its upstream labels.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
	Ok(usize),
	SchemaViolation { missing_label: String },
	Transient(String),
}

/// The fetcher's output for one evaluation: every query's outcome,
/// keyed by query name, plus the flattened rows of whichever queries
/// succeeded. Queries that failed (either way) contribute no rows.
#[derive(Debug, Default)]
pub struct FetchReport {
	pub outcomes: HashMap<String, QueryOutcome>,
	pub values: Vec<MetricValues>,
}

impl FetchReport {
	pub fn is_query_ok(&self, name: &str) -> bool {
		matches!(self.outcomes.get(name), Some(QueryOutcome::Ok(_)))
	}

	pub fn successful_query_count(&self) -> usize {
		self.outcomes.values().filter(|o| matches!(o, QueryOutcome::Ok(_))).count()
	}
}

/// Renders `step` as a single-unit Prometheus duration literal
/// (`15s`), never a compound one (`humantime::format_duration` would
/// render a 90s step as `"1m 30s"`, which contains a space and isn't a
/// valid Prometheus range selector).
fn substitute_range(promql: &str, step: Duration) -> String {
	promql.replace("$RANGE", &format!("{}s", step.as_secs()))
}

fn validate_schema(query: &Query, rows: Vec<MetricValues>) -> QueryOutcome {
	for row in &rows {
		for label in query.labels.iter() {
			if row.labels.get(label).is_none() {
				return QueryOutcome::SchemaViolation {
					missing_label: label.to_string(),
				};
			}
		}
	}
	QueryOutcome::Ok(rows.len())
}

/// Dispatches every query in `queries` against `backend`, bounded to
/// `concurrency` in flight at once, and collects the outcomes into one
/// [`FetchReport`]. Returns [`FetchError::Cancelled`] only if `cancel`
/// fired before the round finished; individual query failures never
/// fail the whole round, they're recorded in the report instead.
pub async fn fetch_all(
	backend: &dyn MetricBackend,
	queries: &[Query],
	window: Window,
	concurrency: usize,
	cancel: &CancellationToken,
) -> Result<FetchReport, FetchError> {
	let concurrency = concurrency.max(1);
	let semaphore = Arc::new(Semaphore::new(concurrency));
	let step = Duration::from_secs(window.step.max(1) as u64);

	let outcomes: Vec<(String, QueryOutcome, Vec<MetricValues>)> = stream::iter(queries.iter())
		.map(|query| {
			let semaphore = semaphore.clone();
			let cancel = cancel.clone();
			let promql = substitute_range(&query.query, step);
			async move {
				let _permit = semaphore.acquire_owned().await.expect("semaphore never closed");
				let outcome = tokio::select! {
					biased;
					_ = cancel.cancelled() => (QueryOutcome::Transient("cancelled".to_string()), Vec::new()),
					res = backend.query(&promql, window) => match res {
						Ok(rows) => {
							let outcome = validate_schema(query, rows.clone());
							match outcome {
								QueryOutcome::Ok(_) => (outcome, rows),
								other => (other, Vec::new()),
							}
						}
						Err(e) => (QueryOutcome::Transient(e.to_string()), Vec::new()),
					},
				};
				(query.name.to_string(), outcome.0, outcome.1)
			}
		})
		.buffer_unordered(concurrency)
		.collect()
		.await;

	if cancel.is_cancelled() {
		return Err(FetchError::Cancelled);
	}

	let mut report = FetchReport::default();
	for (name, outcome, rows) in outcomes {
		match &outcome {
			QueryOutcome::SchemaViolation { missing_label } => {
				warn!(query = %name, label = %missing_label, "schema violation, discarding query output");
			}
			QueryOutcome::Transient(reason) => {
				warn!(query = %name, reason = %reason, "transient fetch failure");
			}
			QueryOutcome::Ok(_) => {
				report.values.extend(rows);
			}
		}
		report.outcomes.insert(name, outcome);
	}
	Ok(report)
}

#[derive(Debug, Deserialize)]
struct PromResponse {
	status: String,
	data: Option<PromData>,
	error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromData {
	result: Vec<PromSeries>,
}

#[derive(Debug, Deserialize)]
struct PromSeries {
	metric: BTreeMap<String, String>,
	values: Vec<(f64, String)>,
}

/// A Prometheus-compatible `query_range` client. Every [`Query`]
/// evaluates to a matrix over `[window.from, window.to, window.step]`;
/// gaps in the response (points Prometheus didn't return a sample for)
/// are filled with `NaN` rather than dropped, so every series this
/// backend returns is aligned to `window` by construction.
pub struct PrometheusBackend {
	client: reqwest::Client,
	base_url: String,
}

impl PrometheusBackend {
	pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
		let client = reqwest::Client::builder().timeout(timeout).build()?;
		Ok(Self {
			client,
			base_url: base_url.into(),
		})
	}
}

#[async_trait]
impl MetricBackend for PrometheusBackend {
	async fn query(&self, promql: &str, window: Window) -> anyhow::Result<Vec<MetricValues>> {
		let url = format!("{}/api/v1/query_range", self.base_url.trim_end_matches('/'));
		let resp = self
			.client
			.get(&url)
			.query(&[
				("query", promql.to_string()),
				("start", window.from.to_string()),
				("end", window.to.to_string()),
				("step", format!("{}s", window.step)),
			])
			.send()
			.await?
			.error_for_status()?
			.json::<PromResponse>()
			.await?;

		if resp.status != "success" {
			anyhow::bail!(resp.error.unwrap_or_else(|| "unknown prometheus error".to_string()));
		}
		let data = resp.data.unwrap_or(PromData { result: vec![] });

		let mut out = Vec::with_capacity(data.result.len());
		for series in data.result {
			let mut by_ts: BTreeMap<i64, f32> = BTreeMap::new();
			for (ts, value) in series.values {
				if let Ok(v) = value.parse::<f32>() {
					by_ts.insert(ts.round() as i64, v);
				}
			}
			let points: Vec<f32> = window.points().map(|t| by_ts.get(&t).copied().unwrap_or(f32::NAN)).collect();
			let ts = TimeSeries::new(window, points);
			let labels: common::Labels = series.metric.into_iter().collect();
			out.push(MetricValues::new(labels, ts));
		}
		Ok(out)
	}
}

/// Wraps any [`MetricBackend`] with a per-(query text, window) response
/// cache, mirroring the teacher's label/series response cache. Only
/// successful responses are cached; a backend error is never memoized,
/// so a transient failure doesn't poison subsequent evaluations.
pub struct CachingBackend<B> {
	inner: B,
	cache: moka::sync::Cache<(String, Window), Arc<Vec<MetricValues>>>,
}

impl<B: MetricBackend> CachingBackend<B> {
	pub fn new(inner: B, max_capacity: u64, ttl: Duration) -> Self {
		let cache = moka::sync::Cache::builder()
			.max_capacity(max_capacity)
			.time_to_live(ttl)
			.build();
		Self { inner, cache }
	}
}

#[async_trait]
impl<B: MetricBackend> MetricBackend for CachingBackend<B> {
	async fn query(&self, promql: &str, window: Window) -> anyhow::Result<Vec<MetricValues>> {
		let key = (promql.to_string(), window);
		if let Some(cached) = self.cache.get(&key) {
			return Ok((*cached).clone());
		}
		let rows = self.inner.query(promql, window).await?;
		self.cache.insert(key, Arc::new(rows.clone()));
		Ok(rows)
	}
}

/// A fixed-response backend for tests: maps already-substituted PromQL
/// text to a canned result (or a forced error), independent of the
/// window it's asked for.
#[derive(Default)]
pub struct StaticBackend {
	pub responses: HashMap<String, Vec<MetricValues>>,
	pub errors: HashMap<String, String>,
}

impl StaticBackend {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_response(mut self, promql: impl Into<String>, rows: Vec<MetricValues>) -> Self {
		self.responses.insert(promql.into(), rows);
		self
	}

	pub fn with_error(mut self, promql: impl Into<String>, reason: impl Into<String>) -> Self {
		self.errors.insert(promql.into(), reason.into());
		self
	}
}

#[async_trait]
impl MetricBackend for StaticBackend {
	async fn query(&self, promql: &str, _window: Window) -> anyhow::Result<Vec<MetricValues>> {
		if let Some(reason) = self.errors.get(promql) {
			anyhow::bail!(reason.clone());
		}
		Ok(self.responses.get(promql).cloned().unwrap_or_default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use catalogue::q;
	use common::Labels;
	use pretty_assertions::assert_eq;

	fn window() -> Window {
		Window::new(0, 30, 15)
	}

	#[test]
	fn substitute_range_emits_a_space_free_prometheus_literal() {
		assert_eq!(substitute_range("rate(x[$RANGE])", Duration::from_secs(15)), "rate(x[15s])");
		// a non-single-unit step must not render as a compound literal
		// like "1m 30s", which Prometheus would reject.
		assert_eq!(substitute_range("rate(x[$RANGE])", Duration::from_secs(90)), "rate(x[90s])");
	}

	#[tokio::test]
	async fn a_successful_query_contributes_its_rows() {
		let query = q("up", "up", &["job"]);
		let mut labels = Labels::new();
		labels.insert("machine_id", "m1");
		labels.insert("system_uuid", "s1");
		labels.insert("container_id", "c1");
		labels.insert("destination", "d1");
		labels.insert("destination_ip", "1.2.3.4");
		labels.insert("actual_destination", "d1");
		labels.insert("job", "node");
		let rows = vec![MetricValues::new(labels, TimeSeries::new(window(), vec![1.0, 1.0, 1.0]))];
		let backend = StaticBackend::new().with_response("up", rows);

		let report = fetch_all(&backend, &[query], window(), 4, &CancellationToken::new())
			.await
			.unwrap();

		assert!(report.is_query_ok("up"));
		assert_eq!(report.values.len(), 1);
	}

	#[tokio::test]
	async fn a_row_missing_a_declared_label_discards_the_whole_query() {
		let query = q("up", "up", &["job"]);
		let mut labels = Labels::new();
		labels.insert("machine_id", "m1");
		labels.insert("system_uuid", "s1");
		labels.insert("container_id", "c1");
		labels.insert("destination", "d1");
		labels.insert("destination_ip", "1.2.3.4");
		labels.insert("actual_destination", "d1");
		// "job" is missing.
		let rows = vec![MetricValues::new(labels, TimeSeries::new(window(), vec![1.0, 1.0, 1.0]))];
		let backend = StaticBackend::new().with_response("up", rows);

		let report = fetch_all(&backend, &[query], window(), 4, &CancellationToken::new())
			.await
			.unwrap();

		assert!(!report.is_query_ok("up"));
		assert!(report.values.is_empty());
	}

	#[tokio::test]
	async fn a_transient_failure_does_not_fail_other_queries() {
		let ok = q("up", "up", &[]);
		let failing = q("down", "down", &[]);
		let backend = StaticBackend::new().with_error("down", "connection refused");

		let report = fetch_all(&backend, &[ok, failing], window(), 4, &CancellationToken::new())
			.await
			.unwrap();

		assert!(report.is_query_ok("up"));
		assert!(!report.is_query_ok("down"));
	}

	#[tokio::test]
	async fn caching_backend_only_calls_through_once_per_query_and_window() {
		use std::sync::atomic::{AtomicUsize, Ordering};

		struct CountingBackend {
			calls: AtomicUsize,
		}

		#[async_trait]
		impl MetricBackend for CountingBackend {
			async fn query(&self, _promql: &str, window: Window) -> anyhow::Result<Vec<MetricValues>> {
				self.calls.fetch_add(1, Ordering::SeqCst);
				Ok(vec![MetricValues::new(Labels::new(), TimeSeries::empty(window))])
			}
		}

		let inner = CountingBackend { calls: AtomicUsize::new(0) };
		let cached = CachingBackend::new(inner, 100, Duration::from_secs(60));

		cached.query("up", window()).await.unwrap();
		cached.query("up", window()).await.unwrap();

		assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 1);
	}
}
