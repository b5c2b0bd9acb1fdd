use std::collections::BTreeSet;

/// The baseline label set every query in the catalogue must preserve
/// through grouping, regardless of which metric it reads.
const BASELINE_LABELS: &[&str] = &[
	"machine_id",
	"system_uuid",
	"container_id",
	"destination",
	"destination_ip",
	"actual_destination",
];

/// The set of label names a [`Query`] promises to preserve through
/// grouping. Backed by a `BTreeSet` so catalogue tests and debug
/// output are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet(BTreeSet<String>);

impl LabelSet {
	pub fn new() -> Self {
		Self(BTreeSet::new())
	}

	pub fn add(&mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
		for l in labels {
			let l = l.into();
			if !l.is_empty() {
				self.0.insert(l);
			}
		}
		self
	}

	pub fn contains(&self, label: &str) -> bool {
		self.0.contains(label)
	}

	pub fn is_superset_of(&self, other: &LabelSet) -> bool {
		self.0.is_superset(&other.0)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}

/// A declarative metric query: its PromQL-like text (with the literal
/// `$RANGE` placeholder) and the label set that must survive grouping.
#[derive(Debug, Clone)]
pub struct Query {
	pub name: &'static str,
	pub query: String,
	pub labels: LabelSet,
	/// Marks queries whose rows describe a (source-instance,
	/// destination) edge rather than an instance-scoped gauge.
	pub instance_to_instance: bool,
}

fn baseline() -> LabelSet {
	let mut ls = LabelSet::new();
	ls.add(BASELINE_LABELS.iter().copied());
	ls
}

/// Build a `Query`, merging the query-specific labels into the
/// schema-wide baseline.
pub fn q(name: &'static str, query: impl Into<String>, labels: &[&str]) -> Query {
	let mut ls = baseline();
	ls.add(labels.iter().copied());
	Query {
		name,
		query: query.into(),
		labels: ls,
		instance_to_instance: false,
	}
}

/// An instance-to-instance edge query: also carries `app_id` and sets
/// [`Query::instance_to_instance`].
pub fn q_itoi(name: &'static str, query: impl Into<String>, labels: &[&str]) -> Query {
	let mut all: Vec<&str> = labels.to_vec();
	all.push("app_id");
	let mut query = q(name, query, &all);
	query.instance_to_instance = true;
	query
}

pub fn q_pod(name: &'static str, query: impl Into<String>, labels: &[&str]) -> Query {
	let mut all = vec!["uid"];
	all.extend_from_slice(labels);
	q(name, query, &all)
}

pub fn q_rds(name: &'static str, query: impl Into<String>, labels: &[&str]) -> Query {
	let mut all = vec!["rds_instance_id"];
	all.extend_from_slice(labels);
	q(name, query, &all)
}

const POSSIBLE_NAMESPACE_LABELS: &[&str] = &[
	"namespace",
	"ns",
	"kubernetes_namespace",
	"kubernetes_ns",
	"k8s_namespace",
	"k8s_ns",
];
const POSSIBLE_POD_LABELS: &[&str] =
	&["pod", "pod_name", "kubernetes_pod", "k8s_pod"];
const POSSIBLE_DB_INSTANCE_LABELS: &[&str] =
	&["address", "instance", "rds_instance_id", "ec_instance_id"];

pub fn q_db(name: &'static str, query: impl Into<String>, labels: &[&str]) -> Query {
	let mut all: Vec<&str> = POSSIBLE_DB_INSTANCE_LABELS.to_vec();
	all.extend_from_slice(POSSIBLE_NAMESPACE_LABELS);
	all.extend_from_slice(POSSIBLE_POD_LABELS);
	all.extend_from_slice(labels);
	q(name, query, &all)
}

pub fn q_jvm(name: &'static str, query: impl Into<String>, labels: &[&str]) -> Query {
	let mut all = vec!["jvm"];
	all.extend_from_slice(labels);
	q(name, query, &all)
}

pub fn q_dotnet(name: &'static str, query: impl Into<String>, labels: &[&str]) -> Query {
	let mut all = vec!["application"];
	all.extend_from_slice(labels);
	q(name, query, &all)
}

pub fn q_fargate_container(
	name: &'static str,
	query: impl Into<String>,
	labels: &[&str],
) -> Query {
	let mut all = vec!["kubernetes_io_hostname", "namespace", "pod", "container"];
	all.extend_from_slice(labels);
	q(name, query, &all)
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn baseline_labels_are_always_present() {
		let query = q("up", "up", &["job", "instance"]);
		for l in BASELINE_LABELS {
			assert!(query.labels.contains(l), "missing baseline label {l}");
		}
		assert!(query.labels.contains("job"));
		assert!(query.labels.contains("instance"));
	}

	#[test]
	fn itoi_adds_app_id_and_sets_flag() {
		let query = q_itoi("container_net_tcp_successful_connects", "...", &[]);
		assert!(query.instance_to_instance);
		assert!(query.labels.contains("app_id"));
	}

	#[test]
	fn empty_label_names_are_ignored() {
		let query = q("node_cpu_cores", "node_resources_cpu_logical_cores", &[""]);
		assert_eq!(
			query.labels.iter().count(),
			BASELINE_LABELS.len(),
			"an empty label name must not widen the schema"
		);
	}
}
