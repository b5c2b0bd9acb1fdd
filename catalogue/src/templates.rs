/// L7 annotation keys recognized by the catalogue and the SLO
/// reconciler: queries that enumerate Kubernetes object annotations
/// restrict themselves to this set rather than importing everything.
pub const APPLICATION_ANNOTATION_LABELS: &[&str] = &[
	"coroot_com_slo_availability_objective",
	"coroot_com_slo_latency_objective",
	"coroot_com_slo_latency_threshold",
];

/// `sum by(app_id, destination, actual_destination, status)
/// (rate(metric{app_id!=""}[$RANGE])) or rate(metric{app_id=""}[$RANGE])`
pub fn l7_req(metric: &str) -> String {
	format!(
		r#"sum by(app_id, destination, actual_destination, status) (rate({metric}{{app_id!=""}}[$RANGE])) or rate({metric}{{app_id=""}}[$RANGE])"#
	)
}

/// Same as [`l7_req`] but also grouped by `method`, for protocols
/// (RabbitMQ, NATS) whose status alone doesn't identify the request.
pub fn l7_req_with_method(metric: &str) -> String {
	format!(
		r#"sum by(app_id, destination, actual_destination, status, method) (rate({metric}{{app_id!=""}}[$RANGE])) or rate({metric}{{app_id=""}}[$RANGE])"#
	)
}

/// Latency-sum variant: no `status`, grouped only by the edge.
pub fn l7_latency(metric: &str) -> String {
	format!(
		r#"sum by(app_id, destination, actual_destination) (rate({metric}{{app_id!=""}}[$RANGE])) or rate({metric}{{app_id=""}}[$RANGE])"#
	)
}

/// Histogram-bucket variant: grouped by the edge plus the bucket's
/// `le` boundary.
pub fn l7_histogram(metric: &str) -> String {
	format!(
		r#"sum by(app_id, destination, actual_destination, le) (rate({metric}{{app_id!=""}}[$RANGE])) or rate({metric}{{app_id=""}}[$RANGE])"#
	)
}

/// An OR-chain matching if any of `label_names` is non-empty on
/// `metric_name`. Used for the pod-annotations query, where a pod may
/// carry any subset of the recognized annotation labels.
pub fn has_not_empty_label(metric_name: &str, label_names: &[&str]) -> String {
	label_names
		.iter()
		.map(|label| format!(r#"{metric_name}{{{label} != ""}}"#))
		.collect::<Vec<_>>()
		.join(" or ")
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn l7_req_matches_the_dual_arm_shape() {
		let q = l7_req("container_http_requests_total");
		assert_eq!(
			q,
			r#"sum by(app_id, destination, actual_destination, status) (rate(container_http_requests_total{app_id!=""}[$RANGE])) or rate(container_http_requests_total{app_id=""}[$RANGE])"#
		);
	}

	#[test]
	fn has_not_empty_label_joins_with_or() {
		let q = has_not_empty_label("kube_pod_annotations", &["a", "b"]);
		assert_eq!(q, r#"kube_pod_annotations{a != ""} or kube_pod_annotations{b != ""}"#);
	}
}
