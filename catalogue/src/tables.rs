use crate::query::{q, q_db, q_dotnet, q_fargate_container, q_itoi, q_jvm, q_pod, q_rds, Query};
use crate::templates::{
	has_not_empty_label, l7_histogram, l7_latency, l7_req, l7_req_with_method,
	APPLICATION_ANNOTATION_LABELS,
};

/// The full metric query catalogue: every PromQL-shaped query the
/// fetcher may dispatch, across node/container/kube/fargate/cloud and
/// per-protocol telemetry families.
///
/// This mirrors the complete source table, not just the subset the
/// recording-rule engine reads — callers needing kube-state or
/// node-exporter rows for the entity model draw from here too.
pub fn queries() -> Vec<Query> {
	let mut annotations: Vec<&str> = APPLICATION_ANNOTATION_LABELS.to_vec();
	annotations.sort_unstable();

	let mut kube_deployment_annotation_labels = annotations.clone();
	kube_deployment_annotation_labels.extend(["namespace", "deployment"]);
	let mut kube_statefulset_annotation_labels = annotations.clone();
	kube_statefulset_annotation_labels.extend(["namespace", "statefulset"]);
	let mut kube_daemonset_annotation_labels = annotations.clone();
	kube_daemonset_annotation_labels.extend(["namespace", "daemonset"]);
	let mut kube_cronjob_annotation_labels = annotations.clone();
	kube_cronjob_annotation_labels.extend(["namespace", "cronjob"]);

	vec![
		q("node_agent_info", "node_agent_info", &["version"]),
		q("up", "up", &["job", "instance"]),
		q("node_info", "node_info", &["hostname", "kernel_version"]),
		q(
			"node_cloud_info",
			"node_cloud_info",
			&["provider", "region", "availability_zone", "instance_type", "instance_life_cycle"],
		),
		q("node_uptime_seconds", "node_uptime_second", &[]),
		q("node_cpu_cores", "node_resources_cpu_logical_cores", &[]),
		q(
			"node_cpu_usage_percent",
			r#"sum(rate(node_resources_cpu_usage_seconds_total{mode!="idle"}[$RANGE])) without(mode) /sum(rate(node_resources_cpu_usage_seconds_total[$RANGE])) without(mode)*100"#,
			&[],
		),
		q(
			"node_cpu_usage_by_mode",
			r#"rate(node_resources_cpu_usage_seconds_total{mode!="idle"}[$RANGE]) / ignoring(mode) group_left sum(rate(node_resources_cpu_usage_seconds_total[$RANGE])) without(mode)*100"#,
			&["mode"],
		),
		q("node_memory_total_bytes", "node_resources_memory_total_bytes", &[]),
		q("node_memory_available_bytes", "node_resources_memory_available_bytes", &[]),
		q("node_memory_free_bytes", "node_resources_memory_free_bytes", &[]),
		q("node_memory_cached_bytes", "node_resources_memory_cached_bytes", &[]),
		q("node_disk_read_time", "rate(node_resources_disk_read_time_seconds_total[$RANGE])", &["device"]),
		q("node_disk_write_time", "rate(node_resources_disk_write_time_seconds_total[$RANGE])", &["device"]),
		q("node_disk_reads", "rate(node_resources_disk_reads_total[$RANGE])", &["device"]),
		q("node_disk_writes", "rate(node_resources_disk_writes_total[$RANGE])", &["device"]),
		q("node_disk_read_bytes", "rate(node_resources_disk_read_bytes_total[$RANGE])", &["device"]),
		q("node_disk_written_bytes", "rate(node_resources_disk_written_bytes_total[$RANGE])", &["device"]),
		q("node_disk_io_time", "rate(node_resources_disk_io_time_seconds_total[$RANGE])", &["device"]),
		q("node_net_up", "node_net_interface_up", &["interface"]),
		q("node_net_ip", "node_net_interface_ip", &["interface", "ip"]),
		q("node_net_rx_bytes", "rate(node_net_received_bytes_total[$RANGE])", &["interface"]),
		q("node_net_tx_bytes", "rate(node_net_transmitted_bytes_total[$RANGE])", &["interface"]),
		q("node_gpu_info", "node_gpu_info", &["gpu_uuid", "name"]),
		q("node_gpu_memory_total_bytes", "node_resources_gpu_memory_total_bytes", &["gpu_uuid"]),
		q("node_gpu_memory_used_bytes", "node_resources_gpu_memory_used_bytes", &["gpu_uuid"]),
		q("node_gpu_memory_utilization_percent_avg", "node_resources_gpu_memory_utilization_percent_avg", &["gpu_uuid"]),
		q("node_gpu_memory_utilization_percent_peak", "node_resources_gpu_memory_utilization_percent_peak", &["gpu_uuid"]),
		q("node_gpu_utilization_percent_avg", "node_resources_gpu_utilization_percent_avg", &["gpu_uuid"]),
		q("node_gpu_utilization_percent_peak", "node_resources_gpu_utilization_percent_peak", &["gpu_uuid"]),
		q("node_gpu_temperature_celsius", "node_resources_gpu_temperature_celsius", &["gpu_uuid"]),
		q("node_gpu_power_usage_watts", "node_resources_gpu_power_usage_watts", &["gpu_uuid"]),
		q("ip_to_fqdn", "sum by(fqdn, ip) (ip_to_fqdn)", &["ip", "fqdn"]),
		q(
			"fargate_node_machine_cpu_cores",
			r#"machine_cpu_cores{eks_amazonaws_com_compute_type="fargate"}"#,
			&["eks_amazonaws_com_compute_type", "kubernetes_io_hostname", "topology_kubernetes_io_region", "topology_kubernetes_io_zone"],
		),
		q(
			"fargate_node_machine_memory_bytes",
			r#"machine_memory_bytes{eks_amazonaws_com_compute_type="fargate"}"#,
			&["eks_amazonaws_com_compute_type", "kubernetes_io_hostname", "topology_kubernetes_io_region", "topology_kubernetes_io_zone"],
		),
		q_fargate_container(
			"fargate_container_spec_cpu_limit_cores",
			r#"container_spec_cpu_quota{eks_amazonaws_com_compute_type="fargate"}/container_spec_cpu_period{eks_amazonaws_com_compute_type="fargate"}"#,
			&[],
		),
		q_fargate_container(
			"fargate_container_cpu_usage_seconds",
			r#"rate(container_cpu_usage_seconds_total{eks_amazonaws_com_compute_type="fargate"}[$RANGE])"#,
			&[],
		),
		q_fargate_container(
			"fargate_container_cpu_cfs_throttled_seconds",
			r#"rate(container_cpu_cfs_throttled_seconds_total{eks_amazonaws_com_compute_type="fargate"}[$RANGE])"#,
			&[],
		),
		q_fargate_container(
			"fargate_container_spec_memory_limit_bytes",
			r#"container_spec_memory_limit_bytes{eks_amazonaws_com_compute_type="fargate"}"#,
			&[],
		),
		q_fargate_container("fargate_container_memory_rss", r#"container_memory_rss{eks_amazonaws_com_compute_type="fargate"}"#, &[]),
		q_fargate_container("fargate_container_memory_cache", r#"container_memory_cache{eks_amazonaws_com_compute_type="fargate"}"#, &[]),
		q_fargate_container(
			"fargate_container_oom_events_total",
			r#"container_oom_events_total{eks_amazonaws_com_compute_type="fargate"}"#,
			&["job", "instance"],
		),
		q("kube_node_info", "kube_node_info", &["node", "kernel_version"]),
		q("kube_service_info", "kube_service_info", &["namespace", "service", "cluster_ip"]),
		q("kube_service_spec_type", "kube_service_spec_type", &["namespace", "service", "type"]),
		q("kube_endpoint_address", "kube_endpoint_address", &["namespace", "endpoint", "ip"]),
		q("kube_service_status_load_balancer_ingress", "kube_service_status_load_balancer_ingress", &["namespace", "service", "ip"]),
		q("kube_deployment_spec_replicas", "kube_deployment_spec_replicas", &["namespace", "deployment"]),
		q("kube_daemonset_status_desired_number_scheduled", "kube_daemonset_status_desired_number_scheduled", &["namespace", "daemonset"]),
		q("kube_statefulset_replicas", "kube_statefulset_replicas", &["namespace", "statefulset"]),
		q("kube_deployment_annotations", "kube_deployment_annotations", &kube_deployment_annotation_labels),
		q("kube_statefulset_annotations", "kube_statefulset_annotations", &kube_statefulset_annotation_labels),
		q("kube_daemonset_annotations", "kube_daemonset_annotations", &kube_daemonset_annotation_labels),
		q("kube_cronjob_annotations", "kube_cronjob_annotations", &kube_cronjob_annotation_labels),
		q_pod(
			"kube_pod_info",
			"kube_pod_info",
			&["namespace", "pod", "created_by_name", "created_by_kind", "node", "pod_ip", "host_ip"],
		),
		q_pod(
			"kube_pod_annotations",
			&has_not_empty_label("kube_pod_annotations", &annotations),
			&annotations,
		),
		q_pod(
			"kube_pod_labels",
			"kube_pod_labels",
			&[
				"label_postgres_operator_crunchydata_com_cluster",
				"label_postgres_operator_crunchydata_com_role",
				"label_cluster_name",
				"label_team",
				"label_application",
				"label_spilo_role",
				"label_role",
				"label_k8s_enterprisedb_io_cluster",
				"label_cnpg_io_cluster",
				"label_stackgres_io_cluster_name",
				"label_app_kubernetes_io_managed_by",
				"label_app_kubernetes_io_instance",
				"label_helm_sh_chart",
				"label_app_kubernetes_io_name",
				"label_app_kubernetes_io_component",
				"label_app_kubernetes_io_part_of",
			],
		),
		q_pod("kube_pod_status_phase", "kube_pod_status_phase > 0", &["phase"]),
		q_pod("kube_pod_status_ready", r#"kube_pod_status_ready{condition="true"}"#, &[]),
		q_pod("kube_pod_status_scheduled", r#"kube_pod_status_scheduled{condition="true"} > 0"#, &[]),
		q_pod("kube_pod_init_container_info", "kube_pod_init_container_info", &["namespace", "pod", "container"]),
		q_pod("kube_pod_container_resource_requests", "kube_pod_container_resource_requests", &["namespace", "pod", "container", "resource"]),
		q_pod("kube_pod_container_status_ready", "kube_pod_container_status_ready > 0", &["namespace", "pod", "container"]),
		q_pod("kube_pod_container_status_running", "kube_pod_container_status_running > 0", &["namespace", "pod", "container"]),
		q_pod("kube_pod_container_status_waiting", "kube_pod_container_status_waiting > 0", &["namespace", "pod", "container"]),
		q_pod("kube_pod_container_status_waiting_reason", "kube_pod_container_status_waiting_reason > 0", &["namespace", "pod", "container", "reason"]),
		q_pod("kube_pod_container_status_terminated", "kube_pod_container_status_terminated > 0", &["namespace", "pod", "container"]),
		q_pod("kube_pod_container_status_terminated_reason", "kube_pod_container_status_terminated_reason > 0", &["namespace", "pod", "container", "reason"]),
		q_pod("kube_pod_container_status_last_terminated_reason", "kube_pod_container_status_last_terminated_reason", &["namespace", "pod", "container", "reason"]),
		q("container_info", "container_info", &["image", "systemd_triggered_by"]),
		q("container_application_type", "container_application_type", &["application_type"]),
		q("container_cpu_limit", "container_resources_cpu_limit_cores", &[]),
		q("container_cpu_usage", "rate(container_resources_cpu_usage_seconds_total[$RANGE])", &[]),
		q("container_cpu_delay", "rate(container_resources_cpu_delay_seconds_total[$RANGE])", &[]),
		q("container_throttled_time", "rate(container_resources_cpu_throttled_seconds_total[$RANGE])", &[]),
		q("container_memory_limit", "container_resources_memory_limit_bytes", &[]),
		q("container_memory_rss", "container_resources_memory_rss_bytes", &[]),
		q("container_memory_cache", "container_resources_memory_cache_bytes", &[]),
		q("container_memory_pressure", "rate(container_resources_memory_pressure_waiting_seconds_total[$RANGE])", &["kind"]),
		q("container_oom_kills_total", "container_oom_kills_total % 10000000", &["job", "instance"]),
		q("container_restarts", "container_restarts_total % 10000000", &["job", "instance"]),
		q("container_volume_size", "container_resources_disk_size_bytes", &["mount_point", "volume", "device"]),
		q("container_volume_used", "container_resources_disk_used_bytes", &["mount_point", "volume", "device"]),
		q("container_gpu_usage_percent", "container_resources_gpu_usage_percent", &["gpu_uuid"]),
		q("container_gpu_memory_usage_percent", "container_resources_gpu_memory_usage_percent", &["gpu_uuid"]),
		q("container_net_tcp_listen_info", "container_net_tcp_listen_info", &["listen_addr", "proxy"]),
		q_itoi(
			"container_net_latency",
			r#"avg by(app_id, destination_ip) (container_net_latency_seconds{app_id!=""}) or container_net_latency_seconds{app_id=""}"#,
			&[],
		),
		q_itoi(
			"container_net_tcp_successful_connects",
			r#"sum by(app_id, destination, actual_destination) (rate(container_net_tcp_successful_connects_total{app_id!=""}[$RANGE])) or rate(container_net_tcp_successful_connects_total{app_id=""}[$RANGE])"#,
			&[],
		),
		q_itoi(
			"container_net_tcp_failed_connects",
			r#"sum by(app_id, destination, actual_destination) (rate(container_net_tcp_failed_connects_total{app_id!=""}[$RANGE])) or rate(container_net_tcp_failed_connects_total{app_id=""}[$RANGE])"#,
			&[],
		),
		q_itoi(
			"container_net_tcp_active_connections",
			r#"sum by(app_id, destination, actual_destination) (container_net_tcp_active_connections{app_id!=""}) or container_net_tcp_active_connections{app_id=""}"#,
			&[],
		),
		q_itoi(
			"container_net_tcp_connection_time_seconds",
			r#"sum by(app_id, destination, actual_destination) (rate(container_net_tcp_connection_time_seconds_total{app_id!=""}[$RANGE])) or rate(container_net_tcp_connection_time_seconds_total{app_id=""}[$RANGE])"#,
			&[],
		),
		q_itoi(
			"container_net_tcp_bytes_sent",
			r#"sum by(app_id, destination, actual_destination, az, region) (rate(container_net_tcp_bytes_sent_total{app_id!=""}[$RANGE])) or rate(container_net_tcp_bytes_sent_total{app_id=""}[$RANGE])"#,
			&["region", "az"],
		),
		q_itoi(
			"container_net_tcp_bytes_received",
			r#"sum by(app_id, destination, actual_destination, az, region) (rate(container_net_tcp_bytes_received_total{app_id!=""}[$RANGE])) or rate(container_net_tcp_bytes_received_total{app_id=""}[$RANGE])"#,
			&["region", "az"],
		),
		q_itoi(
			"container_net_tcp_retransmits",
			r#"sum by(app_id, destination, actual_destination) (rate(container_net_tcp_retransmits_total{app_id!=""}[$RANGE])) or rate(container_net_tcp_retransmits_total{app_id=""}[$RANGE])"#,
			&[],
		),
		q("container_log_messages", "container_log_messages_total % 10000000", &["level", "pattern_hash", "sample", "job", "instance"]),
		q_itoi("container_http_requests_count", &l7_req("container_http_requests_total"), &["status"]),
		q_itoi("container_http_requests_latency_total", &l7_latency("container_http_requests_duration_seconds_total_sum"), &[]),
		q_itoi("container_http_requests_histogram", &l7_histogram("container_http_requests_duration_seconds_total_bucket"), &["le"]),
		q_itoi("container_postgres_queries_count", &l7_req("container_postgres_queries_total"), &["status"]),
		q_itoi("container_postgres_queries_latency_total", &l7_latency("container_postgres_queries_duration_seconds_total_sum"), &[]),
		q_itoi("container_postgres_queries_histogram", &l7_histogram("container_postgres_queries_duration_seconds_total_bucket"), &["le"]),
		q_itoi("container_redis_queries_count", &l7_req("container_redis_queries_total"), &["status"]),
		q_itoi("container_redis_queries_latency_total", &l7_latency("container_redis_queries_duration_seconds_total_sum"), &[]),
		q_itoi("container_redis_queries_histogram", &l7_histogram("container_redis_queries_duration_seconds_total_bucket"), &["le"]),
		q_itoi("container_memcached_queries_count", &l7_req("container_memcached_queries_total"), &["status"]),
		q_itoi("container_memcached_queries_latency_total", &l7_latency("container_memcached_queries_duration_seconds_total_sum"), &[]),
		q_itoi("container_memcached_queries_histogram", &l7_histogram("container_memcached_queries_duration_seconds_total_bucket"), &["le"]),
		q_itoi("container_mysql_queries_count", &l7_req("container_mysql_queries_total"), &["status"]),
		q_itoi("container_mysql_queries_latency_total", &l7_latency("container_mysql_queries_duration_seconds_total_sum"), &[]),
		q_itoi("container_mysql_queries_histogram", &l7_histogram("container_mysql_queries_duration_seconds_total_bucket"), &["le"]),
		q_itoi("container_mongo_queries_count", &l7_req("container_mongo_queries_total"), &["status"]),
		q_itoi("container_mongo_queries_latency_total", &l7_latency("container_mongo_queries_duration_seconds_total_sum"), &[]),
		q_itoi("container_mongo_queries_histogram", &l7_histogram("container_mongo_queries_duration_seconds_total_bucket"), &["le"]),
		q_itoi("container_kafka_requests_count", &l7_req("container_kafka_requests_total"), &["status"]),
		q_itoi("container_kafka_requests_latency_total", &l7_latency("container_kafka_requests_duration_seconds_total_sum"), &[]),
		q_itoi("container_kafka_requests_histogram", &l7_histogram("container_kafka_requests_duration_seconds_total_bucket"), &["le"]),
		q_itoi("container_cassandra_queries_count", &l7_req("container_cassandra_queries_total"), &["status"]),
		q_itoi("container_cassandra_queries_latency_total", &l7_latency("container_cassandra_queries_duration_seconds_total_sum"), &[]),
		q_itoi("container_cassandra_queries_histogram", &l7_histogram("container_cassandra_queries_duration_seconds_total_bucket"), &["le"]),
		q_itoi("container_clickhouse_queries_count", &l7_req("container_clickhouse_queries_total"), &["status"]),
		q_itoi("container_clickhouse_queries_latency_total", &l7_latency("container_clickhouse_queries_duration_seconds_total_sum"), &[]),
		q_itoi("container_clickhouse_queries_histogram", &l7_histogram("container_clickhouse_queries_duration_seconds_total_bucket"), &["le"]),
		q_itoi("container_zookeeper_requests_count", &l7_req("container_zookeeper_requests_total"), &["status"]),
		q_itoi("container_zookeeper_requests_latency_total", &l7_latency("container_zookeeper_requests_duration_seconds_total_sum"), &[]),
		q_itoi("container_zookeeper_requests_histogram", &l7_histogram("container_zookeeper_requests_duration_seconds_total_bucket"), &["le"]),
		q_itoi("container_foundationdb_requests_count", &l7_req("container_foundationdb_requests_total"), &["status"]),
		q_itoi("container_foundationdb_requests_latency_total", &l7_latency("container_foundationdb_requests_duration_seconds_total_sum"), &[]),
		q_itoi("container_foundationdb_requests_histogram", &l7_histogram("container_foundationdb_requests_duration_seconds_total_bucket"), &["le"]),
		q_itoi("container_rabbitmq_messages", &l7_req_with_method("container_rabbitmq_messages_total"), &["status", "method"]),
		q_itoi("container_nats_messages", &l7_req_with_method("container_nats_messages_total"), &["status", "method"]),
		q(
			"l7_requests_by_dest",
			"sum by(actual_destination, status) (rate(container_mongo_queries_total[$RANGE]) or rate(container_mysql_queries_total[$RANGE]))",
			&["status"],
		),
		q(
			"l7_total_latency_by_dest",
			"sum by(actual_destination) (rate(container_mongo_queries_duration_seconds_total_sum[$RANGE]) or rate(container_mysql_queries_duration_seconds_total_sum[$RANGE]))",
			&[],
		),
		q(
			"container_dns_requests_total",
			r#"sum by(app_id, request_type, domain, status) (rate(container_dns_requests_total{app_id!=""}[$RANGE])) or rate(container_dns_requests_total{app_id=""}[$RANGE])"#,
			&["app_id", "request_type", "domain", "status"],
		),
		q(
			"container_dns_requests_latency",
			r#"sum by(app_id, le) (rate(container_dns_requests_duration_seconds_total_bucket{app_id!=""}[$RANGE])) or rate(container_dns_requests_duration_seconds_total_bucket{app_id=""}[$RANGE])"#,
			&["app_id", "le"],
		),
		q("aws_discovery_error", "aws_discovery_error", &["error"]),
		q_rds(
			"aws_rds_info",
			"aws_rds_info",
			&["cluster_id", "ipv4", "port", "engine", "engine_version", "instance_type", "storage_type", "region", "availability_zone", "multi_az"],
		),
		q_rds("aws_rds_status", "aws_rds_status", &["status"]),
		q_rds("aws_rds_cpu_cores", "aws_rds_cpu_cores", &[]),
		q_rds("aws_rds_cpu_usage_percent", "aws_rds_cpu_usage_percent", &["mode"]),
		q_rds("aws_rds_memory_total_bytes", "aws_rds_memory_total_bytes", &[]),
		q_rds("aws_rds_memory_cached_bytes", "aws_rds_memory_cached_bytes", &[]),
		q_rds("aws_rds_memory_free_bytes", "aws_rds_memory_free_bytes", &[]),
		q_rds("aws_rds_storage_provisioned_iops", "aws_rds_storage_provisioned_iops", &[]),
		q_rds("aws_rds_allocated_storage_gibibytes", "aws_rds_allocated_storage_gibibytes", &[]),
		q_rds("aws_rds_fs_total_bytes", r#"aws_rds_fs_total_bytes{mount_point="/rdsdbdata"}"#, &[]),
		q_rds("aws_rds_fs_used_bytes", r#"aws_rds_fs_used_bytes{mount_point="/rdsdbdata"}"#, &[]),
		q_rds("aws_rds_io_util_percent", "aws_rds_io_util_percent", &["device"]),
		q_rds("aws_rds_io_ops_per_second", "aws_rds_io_ops_per_second", &["device", "operation"]),
		q_rds("aws_rds_io_await_seconds", "aws_rds_io_await_seconds", &["device"]),
		q_rds("aws_rds_net_rx_bytes_per_second", "aws_rds_net_rx_bytes_per_second", &["interface"]),
		q_rds("aws_rds_net_tx_bytes_per_second", "aws_rds_net_tx_bytes_per_second", &["interface"]),
		q_rds("aws_rds_log_messages_total", "aws_rds_log_messages_total % 10000000", &["level", "pattern_hash", "sample", "job", "instance"]),
		q(
			"aws_elasticache_info",
			"aws_elasticache_info",
			&["ec_instance_id", "cluster_id", "ipv4", "port", "engine", "engine_version", "instance_type", "region", "availability_zone"],
		),
		q("aws_elasticache_status", "aws_elasticache_status", &["ec_instance_id", "status"]),
		q_db("pg_up", "pg_up", &[]),
		q_db("pg_scrape_error", "pg_scrape_error", &["error", "warning"]),
		q_db("pg_info", "pg_info", &["server_version"]),
		q_db("pg_setting", "pg_setting", &["name", "unit"]),
		q_db("pg_connections", r#"pg_connections{db!="postgres"}"#, &["db", "user", "state", "query", "wait_event_type"]),
		q_db("pg_lock_awaiting_queries", "pg_lock_awaiting_queries", &["db", "user", "blocking_query"]),
		q_db("pg_latency_seconds", "pg_latency_seconds", &["summary"]),
		q_db("pg_top_query_calls_per_second", "pg_top_query_calls_per_second", &["db", "user", "query"]),
		q_db("pg_top_query_time_per_second", "pg_top_query_time_per_second", &["db", "user", "query"]),
		q_db("pg_top_query_io_time_per_second", "pg_top_query_io_time_per_second", &["db", "user", "query"]),
		q_db("pg_db_queries_per_second", "pg_db_queries_per_second", &["db"]),
		q_db("pg_wal_current_lsn", "pg_wal_current_lsn", &[]),
		q_db("pg_wal_receive_lsn", "pg_wal_receive_lsn", &[]),
		q_db("pg_wal_reply_lsn", "pg_wal_reply_lsn", &[]),
		q_db("mysql_up", "mysql_up", &[]),
		q_db("mysql_scrape_error", "mysql_scrape_error", &["error", "warning"]),
		q_db("mysql_info", "mysql_info", &["server_uuid", "server_version"]),
		q_db("mysql_top_query_calls_per_second", "mysql_top_query_calls_per_second", &["schema", "query"]),
		q_db("mysql_top_query_time_per_second", "mysql_top_query_time_per_second", &["schema", "query"]),
		q_db("mysql_top_query_lock_time_per_second", "mysql_top_query_lock_time_per_second", &["schema", "query"]),
		q_db("mysql_replication_io_status", "mysql_replication_io_status", &["source_server_uuid", "last_error", "state"]),
		q_db("mysql_replication_sql_status", "mysql_replication_sql_status", &["source_server_uuid", "last_error", "state"]),
		q_db("mysql_replication_lag_seconds", "mysql_replication_lag_seconds", &["source_server_uuid"]),
		q_db("mysql_connections_max", "mysql_connections_max", &[]),
		q_db("mysql_connections_current", "mysql_connections_current", &[]),
		q_db("mysql_connections_total", "rate(mysql_connections_total[$RANGE])", &[]),
		q_db("mysql_connections_aborted_total", "rate(mysql_connections_aborted_total[$RANGE])", &[]),
		q_db("mysql_traffic_received_bytes_total", "rate(mysql_traffic_received_bytes_total[$RANGE])", &[]),
		q_db("mysql_traffic_sent_bytes_total", "rate(mysql_traffic_sent_bytes_total[$RANGE])", &[]),
		q_db("mysql_queries_total", "rate(mysql_queries_total[$RANGE])", &[]),
		q_db("mysql_slow_queries_total", "rate(mysql_slow_queries_total[$RANGE])", &[]),
		q_db("mysql_top_table_io_wait_time_per_second", "mysql_top_table_io_wait_time_per_second", &["schema", "table", "operation"]),
		q_db("redis_up", "redis_up", &[]),
		q_db("redis_scrape_error", "redis_exporter_last_scrape_error", &["err"]),
		q_db("redis_instance_info", "redis_instance_info", &["redis_version", "role"]),
		q_db("redis_commands_duration_seconds_total", "rate(redis_commands_duration_seconds_total[$RANGE])", &["cmd"]),
		q_db("redis_commands_total", "rate(redis_commands_total[$RANGE])", &["cmd"]),
		q_db("mongo_up", "mongo_up", &[]),
		q_db("mongo_scrape_error", "mongo_scrape_error", &["error", "warning"]),
		q_db("mongo_info", "mongo_info", &["server_version"]),
		q_db("mongo_rs_status", "mongo_rs_status", &["rs", "role"]),
		q_db("mongo_rs_last_applied_timestamp_ms", "timestamp(mongo_rs_last_applied_timestamp_ms) - mongo_rs_last_applied_timestamp_ms/1000", &[]),
		q_db("memcached_up", "memcached_up", &[]),
		q_db("memcached_version", "memcached_version", &["version"]),
		q_db("memcached_limit_bytes", "memcached_limit_bytes", &[]),
		q_db("memcached_items_evicted_total", "rate(memcached_items_evicted_total[$RANGE])", &[]),
		q_db("memcached_commands_total", "rate(memcached_commands_total[$RANGE])", &["command", "status"]),
		q_jvm("container_jvm_info", "container_jvm_info", &["java_version"]),
		q_jvm("container_jvm_heap_size_bytes", "container_jvm_heap_size_bytes", &[]),
		q_jvm("container_jvm_heap_used_bytes", "container_jvm_heap_used_bytes", &[]),
		q_jvm("container_jvm_gc_time_seconds", "rate(container_jvm_gc_time_seconds[$RANGE])", &["gc"]),
		q_jvm("container_jvm_safepoint_time_seconds", "rate(container_jvm_safepoint_time_seconds[$RANGE])", &[]),
		q_jvm("container_jvm_safepoint_sync_time_seconds", "rate(container_jvm_safepoint_sync_time_seconds[$RANGE])", &[]),
		q_dotnet("container_dotnet_info", "container_dotnet_info", &["runtime_version"]),
		q_dotnet("container_dotnet_memory_allocated_bytes_total", "rate(container_dotnet_memory_allocated_bytes_total[$RANGE])", &[]),
		q_dotnet("container_dotnet_exceptions_total", "rate(container_dotnet_exceptions_total[$RANGE])", &[]),
		q_dotnet("container_dotnet_memory_heap_size_bytes", "container_dotnet_memory_heap_size_bytes", &["generation"]),
		q_dotnet("container_dotnet_gc_count_total", "rate(container_dotnet_gc_count_total[$RANGE])", &["generation"]),
		q_dotnet("container_dotnet_heap_fragmentation_percent", "container_dotnet_heap_fragmentation_percent", &[]),
		q_dotnet("container_dotnet_monitor_lock_contentions_total", "rate(container_dotnet_monitor_lock_contentions_total[$RANGE])", &[]),
		q_dotnet("container_dotnet_thread_pool_completed_items_total", "rate(container_dotnet_thread_pool_completed_items_total[$RANGE])", &[]),
		q_dotnet("container_dotnet_thread_pool_queue_length", "container_dotnet_thread_pool_queue_length", &[]),
		q_dotnet("container_dotnet_thread_pool_size", "container_dotnet_thread_pool_size", &[]),
		q("container_python_thread_lock_wait_time_seconds", "rate(container_python_thread_lock_wait_time_seconds[$RANGE])", &[]),
		q("container_nodejs_event_loop_blocked_time_seconds", "rate(container_nodejs_event_loop_blocked_time_seconds_total[$RANGE])", &[]),
		q_pod("fluxcd_git_repository_info", "fluxcd_git_repository_info", &["name", "namespace", "suspended", "url", "interval"]),
		q_pod("fluxcd_git_repository_status", "fluxcd_git_repository_status", &["name", "namespace", "type", "reason"]),
		q_pod("fluxcd_oci_repository_info", "fluxcd_oci_repository_info", &["name", "namespace", "suspended", "url", "interval"]),
		q_pod("fluxcd_oci_repository_status", "fluxcd_oci_repository_status", &["name", "namespace", "type", "reason"]),
		q_pod("fluxcd_helm_repository_info", "fluxcd_helm_repository_info", &["name", "namespace", "suspended", "url", "interval"]),
		q_pod("fluxcd_helm_repository_status", "fluxcd_helm_repository_status", &["name", "namespace", "type", "reason"]),
		q_pod(
			"fluxcd_helm_chart_info",
			"fluxcd_helm_chart_info",
			&["name", "namespace", "suspended", "chart", "interval", "version", "source_kind", "source_name", "source_namespace"],
		),
		q_pod("fluxcd_helm_chart_status", "fluxcd_helm_chart_status", &["name", "namespace", "type", "reason"]),
		q_pod(
			"fluxcd_helm_release_info",
			"fluxcd_helm_release_info",
			&[
				"name", "namespace", "suspended", "chart", "interval", "version", "source_kind", "source_name",
				"source_namespace", "chart_ref_kind", "chart_ref_name", "chart_ref_namespace", "target_namespace",
			],
		),
		q_pod("fluxcd_helm_release_status", "fluxcd_helm_release_status", &["name", "namespace", "type", "reason"]),
		q_pod(
			"fluxcd_kustomization_info",
			"fluxcd_kustomization_info",
			&[
				"name", "namespace", "suspended", "interval", "path", "source_kind", "source_name", "source_namespace",
				"target_namespace", "last_applied_revision", "last_attempted_revision",
			],
		),
		q_pod("fluxcd_kustomization_status", "fluxcd_kustomization_status", &["name", "namespace", "type", "reason"]),
		q_pod("fluxcd_kustomization_dependency_info", "fluxcd_kustomization_dependency_info", &["name", "namespace", "depends_on_name", "depends_on_namespace"]),
		q_pod("fluxcd_kustomization_inventory_entry_info", "fluxcd_kustomization_inventory_entry_info", &["name", "namespace", "entry_id"]),
		q_pod("fluxcd_resourceset_info", "fluxcd_resourceset_info", &["name", "namespace", "last_applied_revision"]),
		q_pod("fluxcd_resourceset_status", "fluxcd_resourceset_status", &["name", "namespace", "type", "reason"]),
		q_pod(
			"fluxcd_resourceset_dependency_info",
			"fluxcd_resourceset_dependency_info",
			&["name", "namespace", "depends_on_name", "depends_on_namespace", "depends_on_kind"],
		),
		q_pod("fluxcd_resourceset_inventory_entry_info", "fluxcd_resourceset_inventory_entry_info", &["name", "namespace", "entry_id"]),
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::collections::HashSet;

	#[test]
	fn query_names_are_unique() {
		let all = queries();
		let names: HashSet<&str> = all.iter().map(|q| q.name).collect();
		assert_eq!(names.len(), all.len(), "duplicate query name in the catalogue");
	}

	#[test]
	fn instance_to_instance_queries_carry_app_id() {
		for query in queries().into_iter().filter(|q| q.instance_to_instance) {
			assert!(query.labels.contains("app_id"), "{} missing app_id", query.name);
		}
	}

	#[test]
	fn range_templated_queries_contain_the_placeholder() {
		let rated = queries()
			.into_iter()
			.find(|q| q.name == "container_cpu_usage")
			.unwrap();
		assert!(rated.query.contains("$RANGE"));
	}
}
