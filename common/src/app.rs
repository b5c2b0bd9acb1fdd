use std::fmt;

/// The Kubernetes (or external) workload kind an application is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApplicationKind {
	Deployment,
	StatefulSet,
	DaemonSet,
	CronJob,
	Pod,
	ExternalService,
}

impl fmt::Display for ApplicationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			ApplicationKind::Deployment => "Deployment",
			ApplicationKind::StatefulSet => "StatefulSet",
			ApplicationKind::DaemonSet => "DaemonSet",
			ApplicationKind::CronJob => "CronJob",
			ApplicationKind::Pod => "Pod",
			ApplicationKind::ExternalService => "ExternalService",
		};
		f.write_str(s)
	}
}

/// `(Kind, Namespace, Name)` — the identity of a logical workload.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApplicationId {
	pub kind: ApplicationKind,
	pub namespace: String,
	pub name: String,
}

impl ApplicationId {
	pub fn new(
		kind: ApplicationKind,
		namespace: impl Into<String>,
		name: impl Into<String>,
	) -> Self {
		Self {
			kind,
			namespace: namespace.into(),
			name: name.into(),
		}
	}
}

/// `namespace/kind/name`, or the empty-namespace form `kind/name` —
/// the bit-exact label value format recording rules emit for `app`/
/// `dest` labels (spec §6).
impl fmt::Display for ApplicationId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.namespace.is_empty() {
			write!(f, "{}/{}", self.kind, self.name)
		} else {
			write!(f, "{}/{}/{}", self.namespace, self.kind, self.name)
		}
	}
}

/// Coarse classification of an application, used to decide whether its
/// traffic should be counted symmetrically in cross-application
/// aggregates (see the L7 histogram sidecar-suppression rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApplicationCategory {
	Application,
	ControlPlane,
	Monitoring,
	Database,
	Queue,
}

impl ApplicationCategory {
	/// Auxiliary applications (infrastructure-level workloads such as
	/// the monitoring stack itself) would inflate cross-application
	/// aggregates if counted symmetrically with real application
	/// traffic.
	pub fn is_auxiliary(&self) -> bool {
		matches!(
			self,
			ApplicationCategory::ControlPlane | ApplicationCategory::Monitoring
		)
	}
}

/// L7 protocol tag, lowercase by construction so it matches the wire
/// label value directly (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Protocol {
	Http,
	Postgres,
	Redis,
	Mongo,
	Mysql,
	Memcached,
	Kafka,
	Cassandra,
	Clickhouse,
	Zookeeper,
	Foundationdb,
	Rabbitmq,
	Nats,
}

impl fmt::Display for Protocol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Protocol::Http => "http",
			Protocol::Postgres => "postgres",
			Protocol::Redis => "redis",
			Protocol::Mongo => "mongo",
			Protocol::Mysql => "mysql",
			Protocol::Memcached => "memcached",
			Protocol::Kafka => "kafka",
			Protocol::Cassandra => "cassandra",
			Protocol::Clickhouse => "clickhouse",
			Protocol::Zookeeper => "zookeeper",
			Protocol::Foundationdb => "foundationdb",
			Protocol::Rabbitmq => "rabbitmq",
			Protocol::Nats => "nats",
		};
		f.write_str(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn application_id_display_matches_dashboard_convention() {
		let id = ApplicationId::new(ApplicationKind::Deployment, "prod", "checkout");
		assert_eq!(id.to_string(), "prod/Deployment/checkout");

		let id = ApplicationId::new(ApplicationKind::ExternalService, "", "8.8.8.8");
		assert_eq!(id.to_string(), "ExternalService/8.8.8.8");
	}

	#[test]
	fn auxiliary_categories() {
		assert!(ApplicationCategory::Monitoring.is_auxiliary());
		assert!(!ApplicationCategory::Application.is_auxiliary());
	}
}
