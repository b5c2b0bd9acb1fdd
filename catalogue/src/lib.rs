pub mod query;
pub mod tables;
pub mod templates;

pub use query::{
	q, q_db, q_dotnet, q_fargate_container, q_itoi, q_jvm, q_pod, q_rds, LabelSet, Query,
};
pub use tables::queries;
