pub mod app;
pub mod labels;
pub mod level;

pub use app::{ApplicationCategory, ApplicationId, ApplicationKind, Protocol};
pub use labels::{Labels, LabelsHash};
pub use level::LogLevel;
