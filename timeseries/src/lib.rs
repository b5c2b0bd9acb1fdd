pub mod aggregate;
pub mod histogram;
pub mod series;
pub mod window;

pub use aggregate::Aggregate;
pub use histogram::Histogram;
pub use series::{defined, div, nan_sum, TimeSeries};
pub use window::Window;
