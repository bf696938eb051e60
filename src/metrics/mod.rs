pub mod collector;
pub mod descriptor;
pub mod exposition;
pub mod sample;

pub use collector::MetricsCollector;
pub use descriptor::MetricDescriptor;
pub use sample::{Collection, MetricSample};
