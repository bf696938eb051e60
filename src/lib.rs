pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod metrics;
pub mod server;

pub use client::{SabnzbdApi, SabnzbdClient};
pub use error::{Error, Result};
pub use metrics::collector::MetricsCollector;
pub use metrics::sample::{Collection, MetricSample};
pub use server::build_app;
