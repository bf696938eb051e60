//! Prometheus text rendering of a [`Collection`].

use crate::metrics::descriptor::MetricDescriptor;
use crate::metrics::sample::Collection;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Renders `collection` as Prometheus text exposition.
///
/// Each scrape gets its own registry so that series from earlier scrapes,
/// such as a server that has disappeared upstream, are never carried over.
/// Descriptors without samples are left out of the output.
pub fn render(
    descriptors: &[MetricDescriptor],
    collection: &Collection,
) -> prometheus::Result<String> {
    let registry = Registry::new();

    for descriptor in descriptors {
        let gauges = GaugeVec::new(
            Opts::new(descriptor.name, descriptor.help),
            descriptor.labels,
        )?;

        for sample in collection.of(descriptor.name) {
            let values: Vec<&str> = sample.label_values.iter().map(String::as_str).collect();
            gauges.get_metric_with_label_values(&values)?.set(sample.value);
        }

        registry.register(Box::new(gauges))?;
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::descriptor::{self, ALL};

    fn collection() -> Collection {
        let mut c = Collection::default();
        c.push(&descriptor::TOTAL_DOWNLOADED, &["total"], 4096.0);
        c.push(&descriptor::SERVER_TOTAL_DOWNLOADED, &["day", "news.example.com"], 12.0);
        c.push(&descriptor::QUEUE_REMAINING_TIME_SECONDS, &[], 3723.0);
        c
    }

    #[test]
    fn test_render_samples() {
        let text = render(&ALL, &collection()).unwrap();

        assert!(text.contains("# HELP total_downloaded SabNzbd Overall total number of bytes downloaded"));
        assert!(text.contains("# TYPE total_downloaded gauge"));
        assert!(text.contains("total_downloaded{period=\"total\"} 4096"));
        assert!(text.contains("server_total_downloaded{period=\"day\",server=\"news.example.com\"} 12"));
        assert!(text.contains("queue_remaining_time_seconds 3723"));
    }

    #[test]
    fn test_render_skips_descriptors_without_samples() {
        let text = render(&ALL, &collection()).unwrap();
        assert!(!text.contains("queue_size"));
        assert!(!text.contains("speed_limit"));
    }

    #[test]
    fn test_render_empty_collection() {
        let text = render(&ALL, &Collection::default()).unwrap();
        assert!(text.is_empty());
    }
}
