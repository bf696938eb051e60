/// Static definition of one exported metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
}

impl MetricDescriptor {
    pub const fn new(
        name: &'static str,
        help: &'static str,
        labels: &'static [&'static str],
    ) -> Self {
        Self { name, help, labels }
    }
}

pub const TOTAL_DOWNLOADED: MetricDescriptor = MetricDescriptor::new(
    "total_downloaded",
    "SabNzbd Overall total number of bytes downloaded",
    &["period"],
);

pub const SERVER_TOTAL_DOWNLOADED: MetricDescriptor = MetricDescriptor::new(
    "server_total_downloaded",
    "SabNzbd per server total number of bytes downloaded",
    &["period", "server"],
);

pub const QUEUE_SIZE: MetricDescriptor =
    MetricDescriptor::new("queue_size", "Remaining number of items in queue", &[]);

pub const QUEUE_DOWNLOAD_BYTES_PER_SECOND: MetricDescriptor = MetricDescriptor::new(
    "queue_download_bytes_per_second",
    "Current download rate in bytes/second",
    &[],
);

pub const QUEUE_REMAINING_BYTES: MetricDescriptor = MetricDescriptor::new(
    "queue_remaining_bytes",
    "Remaining number of bytes in queue",
    &[],
);

pub const QUEUE_TOTAL_SIZE_BYTES: MetricDescriptor = MetricDescriptor::new(
    "queue_total_size_bytes",
    "Total number of bytes in queue",
    &[],
);

pub const QUEUE_REMAINING_TIME_SECONDS: MetricDescriptor = MetricDescriptor::new(
    "queue_remaining_time_seconds",
    "Remaining time in seconds in queue",
    &[],
);

// Declared but never populated by the collector, see DESIGN.md.
pub const SPEED_LIMIT_USED_PERCENTAGE: MetricDescriptor = MetricDescriptor::new(
    "speed_limit_used_percentage",
    "Percentage of speed limit used",
    &[],
);

pub const SPEED_LIMIT_ABSOLUTE: MetricDescriptor =
    MetricDescriptor::new("speed_limit_absolute", "Speed limit in bytes", &[]);

/// Every descriptor the exporter declares, in exposition order.
pub const ALL: [MetricDescriptor; 9] = [
    TOTAL_DOWNLOADED,
    SERVER_TOTAL_DOWNLOADED,
    QUEUE_SIZE,
    QUEUE_DOWNLOAD_BYTES_PER_SECOND,
    QUEUE_REMAINING_BYTES,
    QUEUE_TOTAL_SIZE_BYTES,
    QUEUE_REMAINING_TIME_SECONDS,
    SPEED_LIMIT_USED_PERCENTAGE,
    SPEED_LIMIT_ABSOLUTE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = ALL.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_label_names() {
        assert_eq!(TOTAL_DOWNLOADED.labels, &["period"]);
        assert_eq!(SERVER_TOTAL_DOWNLOADED.labels, &["period", "server"]);
        for d in &ALL[2..] {
            assert!(d.labels.is_empty(), "{} should be unlabeled", d.name);
        }
    }
}
