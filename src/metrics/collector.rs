use crate::client::{PeriodTotals, Queue, SabnzbdApi};
use crate::convert;
use crate::error::Result;
use crate::metrics::descriptor::{self, MetricDescriptor};
use crate::metrics::sample::Collection;
use std::sync::Arc;

/// Translates SABnzbd API state into metric samples at scrape time.
///
/// Every call to [`MetricsCollector::collect`] performs exactly one
/// `server_stats` and one `queue` request, one after the other. Nothing is
/// cached between scrapes.
#[derive(Clone)]
pub struct MetricsCollector {
    api: Arc<dyn SabnzbdApi>,
}

/// Derived queue values, converted before any queue sample is emitted.
struct QueueValues {
    size: f64,
    bytes_per_second: f64,
    remaining_bytes: f64,
    total_size_bytes: f64,
    remaining_seconds: f64,
}

impl QueueValues {
    fn from_queue(queue: &Queue) -> Result<Self> {
        Ok(Self {
            size: queue.noofslots_total as f64,
            bytes_per_second: convert::kilobytes("kbpersec", &queue.kbpersec)?,
            remaining_bytes: convert::megabytes("mbleft", &queue.mbleft)?,
            total_size_bytes: convert::megabytes("mb", &queue.mb)?,
            remaining_seconds: convert::clock_seconds("timeleft", &queue.timeleft)? as f64,
        })
    }
}

impl MetricsCollector {
    pub fn new(api: Arc<dyn SabnzbdApi>) -> Self {
        Self { api }
    }

    /// Descriptors this collector may emit samples for.
    pub fn describe(&self) -> &'static [MetricDescriptor] {
        &descriptor::ALL
    }

    /// Runs one collection cycle.
    ///
    /// Failures never propagate: the returned [`Collection`] holds whatever
    /// was gathered before the failing step, along with the error.
    pub async fn collect(&self) -> Collection {
        log::debug!("collecting");
        let mut collection = Collection::default();

        if let Err(e) = self.collect_into(&mut collection).await {
            log::error!(
                "scrape stopped after {} samples: {}",
                collection.samples.len(),
                e
            );
            collection.error = Some(e);
        }

        collection
    }

    async fn collect_into(&self, out: &mut Collection) -> Result<()> {
        let stats = self.api.server_stats().await?;

        push_periods(out, &descriptor::TOTAL_DOWNLOADED, &stats.totals, None);
        for (server, server_stats) in &stats.servers {
            push_periods(
                out,
                &descriptor::SERVER_TOTAL_DOWNLOADED,
                &server_stats.totals,
                Some(server.as_str()),
            );
        }

        let queue = self.api.queue().await?;
        let values = QueueValues::from_queue(&queue)?;

        out.push(&descriptor::QUEUE_SIZE, &[], values.size);
        out.push(
            &descriptor::QUEUE_DOWNLOAD_BYTES_PER_SECOND,
            &[],
            values.bytes_per_second,
        );
        out.push(&descriptor::QUEUE_REMAINING_BYTES, &[], values.remaining_bytes);
        out.push(&descriptor::QUEUE_TOTAL_SIZE_BYTES, &[], values.total_size_bytes);
        out.push(
            &descriptor::QUEUE_REMAINING_TIME_SECONDS,
            &[],
            values.remaining_seconds,
        );

        Ok(())
    }
}

fn push_periods(
    out: &mut Collection,
    descriptor: &'static MetricDescriptor,
    totals: &PeriodTotals,
    server: Option<&str>,
) {
    let periods = [
        ("total", totals.total),
        ("month", totals.month),
        ("week", totals.week),
        ("day", totals.day),
    ];

    for (period, bytes) in periods {
        match server {
            Some(server) => out.push(descriptor, &[period, server], bytes as f64),
            None => out.push(descriptor, &[period], bytes as f64),
        }
    }
}
