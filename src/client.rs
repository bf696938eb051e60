use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

pub const MODE_SERVER_STATS: &str = "server_stats";
pub const MODE_QUEUE: &str = "queue";

/// Bytes transferred per period, as reported by `mode=server_stats`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PeriodTotals {
    pub day: i64,
    pub week: i64,
    pub month: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServerTotals {
    #[serde(flatten)]
    pub totals: PeriodTotals,
    /// Per-day byte counts keyed by date. Not exported.
    #[serde(default)]
    pub daily: HashMap<String, i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServerStats {
    #[serde(flatten)]
    pub totals: PeriodTotals,
    #[serde(default)]
    pub servers: HashMap<String, ServerTotals>,
}

/// Envelope of the `mode=queue` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueueResponse {
    pub queue: Queue,
}

/// The subset of the queue object the exporter reads. Sizes and rates are
/// strings on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Queue {
    pub noofslots_total: i64,
    pub kbpersec: String,
    pub mbleft: String,
    pub mb: String,
    pub timeleft: String,
    #[serde(default)]
    pub speedlimit: String,
    #[serde(default)]
    pub speedlimit_abs: String,
}

/// Read-only view of the SABnzbd API used by the collector.
#[async_trait]
pub trait SabnzbdApi: Send + Sync {
    async fn server_stats(&self) -> Result<ServerStats>;
    async fn queue(&self) -> Result<Queue>;
}

pub struct SabnzbdClient {
    client: Client,
    api_url: Url,
    api_key: String,
}

impl SabnzbdClient {
    pub fn new(base_uri: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_url = Url::parse(&format!("{}/api", base_uri.trim_end_matches('/')))?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sabnzbd-exporter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url,
            api_key: api_key.into(),
        })
    }

    fn mode_url(&self, mode: &str) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("output", "json")
            .append_pair("apikey", &self.api_key)
            .append_pair("mode", mode);
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, mode: &'static str) -> Result<T> {
        let url = self.mode_url(mode);
        log::debug!("GET {}", redacted(&url));

        // reqwest errors embed the request url, which carries the api key.
        let res = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(reqwest::Error::without_url)?;
        let body = res.bytes().await.map_err(reqwest::Error::without_url)?;
        log::debug!("`{}` response: {} bytes", mode, body.len());

        serde_json::from_slice(&body).map_err(|source| Error::Decode { mode, source })
    }
}

#[async_trait]
impl SabnzbdApi for SabnzbdClient {
    async fn server_stats(&self) -> Result<ServerStats> {
        self.fetch(MODE_SERVER_STATS).await
    }

    async fn queue(&self) -> Result<Queue> {
        let response: QueueResponse = self.fetch(MODE_QUEUE).await?;
        Ok(response.queue)
    }
}

/// Renders `url` with the api key masked, for logging.
fn redacted(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "apikey" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
