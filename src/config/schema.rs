use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_LISTEN_ADDRESS: &str = ":8081";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExporterConfig {
    #[serde(default = "default_listen_address")]
    #[validate(length(min = 1))]
    pub listen_address: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "set --sabnzbd-uri or SABNZBD_URI"))]
    pub sabnzbd_uri: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "set --sabnzbd-apikey or SABNZBD_APIKEY"))]
    pub sabnzbd_apikey: String,

    /// Per-request timeout for upstream calls.
    #[serde(default = "default_timeout")]
    #[validate(range(min = 1))]
    pub sabnzbd_timeout_secs: u64,
}

impl ExporterConfig {
    /// Bindable socket address. A bare `:PORT` listens on all interfaces.
    pub fn bind_address(&self) -> String {
        if self.listen_address.starts_with(':') {
            format!("0.0.0.0{}", self.listen_address)
        } else {
            self.listen_address.clone()
        }
    }
}

/// Values given on the command line. `None` leaves lower layers in place.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen_address: Option<String>,
    pub sabnzbd_uri: Option<String>,
    pub sabnzbd_apikey: Option<String>,
    pub sabnzbd_timeout_secs: Option<u64>,
}

fn default_listen_address() -> String {
    DEFAULT_LISTEN_ADDRESS.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
