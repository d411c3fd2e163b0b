//! HTTP client for the monitor server's `/monitor/api/*` endpoints.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::alerts::{AlertEvent, ThresholdConfig};
use crate::error::{ConfigError, FetchError};
use crate::types::MetricSample;

pub const SAMPLE_PATH: &str = "monitor/api/all";
pub const CONFIG_PATH: &str = "monitor/api/config";
pub const ALERTS_PATH: &str = "monitor/api/log-alerts";

/// Everything the scheduler needs from the server.
#[async_trait]
pub trait MonitorApi: Send + Sync + 'static {
    async fn fetch_sample(&self) -> Result<MetricSample, FetchError>;

    async fn fetch_thresholds(&self) -> Result<ThresholdConfig, FetchError>;

    async fn post_alerts(&self, alerts: &[AlertEvent]) -> Result<(), FetchError>;
}

#[derive(Serialize)]
struct AlertBatch<'a> {
    alerts: &'a [AlertEvent],
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpApi {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let base = parse_base_url(base)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|e| FetchError::Transport(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let resp = self.client.get(self.endpoint(path)?).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MonitorApi for HttpApi {
    async fn fetch_sample(&self) -> Result<MetricSample, FetchError> {
        self.get_json(SAMPLE_PATH).await
    }

    async fn fetch_thresholds(&self) -> Result<ThresholdConfig, FetchError> {
        self.get_json(CONFIG_PATH).await
    }

    async fn post_alerts(&self, alerts: &[AlertEvent]) -> Result<(), FetchError> {
        self.client
            .post(self.endpoint(ALERTS_PATH)?)
            .json(&AlertBatch { alerts })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Accepts `http(s)://host[:port][/prefix]`; the path always ends in `/`
/// so endpoint joins append instead of replacing the last segment.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Load thresholds once; any failure leaves the defaults in effect.
pub async fn load_thresholds<A: MonitorApi + ?Sized>(api: &A) -> ThresholdConfig {
    match api.fetch_thresholds().await {
        Ok(cfg) => {
            tracing::info!(?cfg, "loaded alert thresholds from server");
            cfg.validated()
        }
        Err(e) => {
            tracing::warn!(error = %e, "threshold config unavailable, using defaults");
            ThresholdConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let u = parse_base_url("http://127.0.0.1:8000").unwrap();
        assert_eq!(u.join(SAMPLE_PATH).unwrap().as_str(), "http://127.0.0.1:8000/monitor/api/all");
        let u = parse_base_url("https://example.org/srv").unwrap();
        assert_eq!(
            u.join(CONFIG_PATH).unwrap().as_str(),
            "https://example.org/srv/monitor/api/config"
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            parse_base_url("ws://host:3000/ws"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(parse_base_url("not a url").is_err());
    }
}
