//! Browser Transport
//!
//! gloo-net implementation of the core loader's transport seam, plus the
//! startup call that shares the server's source configuration with the
//! dashboard. When the configuration endpoint is unreachable (e.g. the
//! documents are hosted as bare static files), the built-in defaults apply.

use std::time::Duration;

use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;

use sentiscope::loader::{DocumentTransport, LoaderConfig, SourceSpec, TransportError};

/// Fetch-API transport for the browser.
pub struct GlooTransport;

#[async_trait(?Send)]
impl DocumentTransport for GlooTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(TransportError::Status {
                status: response.status(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| TransportError::Parse(e.to_string()))
    }

    async fn pause(&self, duration: Duration) {
        TimeoutFuture::new(duration.as_millis() as u32).await;
    }
}

/// Sources and retry policy the dashboard should load with.
pub struct DashboardConfig {
    pub sources: Vec<SourceSpec>,
    pub loader: LoaderConfig,
}

#[derive(serde::Deserialize)]
struct SourcesResponse {
    sources: Vec<SourceEntry>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

#[derive(serde::Deserialize)]
struct SourceEntry {
    id: String,
    url: String,
    display_name: String,
}

/// Built-in source list used when the configuration endpoint is absent.
fn default_config() -> DashboardConfig {
    let sources = [
        ("facebook", "facebook_analisis_completo.json", "Facebook"),
        ("linkedin", "linkedin_analisis_completo.json", "LinkedIn"),
        ("reddit", "reddit_analisis_completo.json", "Reddit"),
        ("x", "x_analisis_completo.json", "X (Twitter)"),
    ]
    .into_iter()
    .map(|(id, file, name)| SourceSpec::new(id, format!("/resultados/{file}"), name))
    .collect();

    DashboardConfig {
        sources,
        loader: LoaderConfig::default(),
    }
}

/// Ask the hosting server for its source configuration, falling back to the
/// defaults on any failure.
pub async fn fetch_dashboard_config() -> DashboardConfig {
    let response = match Request::get("/api/v1/sources").send().await {
        Ok(response) if response.ok() => response,
        _ => {
            web_sys::console::warn_1(
                &"source configuration endpoint unavailable, using defaults".into(),
            );
            return default_config();
        }
    };

    match response.json::<SourcesResponse>().await {
        Ok(body) => DashboardConfig {
            sources: body
                .sources
                .into_iter()
                .map(|s| SourceSpec::new(s.id, s.url, s.display_name))
                .collect(),
            loader: LoaderConfig {
                retry_attempts: body.retry_attempts,
                retry_delay: Duration::from_millis(body.retry_delay_ms),
            },
        },
        Err(e) => {
            web_sys::console::warn_1(
                &format!("malformed source configuration ({e}), using defaults").into(),
            );
            default_config()
        }
    }
}
