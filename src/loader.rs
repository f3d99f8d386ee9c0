//! Document Loader
//!
//! Fetches the configured analysis documents concurrently, with a bounded
//! per-source retry chain, validates each against the required-section
//! schema and aggregates per-source outcomes. One slow or failing source
//! never serializes behind its siblings and never aborts them; only the
//! aggregate "nothing loaded" condition escalates to the caller.
//!
//! The HTTP mechanics hide behind [`DocumentTransport`], so the same engine
//! runs on reqwest natively and on gloo fetch in the browser. `?Send`
//! because browser futures are not `Send`; retry delays are non-blocking
//! pauses supplied by the transport.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::{validate_document, AnalysisDocument, SchemaError};
use crate::registry::DatasetRegistry;

/// One configured document source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub id: String,
    pub url: String,
    pub display_name: String,
}

impl SourceSpec {
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            display_name: display_name.into(),
        }
    }
}

/// Retry policy for a single source's fetch chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoaderConfig {
    /// Total attempts per source, including the first.
    pub retry_attempts: u32,
    /// Fixed delay between attempts.
    pub retry_delay: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            retry_attempts: 3,
            retry_delay: Duration::from_millis(1000),
        }
    }
}

/// Transport-level failure for one attempt.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("response body is not valid JSON: {0}")]
    Parse(String),
}

/// How one source ultimately failed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    /// Transport or HTTP-status failure on every attempt.
    #[error("fetch failed after {attempts} attempts: {last}")]
    Fetch { attempts: u32, last: String },

    /// The final attempt returned a body that is not JSON.
    #[error("parse failed after {attempts} attempts: {detail}")]
    Parse { attempts: u32, detail: String },

    /// JSON parsed but the document is schema-invalid. Not retried: the
    /// server already answered definitively.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Zero sources loaded successfully; fatal at startup.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("no analysis documents could be loaded")]
pub struct NoDataAvailable;

/// Capability to fetch a JSON document and to wait without blocking.
#[async_trait(?Send)]
pub trait DocumentTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError>;

    /// Non-blocking delay between retry attempts.
    async fn pause(&self, duration: Duration);
}

/// Per-source outcomes of one load pass, in declared source order.
#[derive(Debug)]
pub struct LoadReport {
    outcomes: Vec<(SourceSpec, Result<AnalysisDocument, LoadError>)>,
}

impl LoadReport {
    pub fn successes(&self) -> impl Iterator<Item = (&SourceSpec, &AnalysisDocument)> {
        self.outcomes
            .iter()
            .filter_map(|(source, outcome)| outcome.as_ref().ok().map(|doc| (source, doc)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&SourceSpec, &LoadError)> {
        self.outcomes
            .iter()
            .filter_map(|(source, outcome)| outcome.as_ref().err().map(|e| (source, e)))
    }

    /// Outcome for one source id, if it was part of this pass.
    pub fn outcome(&self, id: &str) -> Option<&Result<AnalysisDocument, LoadError>> {
        self.outcomes
            .iter()
            .find(|(source, _)| source.id == id)
            .map(|(_, outcome)| outcome)
    }

    pub fn loaded_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// Build the registry from the successful sources, in declared order,
    /// with the first successful source active.
    pub fn into_registry(self) -> Result<DatasetRegistry, NoDataAvailable> {
        let mut registry = DatasetRegistry::new();
        let mut first_id: Option<String> = None;

        for (source, outcome) in self.outcomes {
            match outcome {
                Ok(document) => {
                    if first_id.is_none() {
                        first_id = Some(source.id.clone());
                    }
                    registry.register(source.id, source.display_name, document);
                }
                Err(error) => {
                    tracing::warn!(
                        source = %source.id,
                        url = %source.url,
                        error = %error,
                        "source excluded from registry"
                    );
                }
            }
        }

        match first_id {
            Some(id) => {
                registry
                    .activate(&id)
                    .expect("first successful source is registered");
                Ok(registry)
            }
            None => Err(NoDataAvailable),
        }
    }
}

/// Fetch + validate engine over a [`DocumentTransport`].
pub struct DataLoader<T> {
    transport: T,
    config: LoaderConfig,
}

impl<T: DocumentTransport> DataLoader<T> {
    pub fn new(transport: T, config: LoaderConfig) -> Self {
        Self { transport, config }
    }

    /// Fetch every source concurrently and join on all of them. Each source
    /// resolves independently; the report distinguishes "failed" from
    /// "succeeded" per id.
    pub async fn load_all(&self, sources: &[SourceSpec]) -> LoadReport {
        let attempts = join_all(sources.iter().map(|source| self.load_one(source))).await;

        LoadReport {
            outcomes: sources.iter().cloned().zip(attempts).collect(),
        }
    }

    /// One source's retry chain: transport and parse failures retry up to
    /// the configured limit with a fixed delay; schema failures are final.
    async fn load_one(&self, source: &SourceSpec) -> Result<AnalysisDocument, LoadError> {
        let attempts = self.config.retry_attempts.max(1);
        let mut last_error: Option<TransportError> = None;

        for attempt in 1..=attempts {
            if attempt > 1 {
                tracing::debug!(
                    source = %source.id,
                    attempt,
                    delay_ms = self.config.retry_delay.as_millis() as u64,
                    "retrying fetch"
                );
                self.transport.pause(self.config.retry_delay).await;
            }

            match self.transport.get_json(&source.url).await {
                Ok(value) => {
                    let document = validate_document(value)?;
                    tracing::info!(source = %source.id, attempt, "document loaded");
                    return Ok(document);
                }
                Err(error) => {
                    tracing::warn!(
                        source = %source.id,
                        attempt,
                        error = %error,
                        "fetch attempt failed"
                    );
                    last_error = Some(error);
                }
            }
        }

        let last = last_error.expect("at least one attempt ran");
        Err(match last {
            TransportError::Parse(detail) => LoadError::Parse { attempts, detail },
            other => LoadError::Fetch {
                attempts,
                last: other.to_string(),
            },
        })
    }
}

/// reqwest-backed transport for the native CLI and server.
#[cfg(feature = "native")]
pub struct HttpTransport {
    client: reqwest::Client,
}

#[cfg(feature = "native")]
impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(feature = "native")]
impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "native")]
#[async_trait(?Send)]
impl DocumentTransport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| TransportError::Parse(e.to_string()))
    }

    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_value;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Scripted transport: a queue of responses per URL, instant pauses.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: RefCell<HashMap<String, Vec<Result<Value, TransportError>>>>,
        calls: RefCell<HashMap<String, u32>>,
        pauses: RefCell<u32>,
    }

    impl ScriptedTransport {
        fn script(&self, url: &str, responses: Vec<Result<Value, TransportError>>) {
            self.responses
                .borrow_mut()
                .insert(url.to_string(), responses);
        }

        fn calls_to(&self, url: &str) -> u32 {
            self.calls.borrow().get(url).copied().unwrap_or(0)
        }
    }

    #[async_trait(?Send)]
    impl DocumentTransport for ScriptedTransport {
        async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
            *self.calls.borrow_mut().entry(url.to_string()).or_insert(0) += 1;

            let mut responses = self.responses.borrow_mut();
            let queue = responses
                .get_mut(url)
                .unwrap_or_else(|| panic!("unscripted url {url}"));
            if queue.is_empty() {
                panic!("transport exhausted for {url}");
            }
            queue.remove(0)
        }

        async fn pause(&self, _duration: Duration) {
            *self.pauses.borrow_mut() += 1;
        }
    }

    fn network_err() -> Result<Value, TransportError> {
        Err(TransportError::Network("connection refused".to_string()))
    }

    fn sources(urls: &[(&str, &str)]) -> Vec<SourceSpec> {
        urls.iter()
            .map(|(id, url)| SourceSpec::new(*id, *url, id.to_uppercase()))
            .collect()
    }

    fn fast_config() -> LoaderConfig {
        LoaderConfig {
            retry_attempts: 3,
            retry_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn source_failing_twice_succeeds_on_third_attempt() {
        let transport = ScriptedTransport::default();
        transport.script(
            "/a.json",
            vec![network_err(), network_err(), Ok(sample_value())],
        );

        let loader = DataLoader::new(transport, fast_config());
        let report = loader.load_all(&sources(&[("a", "/a.json")])).await;

        assert_eq!(report.loaded_count(), 1);
        assert!(report.outcome("a").unwrap().is_ok());
        assert_eq!(loader.transport.calls_to("/a.json"), 3);
        // Two retry delays, one before each re-attempt.
        assert_eq!(*loader.transport.pauses.borrow(), 2);
    }

    #[tokio::test]
    async fn exhausted_source_is_failed_while_siblings_load() {
        let transport = ScriptedTransport::default();
        transport.script(
            "/bad.json",
            vec![
                Err(TransportError::Status { status: 500 }),
                Err(TransportError::Status { status: 500 }),
                Err(TransportError::Status { status: 500 }),
            ],
        );
        transport.script("/good.json", vec![Ok(sample_value())]);

        let loader = DataLoader::new(transport, fast_config());
        let report = loader
            .load_all(&sources(&[("bad", "/bad.json"), ("good", "/good.json")]))
            .await;

        assert_eq!(report.loaded_count(), 1);
        assert_eq!(report.failed_count(), 1);
        match report.outcome("bad").unwrap() {
            Err(LoadError::Fetch { attempts, last }) => {
                assert_eq!(*attempts, 3);
                assert!(last.contains("500"));
            }
            other => panic!("expected fetch failure, got {other:?}"),
        }
        assert!(report.outcome("good").unwrap().is_ok());
    }

    #[tokio::test]
    async fn parse_failure_retries_and_reports_as_parse() {
        let transport = ScriptedTransport::default();
        transport.script(
            "/mangled.json",
            vec![
                Err(TransportError::Parse("expected value".to_string())),
                Err(TransportError::Parse("expected value".to_string())),
                Err(TransportError::Parse("expected value".to_string())),
            ],
        );

        let loader = DataLoader::new(transport, fast_config());
        let report = loader.load_all(&sources(&[("m", "/mangled.json")])).await;

        assert!(matches!(
            report.outcome("m").unwrap(),
            Err(LoadError::Parse { attempts: 3, .. })
        ));
    }

    #[tokio::test]
    async fn schema_failure_is_final_and_lists_missing_sections() {
        let mut invalid = sample_value();
        invalid.as_object_mut().unwrap().remove("metadata");
        invalid.as_object_mut().unwrap().remove("tfidf_analysis");

        let transport = ScriptedTransport::default();
        transport.script("/invalid.json", vec![Ok(invalid)]);

        let loader = DataLoader::new(transport, fast_config());
        let report = loader.load_all(&sources(&[("i", "/invalid.json")])).await;

        match report.outcome("i").unwrap() {
            Err(LoadError::Schema(SchemaError::MissingSections { missing })) => {
                assert_eq!(missing, &["metadata", "tfidf_analysis"]);
            }
            other => panic!("expected schema failure, got {other:?}"),
        }
        // No retry after a definitive answer.
        assert_eq!(loader.transport.calls_to("/invalid.json"), 1);
    }

    #[tokio::test]
    async fn end_to_end_registry_from_mixed_outcomes() {
        let mut invalid = sample_value();
        invalid.as_object_mut().unwrap().remove("negation_analysis");

        let transport = ScriptedTransport::default();
        transport.script("/facebook.json", vec![Ok(sample_value())]);
        transport.script("/linkedin.json", vec![Ok(invalid)]);
        transport.script("/reddit.json", vec![Ok(sample_value())]);
        transport.script("/x.json", vec![Ok(sample_value())]);

        let loader = DataLoader::new(transport, fast_config());
        let report = loader
            .load_all(&sources(&[
                ("facebook", "/facebook.json"),
                ("linkedin", "/linkedin.json"),
                ("reddit", "/reddit.json"),
                ("x", "/x.json"),
            ]))
            .await;

        assert_eq!(report.loaded_count(), 3);

        let registry = report.into_registry().unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.available_ids(), vec!["facebook", "reddit", "x"]);
        assert_eq!(registry.active_id(), Some("facebook"));
    }

    #[tokio::test]
    async fn first_successful_source_becomes_active_when_the_first_declared_fails() {
        let transport = ScriptedTransport::default();
        transport.script(
            "/down.json",
            vec![network_err(), network_err(), network_err()],
        );
        transport.script("/up.json", vec![Ok(sample_value())]);

        let loader = DataLoader::new(transport, fast_config());
        let report = loader
            .load_all(&sources(&[("down", "/down.json"), ("up", "/up.json")]))
            .await;

        let registry = report.into_registry().unwrap();
        assert_eq!(registry.active_id(), Some("up"));
    }

    #[tokio::test]
    async fn zero_successes_is_no_data_available() {
        let transport = ScriptedTransport::default();
        transport.script(
            "/only.json",
            vec![network_err(), network_err(), network_err()],
        );

        let loader = DataLoader::new(transport, fast_config());
        let report = loader.load_all(&sources(&[("only", "/only.json")])).await;

        assert_eq!(report.loaded_count(), 0);
        assert_eq!(report.into_registry().unwrap_err(), NoDataAvailable);
    }
}
