//! # Sentiscope
//!
//! Sentiment Analysis Dashboard - renders pre-computed sentiment-analysis
//! results (static JSON documents) into an interactive browser dashboard:
//! metric cards, text summaries, and ~20 chart widgets across tabbed
//! sections.
//!
//! There is no algorithmic core here: polarity, TF-IDF scores, n-grams and
//! emotion counts are produced by the upstream analysis pipeline and only
//! displayed. What this crate owns is the JSON-to-visualization binding
//! layer:
//!
//! - [`loader`]: concurrent fetch of the configured documents with bounded
//!   per-source retries, schema validation, per-source outcome aggregation
//! - [`registry`]: all loaded documents plus the single active pointer
//! - [`lifecycle`]: the destroy-before-create widget discipline
//! - [`bindings`]: the fixed catalogue of pure document-to-widget mappings
//! - [`text`]: best-effort narrative highlight extraction
//!
//! Everything above compiles to wasm32 and is consumed by the Leptos
//! frontend in `sentiscope-ui/`. The `native` feature (default) adds
//! [`config`], the [`server`] that hosts the dashboard and documents, and
//! the reqwest transport used by the CLI.

pub mod bindings;
pub mod lifecycle;
pub mod loader;
pub mod model;
pub mod registry;
pub mod text;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod server;

// Re-export top-level types for convenience
pub use model::{validate_document, AnalysisDocument, SchemaError, REQUIRED_SECTIONS};

pub use registry::{DatasetRegistry, RegistryError};

pub use lifecycle::{ChartLifecycleManager, LifecycleError, Widget, WidgetRenderFailure};

pub use loader::{
    DataLoader, DocumentTransport, LoadError, LoadReport, LoaderConfig, NoDataAvailable,
    SourceSpec, TransportError,
};

pub use bindings::{run_catalogue, BindingSpec, ChartDescription, WidgetSpec, CATALOGUE};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
