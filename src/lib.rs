//! # doc-convert
//!
//! Async client library for document conversion services.
//!
//! ## Design Philosophy
//!
//! doc-convert is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to per-session events and bind
//!   their own UI side effects
//! - **Fail-fast** - Invalid requests are rejected locally before any network
//!   traffic
//! - **Total over failures** - Every failure the service can report (including
//!   codes it cannot report yet) renders a defined, human-readable message
//!
//! ## Quick Start
//!
//! ```no_run
//! use doc_convert::{Config, ConversionRequest, ConvertClient, EndpointConfig, JobOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         endpoint: EndpointConfig {
//!             base_url: "http://wiki.example.com".to_string(),
//!             ..EndpointConfig::default()
//!         },
//!         ..Config::default()
//!     };
//!
//!     let client = ConvertClient::new(config)?;
//!
//!     let request = ConversionRequest::new("report", "pdf", "12884901890", "65601")
//!         .download_as(true);
//!
//!     match client.convert(request).await? {
//!         JobOutcome::Completed { file_url } => {
//!             let artifact = client.fetch_artifact(&file_url).await?;
//!             println!("converted: {} bytes", artifact.len());
//!         }
//!         JobOutcome::Failed(error) => eprintln!("{}", error.message),
//!         JobOutcome::Cancelled => {}
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Failure classification and message rendering
pub mod classify;
/// Core client implementation (decomposed into focused submodules)
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Known document formats and conversion targets
pub mod formats;
/// Core types and events
pub mod types;
/// Pre-flight request validation
pub mod validate;

// Re-export commonly used types
pub use classify::{ClassifiedError, MessageCatalog, MessageKey};
pub use client::{ConversionHandle, ConvertClient};
pub use config::{Config, EndpointConfig, PollingConfig};
pub use error::{Error, Result, TransportError, ValidationError};
pub use formats::DocumentType;
pub use types::{ConversionRequest, ConversionStatus, ErrorCode, Event, JobOutcome, SessionId};
