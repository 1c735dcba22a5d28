//! HTTP server wiring for the people registry.
//!
//! Holds the runtime configuration and assembles the application router:
//! the JSON API under `/api/v1`, wrapped in request tracing.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use people_api::PagingConfig;
use people_core::store::PersonStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Path prefix the JSON API is mounted under.
pub const API_PREFIX: &str = "/api/v1";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PEOPLE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  pub store_path:        PathBuf,
  #[serde(default = "default_page_size")]
  pub default_page_size: u32,
  #[serde(default = "max_page_size")]
  pub max_page_size:     u32,
}

fn default_page_size() -> u32 { PagingConfig::default().default_size }

fn max_page_size() -> u32 { PagingConfig::default().max_size }

impl ServerConfig {
  /// Paging bounds for list requests. A zero maximum is raised to 1 and the
  /// default is kept within `1..=max`.
  pub fn paging(&self) -> PagingConfig {
    let max_size = self.max_page_size.max(1);
    PagingConfig {
      default_size: self.default_page_size.clamp(1, max_size),
      max_size,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: PersonStore + 'static,
{
  Router::new()
    .nest(API_PREFIX, people_api::api_router(store, config.paging()))
    .layer(TraceLayer::new_for_http())
}
