//! JSON REST API for the people registry.
//!
//! Exposes an axum [`Router`] backed by any [`people_core::store::PersonStore`],
//! plus its OpenAPI description at `/openapi.json`.
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", people_api::api_router(store.clone(), PagingConfig::default()))
//! ```

pub mod error;
pub mod openapi;
pub mod people;

use std::sync::Arc;

use axum::{Router, routing::get};
use people_core::store::PersonStore;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Bounds applied to the `size` query parameter of list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PagingConfig {
  /// Used when `size` is absent or below 1.
  pub default_size: u32,
  /// Larger requested sizes are clamped to this.
  pub max_size:     u32,
}

impl Default for PagingConfig {
  fn default() -> Self { Self { default_size: 20, max_size: 2000 } }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub paging: PagingConfig,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), paging: self.paging }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, paging: PagingConfig) -> Router<()>
where
  S: PersonStore + 'static,
{
  Router::new()
    .route("/openapi.json", get(openapi::openapi_json))
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route(
      "/people/{id}",
      get(people::get_one::<S>)
        .put(people::update::<S>)
        .patch(people::update::<S>)
        .delete(people::delete_one::<S>),
    )
    .with_state(ApiState { store, paging })
}
