//! The `PersonStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `people-store-sqlite`).
//! Higher layers (`people-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  page::{Page, PageRequest},
  person::{NewPerson, Person, PersonId},
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a person record store backend.
///
/// Each write is atomic. Backends should enforce IPN uniqueness themselves
/// and report a violation as [`crate::Error::DuplicateIpn`] through the
/// `Into<crate::Error>` conversion; the application-level check in
/// [`crate::uniqueness`] runs first but is not race-free on its own.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  /// Retrieve a person by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Retrieve the person holding `ipn`, if any.
  fn find_by_ipn<'a>(
    &'a self,
    ipn: &'a str,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;

  /// Return one page of people ordered as `request.sort` asks.
  fn find_all<'a>(
    &'a self,
    request: &'a PageRequest,
  ) -> impl Future<Output = Result<Page<Person>, Self::Error>> + Send + 'a;

  /// Persist `person`.
  ///
  /// - `id: None` inserts a new record and assigns its id.
  /// - `id: Some(_)` overwrites the existing record with that id.
  fn save(
    &self,
    id: Option<PersonId>,
    person: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Remove the person with `id`. Callers confirm existence first.
  fn delete_by_id(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
