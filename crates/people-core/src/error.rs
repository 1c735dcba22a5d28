//! Error types for `people-core`.

use thiserror::Error;

use crate::{person::PersonId, validation::Violation};

#[derive(Debug, Error)]
pub enum Error {
  /// One or more field rules failed. Always carries every violation found.
  #[error("validation failed")]
  Validation(Vec<Violation>),

  #[error("Person with IPN {0} already exists.")]
  DuplicateIpn(String),

  #[error("Person with ID {0} not found.")]
  NotFound(PersonId),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
