//! Error type for `people-store-sqlite`.

use people_core::person::PersonId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// The `UNIQUE` constraint on `people.ipn` rejected a write.
  #[error("ipn {0} is already stored")]
  DuplicateIpn(String),

  /// An update targeted a row that does not exist.
  #[error("person not found: {0}")]
  PersonNotFound(PersonId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for people_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::DuplicateIpn(ipn) => Self::DuplicateIpn(ipn),
      Error::PersonNotFound(id) => Self::NotFound(id),
      other => Self::Store(Box::new(other)),
    }
  }
}
