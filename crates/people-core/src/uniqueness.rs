//! IPN uniqueness checks against a [`PersonStore`].
//!
//! These are read-only lookups performed before a write. They are not atomic
//! with the write that follows; a concurrent request can claim the same IPN
//! in between. Stores close that gap with their own uniqueness constraint.

use crate::{
  Error, Result,
  person::Person,
  store::PersonStore,
};

/// Find a record other than `target` that already holds `ipn`.
///
/// With `target: None` (create) any holder is a conflict. With
/// `target: Some(p)` (update) re-submitting `p`'s own IPN never conflicts.
pub async fn find_conflict<S: PersonStore>(
  store: &S,
  ipn: &str,
  target: Option<&Person>,
) -> Result<Option<Person>> {
  if target.is_some_and(|t| t.ipn == ipn) {
    return Ok(None);
  }

  let holder = store.find_by_ipn(ipn).await.map_err(Into::into)?;
  Ok(holder.filter(|h| target.is_none_or(|t| t.id != h.id)))
}

/// Fail with [`Error::DuplicateIpn`] if any record holds `ipn`.
pub async fn ensure_ipn_free<S: PersonStore>(store: &S, ipn: &str) -> Result<()> {
  match find_conflict(store, ipn, None).await? {
    Some(_) => Err(Error::DuplicateIpn(ipn.to_owned())),
    None => Ok(()),
  }
}

/// Fail with [`Error::DuplicateIpn`] if a record other than `target` holds
/// `ipn`.
pub async fn ensure_ipn_free_for<S: PersonStore>(
  store: &S,
  target: &Person,
  ipn: &str,
) -> Result<()> {
  match find_conflict(store, ipn, Some(target)).await? {
    Some(_) => Err(Error::DuplicateIpn(ipn.to_owned())),
    None => Ok(()),
  }
}
