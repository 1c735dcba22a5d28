//! Person operations: validation, uniqueness, then persistence.
//!
//! Each function is a single request's worth of work against a
//! [`PersonStore`]. Nothing is written unless every check has passed.

use chrono::NaiveDate;

use crate::{
  Error, Result, ipn,
  page::{Page, PageRequest},
  person::{Person, PersonId, PersonInput},
  store::PersonStore,
  uniqueness,
  validation::{self, Violation},
};

/// Return one page of people.
pub async fn find_all<S: PersonStore>(
  store: &S,
  request: &PageRequest,
) -> Result<Page<Person>> {
  store.find_all(request).await.map_err(Into::into)
}

/// Return the person with `id`, or [`Error::NotFound`].
pub async fn find_by_id<S: PersonStore>(store: &S, id: PersonId) -> Result<Person> {
  store
    .find_by_id(id)
    .await
    .map_err(Into::into)?
    .ok_or(Error::NotFound(id))
}

/// Validate `input` and store it as a new person.
///
/// A duplicate IPN is always reported. When other fields are invalid as well,
/// it is appended to the violation list instead of replacing it.
pub async fn create<S: PersonStore>(
  store: &S,
  input: &PersonInput,
  today: NaiveDate,
) -> Result<Person> {
  let person = match validation::validate(input, today) {
    Ok(person) => person,
    Err(mut violations) => {
      if let Some(ipn) = input.ipn.as_deref().filter(|s| ipn::is_valid(s))
        && uniqueness::find_conflict(store, ipn, None).await?.is_some()
      {
        violations.push(Violation::duplicate_ipn(ipn));
      }
      return Err(Error::Validation(violations));
    }
  };

  uniqueness::ensure_ipn_free(store, &person.ipn).await?;
  store.save(None, person).await.map_err(Into::into)
}

/// Validate `input` and overwrite the person with `id`.
///
/// Checks run in order: field validation, existence of `id`, then IPN
/// uniqueness. Re-submitting the record's own IPN is allowed.
pub async fn update<S: PersonStore>(
  store: &S,
  id: PersonId,
  input: &PersonInput,
  today: NaiveDate,
) -> Result<Person> {
  let person = validation::validate(input, today).map_err(Error::Validation)?;
  let target = find_by_id(store, id).await?;
  uniqueness::ensure_ipn_free_for(store, &target, &person.ipn).await?;
  store.save(Some(id), person).await.map_err(Into::into)
}

/// Delete the person with `id`, or fail with [`Error::NotFound`].
pub async fn delete<S: PersonStore>(store: &S, id: PersonId) -> Result<()> {
  let target = find_by_id(store, id).await?;
  store.delete_by_id(target.id).await.map_err(Into::into)
}
