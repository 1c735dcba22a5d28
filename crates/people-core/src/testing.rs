//! In-memory [`PersonStore`] used by the unit tests in this crate.

use std::{
  collections::BTreeMap,
  sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  },
};

use chrono::NaiveDate;

use crate::{
  page::{Page, PageRequest, SortDirection, SortField},
  person::{NewPerson, Person, PersonId},
  store::PersonStore,
};

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
  #[error("ipn {0} is taken")]
  IpnTaken(String),
  #[error("no row {0}")]
  Missing(PersonId),
}

impl From<MemoryError> for crate::Error {
  fn from(e: MemoryError) -> Self {
    match e {
      MemoryError::IpnTaken(ipn) => Self::DuplicateIpn(ipn),
      MemoryError::Missing(id) => Self::NotFound(id),
    }
  }
}

#[derive(Default)]
pub struct MemoryStore {
  rows:            Mutex<BTreeMap<PersonId, Person>>,
  next_id:         Mutex<PersonId>,
  ipn_lookups:     AtomicUsize,
  stale_ipn_reads: bool,
}

pub fn new_person(ipn: &str) -> NewPerson {
  NewPerson {
    first_name: "Олександр".into(),
    last_name:  "Давидюк".into(),
    birthday:   NaiveDate::from_ymd_opt(1995, 6, 5).unwrap(),
    ipn:        ipn.into(),
  }
}

impl MemoryStore {
  /// A store whose `find_by_ipn` always misses, as if a concurrent insert of
  /// the same IPN had not been visible yet.
  pub fn with_stale_ipn_reads() -> Self {
    Self { stale_ipn_reads: true, ..Self::default() }
  }

  /// Insert without any checks and return the stored record.
  pub fn insert(&self, person: NewPerson) -> Person {
    let mut rows = self.rows.lock().unwrap();
    let mut next = self.next_id.lock().unwrap();
    *next += 1;
    let stored = person.with_id(*next);
    rows.insert(stored.id, stored.clone());
    stored
  }

  pub fn ipn_lookups(&self) -> usize { self.ipn_lookups.load(Ordering::SeqCst) }

  pub fn len(&self) -> usize { self.rows.lock().unwrap().len() }

  pub fn get(&self, id: PersonId) -> Option<Person> {
    self.rows.lock().unwrap().get(&id).cloned()
  }
}

impl PersonStore for MemoryStore {
  type Error = MemoryError;

  async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, MemoryError> {
    Ok(self.get(id))
  }

  async fn find_by_ipn<'a>(
    &'a self,
    ipn: &'a str,
  ) -> Result<Option<Person>, MemoryError> {
    self.ipn_lookups.fetch_add(1, Ordering::SeqCst);
    if self.stale_ipn_reads {
      return Ok(None);
    }
    let rows = self.rows.lock().unwrap();
    Ok(rows.values().find(|p| p.ipn == ipn).cloned())
  }

  async fn find_all<'a>(
    &'a self,
    request: &'a PageRequest,
  ) -> Result<Page<Person>, MemoryError> {
    let mut all: Vec<Person> = self.rows.lock().unwrap().values().cloned().collect();
    all.sort_by(|a, b| {
      let ord = match request.sort.field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::FirstName => a.first_name.cmp(&b.first_name),
        SortField::LastName => a.last_name.cmp(&b.last_name),
        SortField::Birthday => a.birthday.cmp(&b.birthday),
        SortField::Ipn => a.ipn.cmp(&b.ipn),
      };
      let ord = match request.sort.direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
      };
      ord.then(a.id.cmp(&b.id))
    });

    let total = all.len() as u64;
    let content = all
      .into_iter()
      .skip(request.offset() as usize)
      .take(request.size as usize)
      .collect();
    Ok(Page::new(content, request, total))
  }

  async fn save(
    &self,
    id: Option<PersonId>,
    person: NewPerson,
  ) -> Result<Person, MemoryError> {
    let mut rows = self.rows.lock().unwrap();
    if rows.values().any(|p| p.ipn == person.ipn && Some(p.id) != id) {
      return Err(MemoryError::IpnTaken(person.ipn));
    }

    let id = match id {
      Some(id) if rows.contains_key(&id) => id,
      Some(id) => return Err(MemoryError::Missing(id)),
      None => {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
      }
    };
    let stored = person.with_id(id);
    rows.insert(id, stored.clone());
    Ok(stored)
  }

  async fn delete_by_id(&self, id: PersonId) -> Result<(), MemoryError> {
    self
      .rows
      .lock()
      .unwrap()
      .remove(&id)
      .map(drop)
      .ok_or(MemoryError::Missing(id))
  }
}
