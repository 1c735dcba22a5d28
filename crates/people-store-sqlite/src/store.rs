//! [`SqliteStore`]: the SQLite implementation of [`PersonStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use people_core::{
  page::{Page, PageRequest},
  person::{NewPerson, Person, PersonId},
  store::PersonStore,
};

use crate::{
  Error, Result,
  encode::{RawPerson, encode_date, is_unique_violation, sort_column, sort_keyword},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store backed by a single SQLite file.
///
/// Clones share one background connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// What a single `INSERT`/`UPDATE` did, decided inside the connection thread.
enum WriteOutcome {
  Written(PersonId),
  NoSuchRow,
  IpnTaken,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a fresh in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch at most one row matching `column = value`.
  ///
  /// `column` is always one of this module's literals, never caller input.
  async fn find_one(
    &self,
    column: &'static str,
    value: rusqlite::types::Value,
  ) -> Result<Option<Person>> {
    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM people WHERE {column} = ?1",
          RawPerson::COLUMNS
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![value], RawPerson::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>> {
    self.find_one("id", id.into()).await
  }

  async fn find_by_ipn<'a>(&'a self, ipn: &'a str) -> Result<Option<Person>> {
    self.find_one("ipn", ipn.to_owned().into()).await
  }

  async fn find_all<'a>(&'a self, request: &'a PageRequest) -> Result<Page<Person>> {
    let order = format!(
      "ORDER BY {} {}, id ASC",
      sort_column(request.sort.field),
      sort_keyword(request.sort.direction),
    );
    let limit  = i64::from(request.size);
    let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);

    let (total, raws): (i64, Vec<RawPerson>) = self
      .conn
      .call(move |conn| {
        // Count and slice inside one transaction so the totals match the rows.
        let tx = conn.transaction()?;
        let total: i64 =
          tx.query_row("SELECT COUNT(*) FROM people", [], |r| r.get(0))?;

        let rows = {
          let sql = format!(
            "SELECT {} FROM people {order} LIMIT ?1 OFFSET ?2",
            RawPerson::COLUMNS
          );
          let mut stmt = tx.prepare(&sql)?;
          stmt
            .query_map(rusqlite::params![limit, offset], RawPerson::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        tx.commit()?;

        Ok((total, rows))
      })
      .await?;

    let content = raws
      .into_iter()
      .map(RawPerson::into_person)
      .collect::<Result<Vec<_>>>()?;

    Ok(Page::new(content, request, total.max(0) as u64))
  }

  async fn save(&self, id: Option<PersonId>, person: NewPerson) -> Result<Person> {
    let first_name = person.first_name.clone();
    let last_name  = person.last_name.clone();
    let birthday   = encode_date(person.birthday);
    let ipn        = person.ipn.clone();

    let outcome = self
      .conn
      .call(move |conn| {
        let result = match id {
          None => conn
            .execute(
              "INSERT INTO people (first_name, last_name, birthday, ipn)
               VALUES (?1, ?2, ?3, ?4)",
              rusqlite::params![first_name, last_name, birthday, ipn],
            )
            .map(|_| WriteOutcome::Written(conn.last_insert_rowid())),
          Some(id) => conn
            .execute(
              "UPDATE people
               SET first_name = ?1, last_name = ?2, birthday = ?3, ipn = ?4
               WHERE id = ?5",
              rusqlite::params![first_name, last_name, birthday, ipn, id],
            )
            .map(|changed| {
              if changed == 0 {
                WriteOutcome::NoSuchRow
              } else {
                WriteOutcome::Written(id)
              }
            }),
        };

        match result {
          Ok(outcome) => Ok(outcome),
          Err(e) if is_unique_violation(&e) => Ok(WriteOutcome::IpnTaken),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match outcome {
      WriteOutcome::Written(id) => Ok(person.with_id(id)),
      WriteOutcome::NoSuchRow => Err(Error::PersonNotFound(id.unwrap_or_default())),
      WriteOutcome::IpnTaken => Err(Error::DuplicateIpn(person.ipn)),
    }
  }

  async fn delete_by_id(&self, id: PersonId) -> Result<()> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM people WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::PersonNotFound(id));
    }
    Ok(())
  }
}
