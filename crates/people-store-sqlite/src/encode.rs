//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as ISO 8601 `YYYY-MM-DD` strings, which sort correctly
//! as text. Sort fields map onto a fixed set of column names, so no caller
//! input is ever interpolated into SQL.

use chrono::NaiveDate;
use people_core::{
  page::{SortDirection, SortField},
  person::{Person, PersonId},
};

use crate::{Error, Result};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Sorting ─────────────────────────────────────────────────────────────────

pub fn sort_column(field: SortField) -> &'static str {
  match field {
    SortField::Id => "id",
    SortField::FirstName => "first_name",
    SortField::LastName => "last_name",
    SortField::Birthday => "birthday",
    SortField::Ipn => "ipn",
  }
}

pub fn sort_keyword(direction: SortDirection) -> &'static str {
  match direction {
    SortDirection::Asc => "ASC",
    SortDirection::Desc => "DESC",
  }
}

// ─── Constraint detection ────────────────────────────────────────────────────

/// `true` if `e` is a `UNIQUE` constraint failure.
pub fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _)
      if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `people` row.
pub struct RawPerson {
  pub id:         PersonId,
  pub first_name: String,
  pub last_name:  String,
  pub birthday:   String,
  pub ipn:        String,
}

impl RawPerson {
  pub const COLUMNS: &'static str = "id, first_name, last_name, birthday, ipn";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      first_name: row.get(1)?,
      last_name:  row.get(2)?,
      birthday:   row.get(3)?,
      ipn:        row.get(4)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:         self.id,
      first_name: self.first_name,
      last_name:  self.last_name,
      birthday:   decode_date(&self.birthday)?,
      ipn:        self.ipn,
    })
  }
}
