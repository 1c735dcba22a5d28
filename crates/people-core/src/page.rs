//! Paging and sorting types for listing people.

use std::{fmt, str::FromStr};

use serde::Serialize;
use utoipa::ToSchema;

/// A sortable person attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
  Id,
  FirstName,
  #[default]
  LastName,
  Birthday,
  Ipn,
}

impl SortField {
  /// The name used in query strings and JSON bodies.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Id => "id",
      Self::FirstName => "firstName",
      Self::LastName => "lastName",
      Self::Birthday => "birthday",
      Self::Ipn => "ipn",
    }
  }
}

impl fmt::Display for SortField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Returned when a sort field or direction string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseSortError {
  pub kind:  &'static str,
  pub value: String,
}

impl FromStr for SortField {
  type Err = ParseSortError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "id" => Ok(Self::Id),
      "firstName" => Ok(Self::FirstName),
      "lastName" => Ok(Self::LastName),
      "birthday" => Ok(Self::Birthday),
      "ipn" => Ok(Self::Ipn),
      other => Err(ParseSortError { kind: "sort field", value: other.to_owned() }),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
  #[default]
  Asc,
  Desc,
}

impl FromStr for SortDirection {
  type Err = ParseSortError;

  /// Case-insensitive: `asc`, `ASC` and `Asc` are all accepted.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.eq_ignore_ascii_case("asc") {
      Ok(Self::Asc)
    } else if s.eq_ignore_ascii_case("desc") {
      Ok(Self::Desc)
    } else {
      Err(ParseSortError { kind: "sort direction", value: s.to_owned() })
    }
  }
}

/// Ordering for a listing. Defaults to last name, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
  pub field:     SortField,
  pub direction: SortDirection,
}

/// Which slice of the ordered result set to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  /// 0-indexed page number.
  pub page: u32,
  /// Maximum number of records per page; always at least 1.
  pub size: u32,
  pub sort: Sort,
}

impl PageRequest {
  pub fn new(page: u32, size: u32, sort: Sort) -> Self {
    Self { page, size: size.max(1), sort }
  }

  /// Number of records preceding this page.
  pub fn offset(&self) -> u64 { u64::from(self.page) * u64::from(self.size) }
}

/// A bounded slice of an ordered result set, with total-count metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub content:        Vec<T>,
  pub page:           u32,
  pub size:           u32,
  pub total_elements: u64,
  pub total_pages:    u64,
}

impl<T> Page<T> {
  pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
    let size = u64::from(request.size.max(1));
    Self {
      content,
      page: request.page,
      size: request.size,
      total_elements,
      total_pages: total_elements.div_ceil(size),
    }
  }

  /// Convert every element, keeping the paging metadata.
  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      content:        self.content.into_iter().map(f).collect(),
      page:           self.page,
      size:           self.size,
      total_elements: self.total_elements,
      total_pages:    self.total_pages,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sort_direction_is_case_insensitive() {
    assert_eq!("asc".parse(), Ok(SortDirection::Asc));
    assert_eq!("DESC".parse(), Ok(SortDirection::Desc));
    assert_eq!("Desc".parse(), Ok(SortDirection::Desc));
    assert!("down".parse::<SortDirection>().is_err());
  }

  #[test]
  fn sort_field_round_trips_through_its_name() {
    for field in [
      SortField::Id,
      SortField::FirstName,
      SortField::LastName,
      SortField::Birthday,
      SortField::Ipn,
    ] {
      assert_eq!(field.as_str().parse(), Ok(field));
    }
    let err = "password".parse::<SortField>().unwrap_err();
    assert_eq!(err.to_string(), "unknown sort field: \"password\"");
  }

  #[test]
  fn default_sort_is_last_name_ascending() {
    let sort = Sort::default();
    assert_eq!(sort.field, SortField::LastName);
    assert_eq!(sort.direction, SortDirection::Asc);
  }

  #[test]
  fn page_counts_round_up() {
    let request = PageRequest::new(2, 10, Sort::default());
    assert_eq!(request.offset(), 20);

    let page = Page::new(vec![1, 2, 3], &request, 23);
    assert_eq!(page.total_pages, 3);
    assert_eq!(Page::<u8>::new(vec![], &request, 0).total_pages, 0);
    assert_eq!(Page::<u8>::new(vec![], &request, 20).total_pages, 2);
  }

  #[test]
  fn map_keeps_metadata() {
    let request = PageRequest::new(0, 2, Sort::default());
    let page = Page::new(vec![1, 2], &request, 5).map(|n| n * 10);
    assert_eq!(page.content, vec![10, 20]);
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages, 3);
  }

  #[test]
  fn zero_size_is_clamped_to_one() {
    assert_eq!(PageRequest::new(0, 0, Sort::default()).size, 1);
  }
}
