//! Field validation for submitted person records.
//!
//! Every rule is evaluated on every call; the result lists all violations in
//! field declaration order rather than stopping at the first.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
  ipn::{self, IpnDefect},
  person::{NewPerson, PersonInput},
};

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const BIRTHDAY: &str = "birthday";
pub const IPN: &str = "ipn";

/// Inclusive bounds on name length, counted in characters.
pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 100;

/// Which rule a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
  Required,
  Size,
  NotPast,
  Format,
  /// Only produced when a duplicate IPN is found alongside other
  /// violations; see [`crate::service::create`].
  DuplicateIpn,
}

/// A single failed field rule.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
  #[schema(value_type = String, example = "ipn")]
  pub field:          &'static str,
  /// The submitted value, or `null` when the field was absent.
  #[schema(value_type = Object)]
  pub rejected_value: Value,
  pub message:        String,
  pub code:           ViolationCode,
}

impl Violation {
  fn new(
    field: &'static str,
    rejected_value: Value,
    code: ViolationCode,
    message: impl Into<String>,
  ) -> Self {
    Self { field, rejected_value, message: message.into(), code }
  }

  pub fn duplicate_ipn(ipn: &str) -> Self {
    Self::new(
      IPN,
      Value::from(ipn),
      ViolationCode::DuplicateIpn,
      format!("Person with IPN {ipn} already exists."),
    )
  }
}

/// Validate `input` against the field rules, treating `today` as the current
/// date for the past-date check.
pub fn validate(
  input: &PersonInput,
  today: NaiveDate,
) -> Result<NewPerson, Vec<Violation>> {
  let mut violations = Vec::new();

  let first_name = check_name(
    FIRST_NAME,
    "first name",
    input.first_name.as_deref(),
    &mut violations,
  );
  let last_name = check_name(
    LAST_NAME,
    "last name",
    input.last_name.as_deref(),
    &mut violations,
  );
  let birthday = check_birthday(input.birthday, today, &mut violations);
  let ipn = check_ipn(input.ipn.as_deref(), &mut violations);

  match (first_name, last_name, birthday, ipn) {
    (Some(first_name), Some(last_name), Some(birthday), Some(ipn))
      if violations.is_empty() =>
    {
      Ok(NewPerson {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        birthday,
        ipn: ipn.to_owned(),
      })
    }
    _ => Err(violations),
  }
}

fn check_name<'a>(
  field: &'static str,
  label: &str,
  value: Option<&'a str>,
  violations: &mut Vec<Violation>,
) -> Option<&'a str> {
  // A missing name only breaks REQUIRED; a present one is always measured.
  let Some(name) = value else {
    violations.push(Violation::new(
      field,
      Value::Null,
      ViolationCode::Required,
      "must not be blank",
    ));
    return None;
  };

  let blank = name.trim().is_empty();
  if blank {
    violations.push(Violation::new(
      field,
      Value::from(name),
      ViolationCode::Required,
      "must not be blank",
    ));
  }

  let len = name.chars().count();
  let sized = (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len);
  if !sized {
    violations.push(Violation::new(
      field,
      Value::from(name),
      ViolationCode::Size,
      format!(
        "The {label} must contain between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters"
      ),
    ));
  }

  (!blank && sized).then_some(name)
}

fn check_birthday(
  value: Option<NaiveDate>,
  today: NaiveDate,
  violations: &mut Vec<Violation>,
) -> Option<NaiveDate> {
  let Some(birthday) = value else {
    violations.push(Violation::new(
      BIRTHDAY,
      Value::Null,
      ViolationCode::Required,
      "Birthday should not be empty",
    ));
    return None;
  };

  if birthday >= today {
    violations.push(Violation::new(
      BIRTHDAY,
      Value::from(birthday.to_string()),
      ViolationCode::NotPast,
      "Birthday must be a past date",
    ));
    return None;
  }

  Some(birthday)
}

fn check_ipn<'a>(
  value: Option<&'a str>,
  violations: &mut Vec<Violation>,
) -> Option<&'a str> {
  let defect = match value {
    None => IpnDefect::Malformed,
    Some(s) => match ipn::check(s) {
      Ok(()) => return Some(s),
      Err(defect) => defect,
    },
  };

  let message = match defect {
    IpnDefect::Malformed => "IPN must consist of exactly 10 digits".to_owned(),
    IpnDefect::ChecksumMismatch { expected, found } => format!(
      "IPN check digit is {found} but its first nine digits require {expected}"
    ),
  };
  violations.push(Violation::new(
    IPN,
    value.map_or(Value::Null, Value::from),
    ViolationCode::Format,
    message,
  ));
  None
}

#[cfg(test)]
mod tests {
  use super::*;

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() }

  fn valid_input() -> PersonInput {
    PersonInput {
      first_name: Some("Олександр".into()),
      last_name:  Some("Давидюк".into()),
      birthday:   NaiveDate::from_ymd_opt(1995, 6, 5),
      ipn:        Some("2248000331".into()),
    }
  }

  fn codes(violations: &[Violation]) -> Vec<(&'static str, ViolationCode)> {
    violations.iter().map(|v| (v.field, v.code)).collect()
  }

  #[test]
  fn valid_input_is_accepted() {
    let person = validate(&valid_input(), today()).unwrap();
    assert_eq!(person.first_name, "Олександр");
    assert_eq!(person.ipn, "2248000331");
  }

  #[test]
  fn empty_input_reports_every_field_in_order() {
    let violations = validate(&PersonInput::default(), today()).unwrap_err();
    assert_eq!(
      codes(&violations),
      vec![
        (FIRST_NAME, ViolationCode::Required),
        (LAST_NAME, ViolationCode::Required),
        (BIRTHDAY, ViolationCode::Required),
        (IPN, ViolationCode::Format),
      ]
    );
    assert!(violations.iter().all(|v| v.rejected_value.is_null()));
  }

  #[test]
  fn blank_first_name_and_future_birthday_are_both_reported() {
    let input = PersonInput {
      first_name: Some("   ".into()),
      birthday: NaiveDate::from_ymd_opt(2030, 1, 1),
      ..valid_input()
    };
    let violations = validate(&input, today()).unwrap_err();
    assert_eq!(
      codes(&violations),
      vec![(FIRST_NAME, ViolationCode::Required), (BIRTHDAY, ViolationCode::NotPast)]
    );
    assert_eq!(violations[0].rejected_value, Value::from("   "));
    assert_eq!(violations[1].rejected_value, Value::from("2030-01-01"));
  }

  #[test]
  fn short_blank_name_breaks_both_required_and_size() {
    let input = PersonInput { first_name: Some(String::new()), ..valid_input() };
    let violations = validate(&input, today()).unwrap_err();
    assert_eq!(
      codes(&violations),
      vec![(FIRST_NAME, ViolationCode::Required), (FIRST_NAME, ViolationCode::Size)]
    );
    assert!(violations.iter().all(|v| v.rejected_value == Value::from("")));

    let input = PersonInput { last_name: Some(" ".into()), ..valid_input() };
    let violations = validate(&input, today()).unwrap_err();
    assert_eq!(
      codes(&violations),
      vec![(LAST_NAME, ViolationCode::Required), (LAST_NAME, ViolationCode::Size)]
    );
  }

  #[test]
  fn missing_name_is_only_required() {
    let input = PersonInput { last_name: None, ..valid_input() };
    let violations = validate(&input, today()).unwrap_err();
    assert_eq!(codes(&violations), vec![(LAST_NAME, ViolationCode::Required)]);
    assert!(violations[0].rejected_value.is_null());
  }

  #[test]
  fn birthday_today_is_not_past() {
    let input = PersonInput { birthday: Some(today()), ..valid_input() };
    let violations = validate(&input, today()).unwrap_err();
    assert_eq!(codes(&violations), vec![(BIRTHDAY, ViolationCode::NotPast)]);

    let yesterday = today().pred_opt().unwrap();
    let input = PersonInput { birthday: Some(yesterday), ..valid_input() };
    assert!(validate(&input, today()).is_ok());
  }

  #[test]
  fn name_length_bounds_count_characters() {
    let input = PersonInput { last_name: Some("Я".into()), ..valid_input() };
    let violations = validate(&input, today()).unwrap_err();
    assert_eq!(codes(&violations), vec![(LAST_NAME, ViolationCode::Size)]);
    assert_eq!(
      violations[0].message,
      "The last name must contain between 2 and 100 characters"
    );

    // Two Cyrillic letters are four bytes but two characters.
    let input = PersonInput { last_name: Some("Яя".into()), ..valid_input() };
    assert!(validate(&input, today()).is_ok());

    let input = PersonInput { first_name: Some("x".repeat(100)), ..valid_input() };
    assert!(validate(&input, today()).is_ok());

    let input = PersonInput { first_name: Some("x".repeat(101)), ..valid_input() };
    let violations = validate(&input, today()).unwrap_err();
    assert_eq!(codes(&violations), vec![(FIRST_NAME, ViolationCode::Size)]);
  }

  #[test]
  fn bad_ipn_is_a_format_violation_with_distinct_messages() {
    let input = PersonInput { ipn: Some("2248000332".into()), ..valid_input() };
    let violations = validate(&input, today()).unwrap_err();
    assert_eq!(codes(&violations), vec![(IPN, ViolationCode::Format)]);
    assert!(violations[0].message.contains("check digit"));

    let input = PersonInput { ipn: Some("avdkgyatsd".into()), ..valid_input() };
    let violations = validate(&input, today()).unwrap_err();
    assert_eq!(codes(&violations), vec![(IPN, ViolationCode::Format)]);
    assert!(violations[0].message.contains("exactly 10 digits"));
  }

  #[test]
  fn violation_serialises_in_camel_case() {
    let v = Violation::duplicate_ipn("2248000331");
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["field"], "ipn");
    assert_eq!(json["rejectedValue"], "2248000331");
    assert_eq!(json["code"], "DUPLICATE_IPN");
    assert_eq!(json["message"], "Person with IPN 2248000331 already exists.");
  }
}
