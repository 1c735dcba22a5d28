//! The person record and its input shapes.
//!
//! There are three shapes: [`PersonInput`] is what a caller submits
//! (every field optional, nothing trusted), [`NewPerson`] is an input that
//! passed validation, and [`Person`] is a persisted record with its
//! store-assigned id.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use utoipa::ToSchema;

/// Store-assigned identifier of a [`Person`].
pub type PersonId = i64;

/// A persisted person record.
///
/// Has no serde impls; the API layer converts it into its own response shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
  pub id:         PersonId,
  pub first_name: String,
  pub last_name:  String,
  pub birthday:   NaiveDate,
  pub ipn:        String,
}

/// A validated record that has not been assigned an id.
///
/// Only [`crate::validation::validate`] constructs this outside of tests,
/// so holding one means every field rule has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  pub first_name: String,
  pub last_name:  String,
  pub birthday:   NaiveDate,
  pub ipn:        String,
}

impl NewPerson {
  /// Attach a store-assigned id.
  pub fn with_id(self, id: PersonId) -> Person {
    Person {
      id,
      first_name: self.first_name,
      last_name: self.last_name,
      birthday: self.birthday,
      ipn: self.ipn,
    }
  }
}

/// An unvalidated person payload as submitted by a caller.
///
/// Any `id` in the submitted document is ignored; ids are assigned by the
/// store. Numbers and booleans sent for a text field are taken as their
/// literal text, so they reach validation instead of failing the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
  #[serde(default, deserialize_with = "scalar_text")]
  pub first_name: Option<String>,
  #[serde(default, deserialize_with = "scalar_text")]
  pub last_name:  Option<String>,
  pub birthday:   Option<NaiveDate>,
  #[serde(default, deserialize_with = "scalar_text")]
  pub ipn:        Option<String>,
}

/// Read a JSON scalar as text. `null` is absent; arrays and objects are
/// rejected.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  match Value::deserialize(deserializer)? {
    Value::Null => Ok(None),
    Value::String(s) => Ok(Some(s)),
    Value::Number(n) => Ok(Some(n.to_string())),
    Value::Bool(b) => Ok(Some(b.to_string())),
    Value::Array(_) => Err(de::Error::invalid_type(de::Unexpected::Seq, &"a string")),
    Value::Object(_) => Err(de::Error::invalid_type(de::Unexpected::Map, &"a string")),
  }
}
