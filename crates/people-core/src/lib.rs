//! Core types and rules for the people registry.
//!
//! No HTTP or database code lives here. Storage backends implement
//! [`store::PersonStore`]; the API layer calls into [`service`], which runs
//! [`validation`] and the [`uniqueness`] checks before touching the store.

pub mod error;
pub mod ipn;
pub mod page;
pub mod person;
pub mod service;
pub mod store;
pub mod uniqueness;
pub mod validation;

pub use error::{Error, Result};

#[cfg(test)]
mod testing;
