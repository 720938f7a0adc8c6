/* crates/formwork/src/errors.rs */

use std::fmt;

/// A programming-contract violation.
///
/// Validation failures are never represented here -- they are collected as
/// message strings on the owning field state. `FormError` is returned only
/// when the library is used incorrectly: malformed option structures at
/// construction, or saving uploads from something that is not a validated
/// file element.
#[derive(Debug)]
pub struct FormError {
  code: String,
  message: String,
}

impl FormError {
  pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
    Self { code: code.into(), message: message.into() }
  }

  pub fn contract(message: impl Into<String>) -> Self {
    Self::new("CONTRACT_VIOLATION", message)
  }

  pub fn options(message: impl Into<String>) -> Self {
    Self::new("MALFORMED_OPTIONS", message)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

impl fmt::Display for FormError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for FormError {}
