/* crates/formwork/src/state.rs */

use crate::context::{Method, SubmissionContext};

/// Per-field submission and validation status, composed into both the form
/// and each element. Error strings may embed pre-rendered markup (the
/// field-label span used in validation messages).
#[derive(Debug, Clone, Default)]
pub struct FieldState {
  method: Method,
  submitted: bool,
  errors: Vec<String>,
}

impl FieldState {
  pub fn new(method: Method) -> Self {
    Self { method, submitted: false, errors: Vec::new() }
  }

  pub fn method(&self) -> Method {
    self.method
  }

  pub fn set_method(&mut self, method: Method) {
    self.method = method;
  }

  pub fn submitted(&self) -> bool {
    self.submitted
  }

  pub fn set_submitted(&mut self, submitted: bool) {
    self.submitted = submitted;
  }

  /// Derive the submitted flag from the presence of request data for this
  /// state's method.
  pub fn derive_submitted(&mut self, ctx: &SubmissionContext) {
    self.submitted = ctx.has_params_for(self.method);
  }

  pub fn add_error(&mut self, error: impl Into<String>) {
    self.errors.push(error.into());
  }

  pub fn set_errors(&mut self, errors: Vec<String>) {
    self.errors = errors;
  }

  pub fn clear_errors(&mut self) {
    self.errors.clear();
  }

  pub fn errors(&self) -> &[String] {
    &self.errors
  }

  /// One `<div class='form-error'>` per error, newline-joined.
  pub fn errors_html(&self) -> String {
    errors_html(&self.errors)
  }
}

pub(crate) fn errors_html(errors: &[String]) -> String {
  errors
    .iter()
    .map(|error| format!("<div class='form-error'>{error}</div>\n"))
    .collect::<Vec<_>>()
    .join("\n")
}
