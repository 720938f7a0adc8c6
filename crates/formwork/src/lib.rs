/* crates/formwork/src/lib.rs */

//! Server-side HTML form modeling.
//!
//! Build a form description once, hand it the current request's
//! [`SubmissionContext`], and the elements resolve, clean, and validate
//! their submitted values; the form aggregates errors and renders markup,
//! plain-text summaries, or the hidden confirm-and-resubmit variant.

pub mod context;
pub mod element;
pub mod errors;
pub mod factory;
pub mod form;
pub mod resolve;
pub mod state;
pub mod value;

// Re-exports for ergonomic use
pub use context::{Bucket, Method, SubmissionContext};
pub use element::{
  Element, ElementKind, ElementSpec, OptionEntry, OptionItem, OptionSpec, OutputMode, SaveReport,
  UploadPolicy,
};
pub use errors::FormError;
pub use form::{Form, FormContents, FormSpec, HONEYPOT_FIELD};
pub use state::FieldState;
pub use value::{FieldValue, UploadedFile};
