/* crates/formwork/src/context.rs */

//! Read-only-ish view over the current request's submission data.
//!
//! The three parameter buckets (query, body, files) hold arbitrarily nested
//! JSON values keyed by field name, as produced by whatever request decoder
//! the surrounding handler uses. The only mutation the form layer performs
//! is name un-mangling: moving a value stored under a wire-mangled key back
//! under the field's declared name.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// HTTP submission method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
  Get,
  #[default]
  Post,
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      Method::Get => "get",
      Method::Post => "post",
    }
  }

  /// Case-insensitive parse; anything unrecognized falls back to `Post`.
  pub fn parse(s: &str) -> Self {
    if s.eq_ignore_ascii_case("get") { Method::Get } else { Method::Post }
  }
}

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Which parameter bucket a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
  Query,
  Body,
  Files,
}

impl Bucket {
  /// The bucket a non-file field reads for the given method.
  pub fn for_method(method: Method) -> Self {
    match method {
      Method::Get => Bucket::Query,
      Method::Post => Bucket::Body,
    }
  }
}

/// One request's worth of submission data.
#[derive(Debug, Clone, Default)]
pub struct SubmissionContext {
  method: Method,
  query: Map<String, Value>,
  body: Map<String, Value>,
  files: Map<String, Value>,
}

impl SubmissionContext {
  pub fn new(method: Method) -> Self {
    Self { method, ..Self::default() }
  }

  pub fn with_query(mut self, query: Map<String, Value>) -> Self {
    self.query = query;
    self
  }

  pub fn with_body(mut self, body: Map<String, Value>) -> Self {
    self.body = body;
    self
  }

  pub fn with_files(mut self, files: Map<String, Value>) -> Self {
    self.files = files;
    self
  }

  pub fn method(&self) -> Method {
    self.method
  }

  pub fn bucket(&self, bucket: Bucket) -> &Map<String, Value> {
    match bucket {
      Bucket::Query => &self.query,
      Bucket::Body => &self.body,
      Bucket::Files => &self.files,
    }
  }

  pub fn bucket_mut(&mut self, bucket: Bucket) -> &mut Map<String, Value> {
    match bucket {
      Bucket::Query => &mut self.query,
      Bucket::Body => &mut self.body,
      Bucket::Files => &mut self.files,
    }
  }

  pub fn param(&self, bucket: Bucket, name: &str) -> Option<&Value> {
    self.bucket(bucket).get(name)
  }

  /// Move a key's value under a new name within a bucket. The old key is
  /// removed; an existing value under the new name is overwritten.
  pub fn rename_param(&mut self, bucket: Bucket, from: &str, to: &str) {
    let bucket = self.bucket_mut(bucket);
    if let Some(value) = bucket.remove(from) {
      bucket.insert(to.to_string(), value);
    }
  }

  /// Reverse the wire convention that rewrites spaces and periods in field
  /// names to underscores. When the mangled form of `declared` differs and
  /// the bucket holds a value under it, the value moves back under the
  /// declared name. Must run before any lookup of `declared`.
  pub fn unmangle(&mut self, bucket: Bucket, declared: &str) {
    let mangled: String =
      declared.chars().map(|c| if c == ' ' || c == '.' { '_' } else { c }).collect();
    if mangled != declared && self.bucket(bucket).contains_key(&mangled) {
      self.rename_param(bucket, &mangled, declared);
    }
  }

  /// Whether any submission data arrived for the given method. A `Post`
  /// submission counts uploaded files as data too.
  pub fn has_params_for(&self, method: Method) -> bool {
    match method {
      Method::Get => !self.query.is_empty(),
      Method::Post => !self.body.is_empty() || !self.files.is_empty(),
    }
  }
}
