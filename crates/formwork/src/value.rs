/* crates/formwork/src/value.rs */

//! Field value representation and cleaning.

use serde::Serialize;
use serde_json::{Map, Value};

/// A field's resolved submission value.
///
/// Shape invariant: file elements hold `Files`; select/checkbox/radio
/// elements hold `Scalar` or `List`; every other kind holds `Scalar` or
/// `Absent`. Lists may nest when the wire data did.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
  #[default]
  Absent,
  Scalar(String),
  List(Vec<FieldValue>),
  Files(Vec<UploadedFile>),
}

impl FieldValue {
  /// Absent, an empty string, or an empty sequence.
  pub fn is_empty(&self) -> bool {
    match self {
      FieldValue::Absent => true,
      FieldValue::Scalar(s) => s.is_empty(),
      FieldValue::List(items) => items.is_empty(),
      FieldValue::Files(files) => files.is_empty(),
    }
  }

  pub fn as_scalar(&self) -> Option<&str> {
    match self {
      FieldValue::Scalar(s) => Some(s),
      _ => None,
    }
  }

  /// Recursively join every scalar leaf with `separator`, then trim any
  /// separator characters from both ends (absent leaves contribute empty
  /// strings, so interior gaps collapse at the edges only).
  pub fn joined(&self, separator: &str) -> String {
    fn walk(value: &FieldValue, separator: &str, out: &mut String) {
      match value {
        FieldValue::Absent => out.push_str(separator),
        FieldValue::Scalar(s) => {
          out.push_str(s);
          out.push_str(separator);
        }
        FieldValue::List(items) => {
          for item in items {
            walk(item, separator, out);
          }
        }
        FieldValue::Files(files) => {
          for file in files {
            out.push_str(&file.name);
            out.push_str(separator);
          }
        }
      }
    }
    let mut out = String::new();
    walk(self, separator, &mut out);
    out.trim_matches(|c| separator.contains(c)).to_string()
  }

  /// Convert a raw bucket parameter into a field value. Scalars stringify
  /// (strings verbatim, numbers and booleans via `to_string`); arrays and
  /// objects become lists in order; null is absent.
  pub fn from_param(value: &Value) -> Self {
    match value {
      Value::Null => FieldValue::Absent,
      Value::Array(items) => FieldValue::List(items.iter().map(Self::from_param).collect()),
      Value::Object(map) => FieldValue::List(map.values().map(Self::from_param).collect()),
      scalar => FieldValue::Scalar(stringify(scalar)),
    }
  }

  /// Clean every scalar leaf: trim (when the element's trim policy is on)
  /// and always reverse legacy backslash escaping. File values are opaque
  /// and never cleaned.
  pub fn clean(&mut self, trim: bool) {
    match self {
      FieldValue::Scalar(s) => {
        let mut cleaned = if trim { s.trim().to_string() } else { s.clone() };
        cleaned = strip_slashes(&cleaned);
        *s = cleaned;
      }
      FieldValue::List(items) => {
        for item in items {
          item.clean(trim);
        }
      }
      FieldValue::Absent | FieldValue::Files(_) => {}
    }
  }
}

/// Stringify a scalar JSON value the way bucket data is read everywhere:
/// strings verbatim, numbers and booleans rendered, null empty.
pub(crate) fn stringify(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n.to_string(),
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

/// Loose truthiness over bucket/record values, used when a record seeds a
/// checkbox's checked state.
pub(crate) fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => {
      if let Some(i) = n.as_i64() {
        i != 0
      } else if let Some(f) = n.as_f64() {
        f != 0.0
      } else {
        true
      }
    }
    Value::String(s) => !s.is_empty() && s != "0",
    Value::Array(arr) => !arr.is_empty(),
    Value::Object(_) => true,
  }
}

/// Reverse legacy backslash escaping: `\x` becomes `x`, `\\` becomes `\`.
/// A trailing lone backslash is dropped.
pub fn strip_slashes(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut chars = s.chars();
  while let Some(ch) = chars.next() {
    if ch == '\\' {
      if let Some(next) = chars.next() {
        out.push(next);
      }
    } else {
      out.push(ch);
    }
  }
  out
}

/// One uploaded file, reshaped from the wire's parallel-array form.
/// Field names mirror the wire attributes (`name`, `type`, `size`,
/// `tmp_name`, `error`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadedFile {
  pub name: String,
  #[serde(rename = "type")]
  pub content_type: String,
  pub size: u64,
  pub tmp_name: String,
  pub error: u32,
}

impl UploadedFile {
  /// Build from a flat per-file object, tolerating string-typed numbers.
  pub(crate) fn from_object(map: &Map<String, Value>) -> Self {
    Self {
      name: map.get("name").map(stringify).unwrap_or_default(),
      content_type: map.get("type").map(stringify).unwrap_or_default(),
      size: map.get("size").map_or(0, as_u64),
      tmp_name: map.get("tmp_name").map(stringify).unwrap_or_default(),
      error: map.get("error").map_or(0, |v| as_u64(v) as u32),
    }
  }

  /// Build from the parallel-array form, taking index `i` of each
  /// attribute's array.
  pub(crate) fn from_indexed(map: &Map<String, Value>, i: usize) -> Self {
    let pick = |key: &str| -> Option<&Value> {
      match map.get(key) {
        Some(Value::Array(items)) => items.get(i),
        other => other,
      }
    };
    Self {
      name: pick("name").map(stringify).unwrap_or_default(),
      content_type: pick("type").map(stringify).unwrap_or_default(),
      size: pick("size").map_or(0, as_u64),
      tmp_name: pick("tmp_name").map(stringify).unwrap_or_default(),
      error: pick("error").map_or(0, |v| as_u64(v) as u32),
    }
  }
}

fn as_u64(value: &Value) -> u64 {
  match value {
    Value::Number(n) => n.as_u64().unwrap_or(0),
    Value::String(s) => s.trim().parse().unwrap_or(0),
    _ => 0,
  }
}
