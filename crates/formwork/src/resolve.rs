/* crates/formwork/src/resolve.rs */

//! Value resolution: extract a field's raw submitted value from the
//! request buckets, un-mangle its name, narrow bracketed selections, and
//! clean the result.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::context::{Bucket, SubmissionContext};
use crate::value::{FieldValue, UploadedFile};

fn bracket_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\[.*?\]").unwrap())
}

/// Split a declared name into its base and any bracketed index fragments:
/// `field[1][x]` -> (`field`, [`1`, `x`]).
pub(crate) fn split_bracket_fragments(name: &str) -> (String, Vec<String>) {
  let fragments = bracket_re()
    .find_iter(name)
    .map(|m| name[m.start() + 1..m.end() - 1].to_string())
    .collect();
  let base = bracket_re().replace_all(name, "").into_owned();
  (base, fragments)
}

/// Resolve a field's submitted value from the context.
///
/// Absence at any stage yields `FieldValue::Absent`, never an error:
/// whether absence matters is the required check's business, later.
pub fn resolve_value(
  name: &str,
  is_file: bool,
  trim: bool,
  ctx: &mut SubmissionContext,
) -> FieldValue {
  if name.is_empty() {
    return FieldValue::Absent;
  }

  let (base, fragments) = split_bracket_fragments(name);
  let bucket = if is_file { Bucket::Files } else { Bucket::for_method(ctx.method()) };

  // Un-mangling must happen before the lookup below sees the bucket.
  ctx.unmangle(bucket, &base);

  let Some(raw) = ctx.param(bucket, &base).cloned() else {
    return FieldValue::Absent;
  };

  if is_file {
    // File data is opaque; no narrowing, no cleaning.
    return FieldValue::Files(reshape_files(&raw));
  }

  let narrowed = match narrow_brackets(raw, &fragments) {
    Some(value) => value,
    None => return FieldValue::Absent,
  };

  let mut value = FieldValue::from_param(&narrowed);
  value.clean(trim);
  value
}

/// Descend into a nested structure one bracket fragment at a time, but only
/// while the current value is a nested structure with at most one entry.
/// Genuinely multi-valued structures (several checkboxes under one name)
/// stop the descent and survive intact. A missing key yields `None`.
fn narrow_brackets(mut value: Value, fragments: &[String]) -> Option<Value> {
  let mut i = 0;
  loop {
    let len = match &value {
      Value::Array(items) => items.len(),
      Value::Object(map) => map.len(),
      _ => break,
    };
    if len > 1 || i >= fragments.len() {
      break;
    }
    let key = &fragments[i];
    let next = match &value {
      Value::Array(items) => key.parse::<usize>().ok().and_then(|k| items.get(k)).cloned(),
      Value::Object(map) => map.get(key).cloned(),
      _ => None,
    };
    value = next?;
    i += 1;
  }
  Some(value)
}

/// Reshape raw file-bucket data into per-file records.
///
/// The wire delivers one object per field whose attributes are either
/// scalars (single upload) or parallel arrays indexed by file. Both forms
/// normalize to an ordered sequence of records; already record-shaped
/// arrays pass through.
fn reshape_files(raw: &Value) -> Vec<UploadedFile> {
  match raw {
    Value::Object(map) => match map.get("name") {
      Some(Value::Array(names)) => {
        (0..names.len()).map(|i| UploadedFile::from_indexed(map, i)).collect()
      }
      _ => vec![UploadedFile::from_object(map)],
    },
    Value::Array(items) => items
      .iter()
      .filter_map(|item| match item {
        Value::Object(map) => Some(UploadedFile::from_object(map)),
        _ => None,
      })
      .collect(),
    _ => Vec::new(),
  }
}
