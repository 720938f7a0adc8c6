/* crates/formwork/src/element/file.rs */

//! File upload validation and persistence.
//!
//! Validation inspects per-file transport codes and extensions; saving
//! moves temp files into a durable directory, probing numeric suffixes on
//! collision. Filesystem failures degrade to collected error strings --
//! the surrounding request can still complete.

use std::fs;
use std::path::Path;

use serde::Serialize;

use super::{patterns, Element, ElementKind};
use crate::errors::FormError;
use crate::value::{FieldValue, UploadedFile};

/// Upload completed.
pub const UPLOAD_ERR_OK: u32 = 0;
/// No file arrived in this slot ("no file chosen").
pub const UPLOAD_ERR_NO_FILE: u32 = 4;

/// Per-element upload constraints and save location.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
  /// Extensions rejected outright (with the leading dot).
  pub disallowed_extensions: Vec<String>,
  /// When non-empty, the only extensions accepted.
  pub allowed_extensions: Vec<String>,
  /// Default directory for saved uploads.
  pub filepath: String,
}

impl Default for UploadPolicy {
  fn default() -> Self {
    Self {
      disallowed_extensions: vec![".exe".to_string(), ".dll".to_string(), ".js".to_string()],
      allowed_extensions: Vec::new(),
      filepath: String::new(),
    }
  }
}

/// Outcome of a save pass: collected error strings and the filenames as
/// actually written.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SaveReport {
  pub errors: Vec<String>,
  pub filenames: Vec<String>,
}

pub(super) fn validate(element: &mut Element) {
  if element.has_attribute("readonly") {
    return;
  }

  let label = element.label_span();
  let required = element.has_attribute("required") && !element.is_disabled();
  let files = match element.value() {
    FieldValue::Files(files) => files.clone(),
    _ => Vec::new(),
  };

  if files.is_empty() {
    if required {
      element.state_mut().add_error(format!("{label} is a required field."));
    }
    return;
  }

  let disallowed: Vec<String> =
    element.upload_policy().disallowed_extensions.iter().map(|e| e.to_lowercase()).collect();
  let allowed: Vec<String> =
    element.upload_policy().allowed_extensions.iter().map(|e| e.to_lowercase()).collect();

  let mut kept: Vec<UploadedFile> = Vec::with_capacity(files.len());
  for file in files {
    if file.error == UPLOAD_ERR_NO_FILE {
      // An empty slot only matters when the field is required.
      if required {
        element.state_mut().add_error(format!("{label} is a required field."));
        return;
      }
      continue;
    }
    if file.error != UPLOAD_ERR_OK {
      let message = match patterns::upload_error_message(file.error) {
        Some(message) => format!("File upload error: {message}."),
        None => "File upload error.".to_string(),
      };
      element.state_mut().add_error(message);
      return;
    }

    let extension = file
      .name
      .rfind('.')
      .map(|i| file.name[i..].to_lowercase())
      .unwrap_or_default();
    if extension.is_empty()
      || disallowed.contains(&extension)
      || (!allowed.is_empty() && !allowed.contains(&extension))
    {
      element
        .state_mut()
        .add_error(format!("{label} contains a file type which is not allowed."));
      return;
    }
    kept.push(file);
  }

  // Empty optional slots were dropped; keep the survivors.
  element.set_value(FieldValue::Files(kept));
}

impl Element {
  /// Move validated uploads from their temp paths into `dir` (falling back
  /// to the element's configured filepath).
  ///
  /// Collisions probe `{stem}{n}{ext}` for up to 10,000 suffixes. Create
  /// and write failures are reported in the returned `SaveReport`, never
  /// raised. Calling this on anything but a validated file element is a
  /// contract violation.
  pub fn save_uploaded_files(
    &mut self,
    dir: Option<&str>,
    safe_filename: bool,
  ) -> Result<SaveReport, FormError> {
    if self.kind() != ElementKind::File {
      return Err(FormError::contract("save_uploaded_files is only valid on file elements"));
    }
    if !self.validated() {
      return Err(FormError::contract("save_uploaded_files requires a validated file element"));
    }

    let files = match self.value() {
      FieldValue::Files(files) if !files.is_empty() => files.clone(),
      _ => return Ok(SaveReport::default()),
    };

    let dir = dir
      .filter(|d| !d.is_empty())
      .unwrap_or(&self.upload_policy().filepath)
      .trim_end_matches(['/', '\\'])
      .to_string();
    let path = Path::new(&dir);
    let mut report = SaveReport::default();

    if !path.is_dir() && fs::create_dir_all(path).is_err() {
      report.errors.push(format!("Can't create file directory {dir}."));
    }
    if !path.is_dir() || !is_writable(path) {
      if report.errors.is_empty() {
        report.errors.push("Can't write to file directory.".to_string());
      }
      return Ok(report);
    }

    let mut renamed: Vec<(usize, String)> = Vec::new();
    for (i, file) in files.iter().enumerate() {
      let mut name = file.name.clone();
      if safe_filename {
        name = safe_file_name(&name);
      }

      let (stem, ext) = split_extension(&name);
      let mut candidate = name.clone();
      let mut n = 0;
      while path.join(&candidate).exists() && n < 10_000 {
        candidate = format!("{stem}{n}{ext}");
        n += 1;
      }
      if path.join(&candidate).exists() {
        report
          .errors
          .push("There was an error attempting to save an uploaded file.".to_string());
        continue;
      }

      if move_file(&file.tmp_name, &path.join(&candidate)) {
        report.filenames.push(candidate.clone());
        renamed.push((i, candidate));
      } else {
        report
          .errors
          .push("There was an error attempting to save an uploaded file.".to_string());
      }
    }

    if !renamed.is_empty() {
      if let FieldValue::Files(mut files) = self.value().clone() {
        for (i, name) in renamed {
          if let Some(file) = files.get_mut(i) {
            file.name = name;
          }
        }
        self.set_value(FieldValue::Files(files));
      }
    }

    Ok(report)
  }
}

/// Rename across the same filesystem, falling back to copy-and-remove.
fn move_file(from: &str, to: &Path) -> bool {
  if from.is_empty() {
    return false;
  }
  if fs::rename(from, to).is_ok() {
    return true;
  }
  if fs::copy(from, to).is_ok() {
    let _ = fs::remove_file(from);
    return true;
  }
  false
}

fn is_writable(path: &Path) -> bool {
  path.metadata().map(|m| !m.permissions().readonly()).unwrap_or(false)
}

/// Lowercase and collapse anything that is not a letter, digit, or dot to
/// a single underscore, trimming underscores from the ends. Keeps mixed
/// case collisions and shell-hostile names out of the save directory.
pub(crate) fn safe_file_name(name: &str) -> String {
  let lower = name.to_lowercase();
  let mut out = String::with_capacity(lower.len());
  let mut pending = false;
  for ch in lower.chars() {
    if ch.is_alphanumeric() || ch == '.' {
      if pending && !out.is_empty() {
        out.push('_');
      }
      pending = false;
      out.push(ch);
    } else {
      pending = true;
    }
  }
  out
}

/// Split `photo.png` into (`photo`, `.png`); extensionless names get an
/// empty suffix.
fn split_extension(name: &str) -> (String, String) {
  match name.rfind('.') {
    Some(i) if i > 0 => (name[..i].to_string(), name[i..].to_string()),
    _ => (name.to_string(), String::new()),
  }
}
