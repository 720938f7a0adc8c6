/* crates/formwork/src/element/validate.rs */

//! The validation pipeline: required, pattern, and kind-specific checks
//! with a strict vs. auto-correct policy.

use super::{color, datetime, file, number, options::OptionEntry, patterns, phone, Element, ElementKind};
use crate::value::FieldValue;

/// Outcome of the required check when the value is empty.
pub(super) enum EmptyOutcome {
  /// Empty and required: an error was recorded.
  Missing,
  /// Empty but optional: validation stops successfully.
  Allowed,
}

impl Element {
  /// Validate the element's resolved value.
  ///
  /// Clears prior errors first, so repeated validation never accumulates.
  /// `strict` demands full matches against declared and built-in patterns;
  /// `auto_correct` lets kind-specific rules silently coerce an invalid
  /// value into a valid one instead of reporting it.
  pub fn validate(&mut self, strict: bool, auto_correct: bool) {
    self.state_mut().clear_errors();
    match self.kind() {
      // Buttons and hidden inputs carry no user input worth checking.
      ElementKind::Button | ElementKind::Hidden => {}
      ElementKind::File => file::validate(self),
      ElementKind::Color => color::validate(self, strict),
      _ => self.validate_standard(strict, auto_correct),
    }
    self.mark_validated();
  }

  fn validate_standard(&mut self, strict: bool, auto_correct: bool) {
    if self.has_attribute("readonly") {
      return;
    }
    if self.check_required().is_some() {
      return;
    }
    if !self.check_pattern(strict) {
      return;
    }
    self.validate_extra(auto_correct);
  }

  /// When the value is empty, record the required error (if the element is
  /// required and not disabled) and report how validation should stop.
  /// A present value returns `None` and validation continues.
  pub(super) fn check_required(&mut self) -> Option<EmptyOutcome> {
    if !self.value().is_empty() {
      return None;
    }
    if self.has_attribute("required") && !self.is_disabled() {
      let label = self.label_span();
      self.state_mut().add_error(format!("{label} is a required field."));
      Some(EmptyOutcome::Missing)
    } else {
      Some(EmptyOutcome::Allowed)
    }
  }

  /// The string the pattern checks run against: the processed value,
  /// sequence values joined.
  pub(super) fn match_value(&self) -> String {
    let processed = self.processed_value();
    match processed {
      FieldValue::Scalar(s) => s,
      FieldValue::Absent => String::new(),
      other => other.joined(", "),
    }
  }

  /// Returns false when a pattern check failed and recorded an error, so
  /// kind-specific extra validation does not pile on.
  fn check_pattern(&mut self, strict: bool) -> bool {
    let match_value = self.match_value();
    let label = self.label_span();

    if let Some(pattern) = self.attribute("pattern").map(ToString::to_string) {
      let ok = if strict {
        patterns::full_match(&pattern, &match_value)
      } else {
        patterns::search_match(&pattern, &match_value)
      };
      if !ok {
        self.state_mut().add_error(format!("{label} is not in the correct format."));
        return false;
      }
    }

    // Email addresses are always held to the built-in format.
    let strict = strict || self.kind() == ElementKind::Email;
    if let Some(pattern) = patterns::type_pattern(self.kind()) {
      if strict && !patterns::full_match(pattern, &match_value) {
        let hint = patterns::format_hint(self.kind())
          .map(|h| format!(" ({h})"))
          .unwrap_or_default();
        self.state_mut().add_error(format!("{label} is not in the correct format.{hint}"));
        return false;
      }
    }
    true
  }

  fn validate_extra(&mut self, auto_correct: bool) {
    match self.kind() {
      ElementKind::Date
      | ElementKind::DatetimeLocal
      | ElementKind::Month
      | ElementKind::Week
      | ElementKind::Time => datetime::validate(self, auto_correct),
      ElementKind::Number | ElementKind::Range => number::validate(self, auto_correct),
      ElementKind::Phone => phone::validate(self, auto_correct),
      ElementKind::CheckboxList | ElementKind::RadioList => self.validate_write_ins(),
      _ => {}
    }
  }

  /// Write-in sub-fields become required exactly when their option is
  /// selected, then validate recursively. Their errors surface through
  /// `Element::errors`.
  fn validate_write_ins(&mut self) {
    let selected: Vec<(usize, bool)> = self
      .options
      .iter()
      .enumerate()
      .filter_map(|(i, item)| match &item.entry {
        OptionEntry::WriteIn(sub) => {
          let selected = sub.name().is_some_and(|name| self.is_option_selected(name));
          Some((i, selected))
        }
        _ => None,
      })
      .collect();

    for (i, is_selected) in selected {
      if let OptionEntry::WriteIn(sub) = &mut self.options[i].entry {
        if is_selected {
          sub.set_attribute("required", "required");
        } else {
          sub.remove_attribute("required");
        }
        sub.validate(false, true);
      }
    }
  }
}
