/* crates/formwork/src/element/format.rs */

//! Display derivation and formatted output.

use formwork_markup::escape_html;

use super::{Element, ElementKind};
use crate::value::FieldValue;

/// Output rendering mode for formatted values. Unrecognized mode strings
/// fall back to `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
  #[default]
  Html,
  HtmlEmail,
  Text,
}

impl OutputMode {
  pub fn parse(s: &str) -> Self {
    match s.to_lowercase().as_str() {
      "html" => OutputMode::Html,
      "html_email" => OutputMode::HtmlEmail,
      _ => OutputMode::Text,
    }
  }
}

impl Element {
  /// The resolved value with selected write-in names replaced by the
  /// write-in's own entered text. Other kinds return the value unchanged.
  pub fn processed_value(&self) -> FieldValue {
    match self.kind() {
      ElementKind::RadioList => {
        let mut value = self.value().clone();
        if let FieldValue::Scalar(selected) = &value {
          for write_in in self.write_ins() {
            if write_in.name() == Some(selected.as_str()) {
              value = write_in.value().clone();
              break;
            }
          }
        }
        value
      }
      ElementKind::CheckboxList => match self.value() {
        FieldValue::List(items) => {
          let substituted = items
            .iter()
            .map(|item| {
              if let FieldValue::Scalar(s) = item {
                for write_in in self.write_ins() {
                  if write_in.name() == Some(s.as_str()) {
                    return write_in.value().clone();
                  }
                }
              }
              item.clone()
            })
            .collect();
          FieldValue::List(substituted)
        }
        other => other.clone(),
      },
      _ => self.value().clone(),
    }
  }

  /// The processed value prepared for display: option values replaced by
  /// their labels (lists joined `", "`), file sequences reduced to their
  /// names.
  pub fn value_for_output(&self) -> FieldValue {
    match self.kind() {
      ElementKind::File => {
        let names = match self.value() {
          FieldValue::Files(files) => {
            files.iter().map(|f| f.name.clone()).collect::<Vec<_>>().join(", ")
          }
          _ => String::new(),
        };
        FieldValue::Scalar(names)
      }
      ElementKind::Select | ElementKind::CheckboxList | ElementKind::RadioList => {
        match self.processed_value() {
          FieldValue::List(items) => {
            let labeled: Vec<FieldValue> = items
              .into_iter()
              .map(|item| match item {
                FieldValue::Scalar(s) => match self.option_label(&s) {
                  Some(label) => FieldValue::Scalar(label.to_string()),
                  None => FieldValue::Scalar(s),
                },
                other => other,
              })
              .collect();
            FieldValue::Scalar(FieldValue::List(labeled).joined(", "))
          }
          FieldValue::Scalar(s) => match self.option_label(&s) {
            Some(label) => FieldValue::Scalar(label.to_string()),
            None => FieldValue::Scalar(s),
          },
          other => other,
        }
      }
      _ => self.processed_value(),
    }
  }

  /// The value formatted for a summary in the requested mode. Buttons and
  /// hidden inputs are excluded from summaries and format as empty.
  pub fn formatted_value(&self, mode: OutputMode) -> String {
    if matches!(self.kind(), ElementKind::Button | ElementKind::Hidden) {
      return String::new();
    }

    let value = match self.value_for_output() {
      FieldValue::Scalar(s) => s,
      FieldValue::Absent => String::new(),
      other => other.joined(", "),
    };
    let value = value.trim();
    let label = self.identifying_text();

    match mode {
      OutputMode::Text => {
        format!("{}:\n    {value}\n", label.trim_end_matches(':'))
      }
      OutputMode::Html => {
        let label = escape_html(&label);
        let value = escape_html(value);
        format!("<div><label>{label}</label> <span class='value'>{value}</span></div>\n")
      }
      OutputMode::HtmlEmail => {
        let label = escape_html(&label);
        let value = escape_html(value);
        format!("<p><b>{label}</b><br>\n&nbsp;&nbsp;&nbsp;&nbsp;<span>{value}</span></p>\n")
      }
    }
  }
}
