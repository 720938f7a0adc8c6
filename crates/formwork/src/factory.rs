/* crates/formwork/src/factory.rs */

//! Element factory: map a declared `type` string to the element kind to
//! instantiate. Pure lookup; a single checkbox with declared options
//! becomes a checkbox list.

use serde_json::{Map, Value};

use crate::context::{Method, SubmissionContext};
use crate::element::{Element, ElementKind, ElementSpec};
use crate::errors::FormError;

pub fn create(
  spec: ElementSpec,
  method: Method,
  record: Option<&Map<String, Value>>,
  ctx: &mut SubmissionContext,
) -> Result<Element, FormError> {
  let declared = spec.get_attr("type").unwrap_or("").to_lowercase();
  let kind = match declared.as_str() {
    "textarea" => ElementKind::Textarea,
    "select" => ElementKind::Select,
    "checkbox" => {
      if spec.options.is_empty() {
        ElementKind::Checkbox
      } else {
        ElementKind::CheckboxList
      }
    }
    "radio" => ElementKind::RadioList,
    "button" | "submit" | "reset" => ElementKind::Button,
    "file" => ElementKind::File,
    "color" => ElementKind::Color,
    "email" => ElementKind::Email,
    "search" => ElementKind::Search,
    "url" => ElementKind::Url,
    "date" => ElementKind::Date,
    "datetime-local" => ElementKind::DatetimeLocal,
    "month" => ElementKind::Month,
    "week" => ElementKind::Week,
    "time" => ElementKind::Time,
    "number" => ElementKind::Number,
    "tel" => ElementKind::Phone,
    "range" => ElementKind::Range,
    "password" => ElementKind::Password,
    "hidden" => ElementKind::Hidden,
    _ => ElementKind::Text,
  };
  Element::new(kind, spec, method, record, ctx)
}
