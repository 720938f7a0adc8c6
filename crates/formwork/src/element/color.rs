/* crates/formwork/src/element/color.rs */

//! Color validation: infer the syntax family from the value's prefix and
//! hold it to that family's pattern, or accept a CSS named color.

use super::{patterns, Element};
use crate::value::FieldValue;

pub(super) fn validate(element: &mut Element, strict: bool) {
  if element.has_attribute("readonly") {
    return;
  }
  if element.check_required().is_some() {
    return;
  }

  let label = element.label_span();
  let match_value = element.match_value().trim().to_string();

  if let Some(pattern) = element.attribute("pattern").map(ToString::to_string) {
    let ok = if strict {
      patterns::full_match(&pattern, &match_value)
    } else {
      patterns::search_match(&pattern, &match_value)
    };
    if !ok {
      element.state_mut().add_error(format!("{label} is not in the correct format."));
      return;
    }
  }

  let lower = match_value.to_lowercase();
  let family = if strict {
    Some("hex_strict")
  } else if match_value.starts_with('#') {
    Some("hex")
  } else if lower.starts_with("rgba") {
    Some("rgba")
  } else if lower.starts_with("rgb") {
    Some("rgb")
  } else if lower.starts_with("hsla") {
    Some("hsla")
  } else if lower.starts_with("hsl") {
    Some("hsl")
  } else if patterns::is_css_color_name(&lower) {
    None
  } else {
    element.state_mut().add_error(format!("{label} is not a recognized color value."));
    return;
  };

  let Some(family) = family else { return };

  // Functional syntaxes normalize to lowercase before matching.
  let candidate = if matches!(family, "rgb" | "rgba" | "hsl" | "hsla") {
    element.set_value(FieldValue::Scalar(lower.clone()));
    lower
  } else {
    match_value
  };

  let matches_family =
    patterns::color_pattern(family).is_some_and(|pattern| patterns::full_match(pattern, &candidate));
  if !matches_family {
    element.state_mut().add_error(format!("{label} is not a recognized color value."));
  }
}
