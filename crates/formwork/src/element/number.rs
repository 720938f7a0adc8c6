/* crates/formwork/src/element/number.rs */

//! Numeric validation shared by number and range inputs: step alignment
//! first (so a snapped value still gets range-checked), then min, then max.

use super::Element;
use crate::value::FieldValue;

pub(super) fn validate(element: &mut Element, auto_correct: bool) {
  let label = element.label_span();
  let raw = element.value().as_scalar().unwrap_or("").to_string();
  let Ok(parsed) = raw.trim().parse::<f64>() else {
    element.state_mut().add_error(format!("{label} must be numeric."));
    return;
  };

  let mut value = parsed;
  let mut changed = false;

  if let Some(step) = numeric_attr(element, "step") {
    if step != 0.0 {
      let remainder = value % step;
      if remainder != 0.0 {
        if auto_correct {
          // Snap to the nearest step multiple; ties round down.
          value = value - remainder + if remainder > step / 2.0 { step } else { 0.0 };
          changed = true;
        } else {
          let step_raw = element.attribute("step").unwrap_or_default().to_string();
          element
            .state_mut()
            .add_error(format!("{label} isn't in a correct increment of {step_raw}."));
          return;
        }
      }
    }
  }

  if let Some(min) = numeric_attr(element, "min") {
    if value < min {
      if auto_correct {
        value = min;
        changed = true;
      } else {
        let min_raw = element.attribute("min").unwrap_or_default().to_string();
        element
          .state_mut()
          .add_error(format!("{label} is below minimum allowed value of {min_raw}."));
        return;
      }
    }
  }

  if let Some(max) = numeric_attr(element, "max") {
    if value > max {
      if auto_correct {
        value = max;
        changed = true;
      } else {
        let max_raw = element.attribute("max").unwrap_or_default().to_string();
        element
          .state_mut()
          .add_error(format!("{label} is above maximum allowed value of {max_raw}."));
        return;
      }
    }
  }

  if changed {
    element.set_value(FieldValue::Scalar(format_number(value)));
  }
}

fn numeric_attr(element: &Element, name: &str) -> Option<f64> {
  element.attribute(name).and_then(|v| v.trim().parse::<f64>().ok())
}

/// Render a corrected value the way a user would have typed it: integral
/// results without a decimal point.
pub(super) fn format_number(value: f64) -> String {
  if value.fract() == 0.0 && value.abs() < 1e15 {
    format!("{}", value as i64)
  } else {
    value.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::format_number;

  #[test]
  fn integral_values_have_no_decimal_point() {
    assert_eq!(format_number(5.0), "5");
    assert_eq!(format_number(-10.0), "-10");
  }

  #[test]
  fn fractional_values_keep_their_fraction() {
    assert_eq!(format_number(2.5), "2.5");
  }
}
