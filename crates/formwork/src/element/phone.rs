/* crates/formwork/src/element/phone.rs */

//! Phone normalization for the North American Numbering Plan.

use super::Element;
use crate::value::FieldValue;

/// Normalize a phone number to `AAA-PPP-DDDD[ ext. E]`.
///
/// Strips everything except digits and `x`, treats the text after the
/// first `x` as an extension, drops a leading country-code `1`, and
/// requires exactly ten remaining digits. Returns `None` when the input
/// cannot be read as a NANP number.
pub fn format_phone_number(number: &str) -> Option<String> {
  let cleaned: String = number
    .to_lowercase()
    .chars()
    .filter(|c| c.is_ascii_digit() || *c == 'x')
    .collect();
  let parts: Vec<&str> = cleaned.split('x').collect();
  let mut phone = parts.first().copied().unwrap_or("").to_string();
  let ext = parts.get(1).copied().unwrap_or("");

  if let Some(rest) = phone.strip_prefix('1') {
    phone = rest.to_string();
  }
  if phone.len() != 10 {
    return None;
  }

  let formatted = format!("{}-{}-{}", &phone[..3], &phone[3..6], &phone[6..]);
  if ext.is_empty() {
    Some(formatted)
  } else {
    Some(format!("{formatted} ext. {ext}"))
  }
}

pub(super) fn validate(element: &mut Element, auto_correct: bool) {
  let label = element.label_span();
  let raw = element.value().as_scalar().unwrap_or("").to_string();
  match format_phone_number(&raw) {
    None => {
      element
        .state_mut()
        .add_error(format!("{label} does not seem to be a valid phone number."));
    }
    Some(formatted) => {
      if auto_correct {
        element.set_value(FieldValue::Scalar(formatted));
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::format_phone_number;

  #[test]
  fn formats_messy_input_with_extension() {
    assert_eq!(
      format_phone_number("1 (555) 123-4567 x89").as_deref(),
      Some("555-123-4567 ext. 89")
    );
  }

  #[test]
  fn formats_bare_ten_digits() {
    assert_eq!(format_phone_number("5551234567").as_deref(), Some("555-123-4567"));
  }

  #[test]
  fn drops_leading_country_code() {
    assert_eq!(format_phone_number("15551234567").as_deref(), Some("555-123-4567"));
  }

  #[test]
  fn rejects_short_numbers() {
    assert_eq!(format_phone_number("555-1234"), None);
  }

  #[test]
  fn rejects_long_numbers() {
    assert_eq!(format_phone_number("55512345678"), None);
  }

  #[test]
  fn uppercase_extension_marker() {
    assert_eq!(format_phone_number("555-123-4567 X9").as_deref(), Some("555-123-4567 ext. 9"));
  }
}
