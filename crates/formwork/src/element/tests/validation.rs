/* crates/formwork/src/element/tests/validation.rs */

use serde_json::json;

use super::{build, files_ctx, post_ctx};
use crate::element::ElementSpec;
use crate::value::FieldValue;

// -- required --

#[test]
fn required_error_for_every_validating_kind() {
  // Submitted request where the field itself is missing.
  for type_attr in [
    "text", "textarea", "select", "radio", "color", "email", "search", "url", "date",
    "datetime-local", "month", "week", "time", "number", "tel", "range", "password",
  ] {
    let mut ctx = post_ctx(&[("other", json!("x"))]);
    let mut spec = ElementSpec::new()
      .attr("type", type_attr)
      .attr("name", "field")
      .attr("required", "required")
      .label("Field");
    if matches!(type_attr, "select" | "radio") {
      spec = spec.option("a", "A");
    }
    let mut element = build(spec, &mut ctx);
    element.validate(false, true);
    let errors = element.errors();
    assert_eq!(errors.len(), 1, "kind {type_attr}: {errors:?}");
    assert!(errors[0].contains("required field"), "kind {type_attr}: {errors:?}");
  }
}

#[test]
fn required_file_field_with_no_upload() {
  let mut ctx = post_ctx(&[("other", json!("x"))]);
  let spec = ElementSpec::new()
    .attr("type", "file")
    .attr("name", "upload")
    .attr("required", "required")
    .label("Upload");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  let errors = element.errors();
  assert_eq!(errors.len(), 1);
  assert!(errors[0].contains("required field"));
}

#[test]
fn disabled_required_field_passes() {
  let mut ctx = post_ctx(&[("other", json!("x"))]);
  let spec = ElementSpec::new()
    .attr("type", "text")
    .attr("name", "field")
    .attr("required", "required")
    .attr("disabled", "disabled");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());
}

#[test]
fn optional_empty_fields_skip_every_other_check() {
  // An empty optional number would fail the numeric check if it ran.
  let mut ctx = post_ctx(&[("n", json!(""))]);
  let spec = ElementSpec::new().attr("type", "number").attr("name", "n").attr("min", "1");
  let mut element = build(spec, &mut ctx);
  element.validate(false, false);
  assert!(element.errors().is_empty());
}

#[test]
fn optional_empty_color_passes() {
  let mut ctx = post_ctx(&[("c", json!(""))]);
  let spec = ElementSpec::new().attr("type", "color").attr("name", "c");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());
}

#[test]
fn readonly_always_validates_clean() {
  let mut ctx = post_ctx(&[("field", json!("not a number"))]);
  let spec = ElementSpec::new()
    .attr("type", "number")
    .attr("name", "field")
    .attr("required", "required")
    .attr("readonly", "readonly");
  let mut element = build(spec, &mut ctx);
  element.validate(true, false);
  assert!(element.errors().is_empty());
}

#[test]
fn validation_is_idempotent() {
  let mut ctx = post_ctx(&[("other", json!("x"))]);
  let spec = ElementSpec::new()
    .attr("type", "text")
    .attr("name", "field")
    .attr("required", "required")
    .label("Field");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  let first = element.errors();
  element.validate(false, true);
  let second = element.errors();
  assert_eq!(first, second);
  assert_eq!(second.len(), 1);
}

// -- patterns --

#[test]
fn explicit_pattern_is_substring_search_when_lenient() {
  let mut ctx = post_ctx(&[("code", json!("xx-1234-yy"))]);
  let spec =
    ElementSpec::new().attr("type", "text").attr("name", "code").attr("pattern", r"\d{4}");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());
}

#[test]
fn explicit_pattern_is_full_match_when_strict() {
  let mut ctx = post_ctx(&[("code", json!("xx-1234-yy"))]);
  let spec =
    ElementSpec::new().attr("type", "text").attr("name", "code").attr("pattern", r"\d{4}");
  let mut element = build(spec, &mut ctx);
  element.validate(true, true);
  let errors = element.errors();
  assert_eq!(errors.len(), 1);
  assert!(errors[0].contains("not in the correct format"));
}

#[test]
fn invalid_explicit_pattern_counts_as_mismatch() {
  let mut ctx = post_ctx(&[("code", json!("anything"))]);
  let spec =
    ElementSpec::new().attr("type", "text").attr("name", "code").attr("pattern", "(unclosed");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert_eq!(element.errors().len(), 1);
}

#[test]
fn email_format_is_enforced_without_strict() {
  let mut ctx = post_ctx(&[("email", json!("not-an-address"))]);
  let spec = ElementSpec::new().attr("type", "email").attr("name", "email").label("Email");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  let errors = element.errors();
  assert_eq!(errors.len(), 1);
  assert!(errors[0].contains("not in the correct format"));
}

#[test]
fn valid_email_passes() {
  let mut ctx = post_ctx(&[("email", json!("user@example.com"))]);
  let spec = ElementSpec::new().attr("type", "email").attr("name", "email");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());
}

#[test]
fn text_fields_skip_builtin_patterns_when_lenient() {
  let mut ctx = post_ctx(&[("d", json!("tomorrow"))]);
  let spec = ElementSpec::new().attr("type", "date").attr("name", "d");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  // Lenient mode skips the built-in pattern, but the kind check still
  // rejects an unparseable date.
  let errors = element.errors();
  assert_eq!(errors.len(), 1);
  assert!(errors[0].contains("not in the correct format"));
}

// -- numbers --

#[test]
fn step_snaps_down_when_remainder_is_small() {
  let mut ctx = post_ctx(&[("n", json!("7"))]);
  let spec = ElementSpec::new()
    .attr("type", "number")
    .attr("name", "n")
    .attr("min", "0")
    .attr("max", "100")
    .attr("step", "5");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());
  assert_eq!(element.value(), &FieldValue::Scalar("5".into()));
}

#[test]
fn step_snaps_up_when_remainder_is_large() {
  let mut ctx = post_ctx(&[("n", json!("8"))]);
  let spec = ElementSpec::new()
    .attr("type", "number")
    .attr("name", "n")
    .attr("min", "0")
    .attr("max", "100")
    .attr("step", "5");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());
  assert_eq!(element.value(), &FieldValue::Scalar("10".into()));
}

#[test]
fn step_reports_instead_of_correcting_when_asked() {
  let mut ctx = post_ctx(&[("n", json!("7"))]);
  let spec =
    ElementSpec::new().attr("type", "number").attr("name", "n").attr("step", "5").label("N");
  let mut element = build(spec, &mut ctx);
  element.validate(false, false);
  let errors = element.errors();
  assert_eq!(errors.len(), 1);
  assert!(errors[0].contains("increment of 5"));
  assert_eq!(element.value(), &FieldValue::Scalar("7".into()));
}

#[test]
fn min_clamps_or_reports() {
  let mut ctx = post_ctx(&[("n", json!("-3"))]);
  let spec = ElementSpec::new().attr("type", "range").attr("name", "n").attr("min", "0");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());
  assert_eq!(element.value(), &FieldValue::Scalar("0".into()));

  let mut ctx = post_ctx(&[("n", json!("-3"))]);
  let spec = ElementSpec::new().attr("type", "range").attr("name", "n").attr("min", "0");
  let mut element = build(spec, &mut ctx);
  element.validate(false, false);
  assert!(element.errors()[0].contains("below minimum allowed value of 0"));
}

#[test]
fn max_clamps_or_reports() {
  let mut ctx = post_ctx(&[("n", json!("120"))]);
  let spec = ElementSpec::new().attr("type", "number").attr("name", "n").attr("max", "100");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert_eq!(element.value(), &FieldValue::Scalar("100".into()));

  let mut ctx = post_ctx(&[("n", json!("120"))]);
  let spec = ElementSpec::new().attr("type", "number").attr("name", "n").attr("max", "100");
  let mut element = build(spec, &mut ctx);
  element.validate(false, false);
  assert!(element.errors()[0].contains("above maximum allowed value of 100"));
}

#[test]
fn non_numeric_value_is_an_error() {
  let mut ctx = post_ctx(&[("n", json!("seven"))]);
  let spec = ElementSpec::new().attr("type", "number").attr("name", "n").label("N");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors()[0].contains("must be numeric"));
}

// -- dates --

#[test]
fn date_below_min_clamps_when_correcting() {
  let mut ctx = post_ctx(&[("d", json!("2024-01-01"))]);
  let spec =
    ElementSpec::new().attr("type", "date").attr("name", "d").attr("min", "2024-06-01");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());
  assert_eq!(element.value(), &FieldValue::Scalar("2024-06-01".into()));
}

#[test]
fn date_above_max_reports_when_not_correcting() {
  let mut ctx = post_ctx(&[("d", json!("2025-01-01"))]);
  let spec = ElementSpec::new()
    .attr("type", "date")
    .attr("name", "d")
    .attr("max", "2024-12-31")
    .label("Date");
  let mut element = build(spec, &mut ctx);
  element.validate(false, false);
  assert!(element.errors()[0].contains("above maximum allowed value of 2024-12-31"));
}

#[test]
fn time_and_month_parse_under_their_formats() {
  let mut ctx = post_ctx(&[("t", json!("09:30"))]);
  let spec = ElementSpec::new().attr("type", "time").attr("name", "t");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());

  let mut ctx = post_ctx(&[("m", json!("2024-13"))]);
  let spec = ElementSpec::new().attr("type", "month").attr("name", "m");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert_eq!(element.errors().len(), 1);
}

// -- phone --

#[test]
fn phone_reformats_when_correcting() {
  let mut ctx = post_ctx(&[("p", json!("1 (555) 123-4567 x89"))]);
  let spec = ElementSpec::new().attr("type", "tel").attr("name", "p");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());
  assert_eq!(element.value(), &FieldValue::Scalar("555-123-4567 ext. 89".into()));
}

#[test]
fn phone_keeps_original_without_correcting() {
  let mut ctx = post_ctx(&[("p", json!("(555) 123-4567"))]);
  let spec = ElementSpec::new().attr("type", "tel").attr("name", "p");
  let mut element = build(spec, &mut ctx);
  element.validate(false, false);
  assert!(element.errors().is_empty());
  assert_eq!(element.value(), &FieldValue::Scalar("(555) 123-4567".into()));
}

#[test]
fn unreadable_phone_is_an_error() {
  let mut ctx = post_ctx(&[("p", json!("call me"))]);
  let spec = ElementSpec::new().attr("type", "tel").attr("name", "p").label("Phone");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors()[0].contains("valid phone number"));
}

// -- colors --

#[test]
fn named_color_validates_case_insensitively() {
  for input in ["blue", "Blue", "REBECCAPURPLE"] {
    let mut ctx = post_ctx(&[("c", json!(input))]);
    let spec = ElementSpec::new().attr("type", "color").attr("name", "c");
    let mut element = build(spec, &mut ctx);
    element.validate(false, true);
    assert!(element.errors().is_empty(), "input {input}");
  }
}

#[test]
fn unknown_color_is_exactly_one_error() {
  let mut ctx = post_ctx(&[("c", json!("notacolor"))]);
  let spec = ElementSpec::new().attr("type", "color").attr("name", "c").label("Color");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  let errors = element.errors();
  assert_eq!(errors.len(), 1);
  assert!(errors[0].contains("not a recognized color value"));
}

#[test]
fn hex_and_functional_families_match_their_patterns() {
  for (input, ok) in [
    ("#a1b2c3", true),
    ("#abc", true),
    ("#zzz", false),
    ("rgb(10, 20, 30)", true),
    ("RGB(10, 20, 30)", true),
    ("rgb(10, 20)", false),
    ("hsla(120, 50%, 50%, 0.5)", true),
  ] {
    let mut ctx = post_ctx(&[("c", json!(input))]);
    let spec = ElementSpec::new().attr("type", "color").attr("name", "c");
    let mut element = build(spec, &mut ctx);
    element.validate(false, true);
    assert_eq!(element.errors().is_empty(), ok, "input {input}");
  }
}

#[test]
fn strict_color_requires_full_hex() {
  let mut ctx = post_ctx(&[("c", json!("#abc"))]);
  let spec = ElementSpec::new().attr("type", "color").attr("name", "c");
  let mut element = build(spec, &mut ctx);
  element.validate(true, true);
  assert_eq!(element.errors().len(), 1);

  let mut ctx = post_ctx(&[("c", json!("#a1b2c3"))]);
  let spec = ElementSpec::new().attr("type", "color").attr("name", "c");
  let mut element = build(spec, &mut ctx);
  element.validate(true, true);
  assert!(element.errors().is_empty());
}

#[test]
fn functional_color_values_normalize_to_lowercase() {
  let mut ctx = post_ctx(&[("c", json!("RGB(1, 2, 3)"))]);
  let spec = ElementSpec::new().attr("type", "color").attr("name", "c");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert_eq!(element.value(), &FieldValue::Scalar("rgb(1, 2, 3)".into()));
}

// -- write-ins --

#[test]
fn selected_write_in_becomes_required_and_validates() {
  // The "other" checkbox is picked but the write-in text is blank.
  let mut ctx = post_ctx(&[("fruit", json!(["fruit_writein1"])), ("fruit_writein1", json!(""))]);
  let spec = ElementSpec::new()
    .attr("type", "checkbox")
    .attr("name", "fruit")
    .label("Fruit")
    .option("a", "Apple")
    .option("b", "Banana")
    .write_in("other", ElementSpec::new().attr("type", "text").label("Other fruit"));
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  let errors = element.errors();
  assert_eq!(errors.len(), 1);
  assert!(errors[0].contains("required field"));
}

#[test]
fn unselected_write_in_is_not_required() {
  let mut ctx = post_ctx(&[("fruit", json!(["a"])), ("fruit_writein1", json!(""))]);
  let spec = ElementSpec::new()
    .attr("type", "checkbox")
    .attr("name", "fruit")
    .option("a", "Apple")
    .write_in("other", ElementSpec::new().attr("type", "text"));
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());
}

#[test]
fn filled_write_in_substitutes_into_the_processed_value() {
  let mut ctx =
    post_ctx(&[("fruit", json!(["a", "fruit_writein1"])), ("fruit_writein1", json!("durian"))]);
  let spec = ElementSpec::new()
    .attr("type", "checkbox")
    .attr("name", "fruit")
    .option("a", "Apple")
    .option("b", "Banana")
    .write_in("other", ElementSpec::new().attr("type", "text"));
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());
  assert_eq!(
    element.processed_value(),
    FieldValue::List(vec![FieldValue::Scalar("a".into()), FieldValue::Scalar("durian".into())])
  );
}

// -- files --

fn upload(name: &str, error: u32) -> serde_json::Value {
  json!({"name": name, "type": "application/octet-stream", "size": 10, "tmp_name": "/tmp/u", "error": error})
}

#[test]
fn optional_empty_upload_slot_is_dropped() {
  let mut ctx = files_ctx(&[(
    "docs",
    json!({
      "name": ["a.txt", ""],
      "type": ["text/plain", ""],
      "size": [3, 0],
      "tmp_name": ["/tmp/a", ""],
      "error": [0, 4]
    }),
  )]);
  let spec = ElementSpec::new().attr("type", "file").attr("name", "docs");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());
  let FieldValue::Files(files) = element.value() else { panic!("expected files") };
  assert_eq!(files.len(), 1);
  assert_eq!(files[0].name, "a.txt");
}

#[test]
fn required_empty_upload_slot_is_a_required_error() {
  let mut ctx = files_ctx(&[("doc", upload("", 4))]);
  let spec = ElementSpec::new()
    .attr("type", "file")
    .attr("name", "doc")
    .attr("required", "required")
    .label("Document");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors()[0].contains("required field"));
}

#[test]
fn transport_error_reports_its_message() {
  let mut ctx = files_ctx(&[("doc", upload("big.bin", 1))]);
  let spec = ElementSpec::new().attr("type", "file").attr("name", "doc");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  let errors = element.errors();
  assert_eq!(errors.len(), 1);
  assert!(errors[0].starts_with("File upload error"));
  assert!(errors[0].contains("maximum allowed size"));
}

#[test]
fn disallowed_extension_is_rejected() {
  let mut ctx = files_ctx(&[("doc", upload("malware.exe", 0))]);
  let spec = ElementSpec::new().attr("type", "file").attr("name", "doc").label("Document");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors()[0].contains("file type which is not allowed"));
}

#[test]
fn allowlist_restricts_extensions() {
  let mut ctx = files_ctx(&[("doc", upload("photo.png", 0))]);
  let mut spec = ElementSpec::new().attr("type", "file").attr("name", "doc");
  spec.allowed_extensions = vec![".jpg".to_string(), ".jpeg".to_string()];
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert_eq!(element.errors().len(), 1);

  let mut ctx = files_ctx(&[("doc", upload("photo.jpg", 0))]);
  let mut spec = ElementSpec::new().attr("type", "file").attr("name", "doc");
  spec.allowed_extensions = vec![".jpg".to_string()];
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert!(element.errors().is_empty());
}

#[test]
fn extensionless_uploads_are_rejected() {
  let mut ctx = files_ctx(&[("doc", upload("README", 0))]);
  let spec = ElementSpec::new().attr("type", "file").attr("name", "doc");
  let mut element = build(spec, &mut ctx);
  element.validate(false, true);
  assert_eq!(element.errors().len(), 1);
}

// -- buttons and hidden inputs --

#[test]
fn buttons_and_hidden_inputs_never_error() {
  for type_attr in ["submit", "hidden"] {
    let mut ctx = post_ctx(&[("other", json!("x"))]);
    let spec = ElementSpec::new()
      .attr("type", type_attr)
      .attr("name", "field")
      .attr("required", "required");
    let mut element = build(spec, &mut ctx);
    element.validate(true, false);
    assert!(element.errors().is_empty(), "type {type_attr}");
  }
}
