/* crates/formwork/src/form.rs */

//! Form orchestration: owns the ordered elements, decides whether the
//! request is a submission, drives validation exactly once per request,
//! aggregates errors, and assembles the final markup.

use formwork_markup::{escape_html, Tag};
use serde_json::{Map, Value};

use crate::context::{Bucket, Method, SubmissionContext};
use crate::element::{Element, ElementKind, ElementSpec, OutputMode};
use crate::errors::FormError;
use crate::factory;
use crate::state::{errors_html, FieldState};
use crate::value::{stringify, FieldValue};

/// Fixed honeypot field name. Bots that fill it in fail the security
/// check; the inline script blanks it for real browsers.
pub const HONEYPOT_FIELD: &str = "email_check";
const HONEYPOT_DECOY: &str = "Please delete the contents of this field.";

/// Caller-supplied form contents, replacing the default per-field markup.
#[derive(Debug, Clone)]
pub enum FormContents {
  Markup(String),
  Tags(Vec<Tag>),
}

/// Declarative settings for constructing a form.
#[derive(Debug, Clone, Default)]
pub struct FormSpec {
  pub attributes: Vec<(String, String)>,
  pub labels_from_placeholders: bool,
  pub placeholders_from_labels: bool,
  pub record: Map<String, Value>,
}

impl FormSpec {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    let name = name.into();
    let value = value.into();
    match self.attributes.iter_mut().find(|(k, _)| *k == name) {
      Some(entry) => entry.1 = value,
      None => self.attributes.push((name, value)),
    }
    self
  }

  pub fn record(mut self, record: Map<String, Value>) -> Self {
    self.record = record;
    self
  }
}

/// An HTML form: an ordered collection of elements plus its own state.
///
/// Lifecycle: fresh -> submitted-unvalidated -> submitted-validated. The
/// submitted flag is computed once at construction; validation runs the
/// first time output is requested on a submitted form and is guarded so a
/// single request never re-validates.
#[derive(Debug, Clone)]
pub struct Form {
  tag: Tag,
  state: FieldState,
  elements: Vec<Element>,
  validation_run: bool,
  include_honeypot: bool,
  labels_from_placeholders: bool,
  placeholders_from_labels: bool,
  record: Map<String, Value>,
}

impl Form {
  pub fn new(spec: FormSpec, ctx: &SubmissionContext) -> Self {
    let mut tag = Tag::new("form");
    tag.set_attributes(spec.attributes);
    if tag.attribute("class").is_none_or(str::is_empty) {
      tag.set_attribute("class", "form-module");
    }
    if tag.attribute("method").is_none_or(str::is_empty) {
      tag.set_attribute("method", "post");
    }
    let method = Method::parse(tag.attribute("method").unwrap_or("post"));
    if tag.attribute("action").is_none() {
      tag.set_attribute("action", "");
    }

    let mut state = FieldState::new(method);
    state.derive_submitted(ctx);

    Form {
      tag,
      state,
      elements: Vec::new(),
      validation_run: false,
      include_honeypot: true,
      labels_from_placeholders: spec.labels_from_placeholders,
      placeholders_from_labels: spec.placeholders_from_labels,
      record: spec.record,
    }
  }

  pub fn method(&self) -> Method {
    self.state.method()
  }

  pub fn submitted(&self) -> bool {
    self.state.submitted()
  }

  pub fn set_submitted(&mut self, submitted: bool) {
    self.state.set_submitted(submitted);
  }

  pub fn state(&self) -> &FieldState {
    &self.state
  }

  pub fn attribute(&self, name: &str) -> Option<&str> {
    self.tag.attribute(name)
  }

  pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.tag.set_attribute(name, value);
  }

  pub fn validation_run(&self) -> bool {
    self.validation_run
  }

  pub fn set_validation_run(&mut self, validation_run: bool) {
    self.validation_run = validation_run;
  }

  pub fn include_honeypot(&self) -> bool {
    self.include_honeypot
  }

  pub fn set_include_honeypot(&mut self, include: bool) {
    self.include_honeypot = include;
  }

  pub fn record(&self) -> &Map<String, Value> {
    &self.record
  }

  pub fn record_value(&self, key: &str) -> Option<&Value> {
    self.record.get(key)
  }

  /// Create an element through the factory with this form's method and
  /// record, and append it.
  pub fn add(&mut self, spec: ElementSpec, ctx: &mut SubmissionContext) -> Result<(), FormError> {
    let record = if self.record.is_empty() { None } else { Some(&self.record) };
    let element = factory::create(spec, self.state.method(), record, ctx)?;
    self.push(element);
    Ok(())
  }

  /// Append a prebuilt element, applying the form's label/placeholder
  /// mirroring and setting the enctype when a file input arrives.
  pub fn push(&mut self, mut element: Element) {
    if self.placeholders_from_labels {
      element.set_placeholder_from_label(false);
    }
    if self.labels_from_placeholders {
      element.set_label_from_placeholder(false);
    }
    if element.kind() == ElementKind::File && self.tag.attribute("enctype").is_none() {
      self.tag.set_attribute("enctype", "multipart/form-data");
    }
    self.elements.push(element);
  }

  pub fn elements(&self) -> &[Element] {
    &self.elements
  }

  pub fn element(&self, name: &str) -> Option<&Element> {
    self.elements.iter().find(|e| e.name() == Some(name))
  }

  pub fn element_mut(&mut self, name: &str) -> Option<&mut Element> {
    self.elements.iter_mut().find(|e| e.name() == Some(name))
  }

  /// Run validation over every element in insertion order, then the
  /// honeypot check. Clears and rebuilds the full error set.
  pub fn validate(&mut self, ctx: &SubmissionContext) {
    self.validate_with(ctx, false, true);
  }

  /// Validation with an explicit strictness / auto-correct policy.
  pub fn validate_with(&mut self, ctx: &SubmissionContext, strict: bool, auto_correct: bool) {
    self.state.clear_errors();
    for element in &mut self.elements {
      element.validate(strict, auto_correct);
    }
    if self.include_honeypot {
      self.check_honeypot(ctx);
    }
    self.validation_run = true;
  }

  /// The honeypot field must arrive blank; anything else means an
  /// automated filler touched it.
  fn check_honeypot(&mut self, ctx: &SubmissionContext) {
    let bucket = Bucket::for_method(self.state.method());
    let passed = ctx
      .param(bucket, HONEYPOT_FIELD)
      .map(|v| stringify(v).trim().is_empty())
      .unwrap_or(false);
    if !passed {
      self.state.add_error("Security Check Failed");
    }
  }

  /// Form-level errors followed by every element's errors, depth-first in
  /// insertion order.
  pub fn errors(&self) -> Vec<String> {
    let mut errors = self.state.errors().to_vec();
    for element in &self.elements {
      errors.extend(element.errors());
    }
    errors
  }

  /// The aggregated error block, wrapped when non-empty.
  pub fn errors_html(&self) -> String {
    let inner = errors_html(&self.errors());
    if inner.is_empty() {
      String::new()
    } else {
      format!("<div class='form-errors'>\n{inner}</div>\n")
    }
  }

  /// The honeypot input and the script that blanks and hides it.
  pub fn honeypot_field() -> String {
    format!(
      "<input type=\"text\" id=\"human-check\" name=\"{HONEYPOT_FIELD}\" value=\"{HONEYPOT_DECOY}\" size=\"40\" />\n\
       <script type=\"text/javascript\">\n\
       \x20   var el = document.getElementById('human-check');\n\
       \x20   el.value = '';\n\
       \x20   el.style.display = 'none';\n\
       </script>\n"
    )
  }

  /// Render the whole form: error block, required-fields legend, honeypot,
  /// then either caller-supplied contents or the default per-field wrapped
  /// markup, skipping `exclude`d names. Requesting output on a submitted
  /// form triggers validation exactly once.
  pub fn render(
    &mut self,
    ctx: &SubmissionContext,
    contents: Option<FormContents>,
    exclude: &[&str],
  ) -> String {
    self.ensure_validated(ctx);

    let mut html: Vec<String> = Vec::new();
    html.push(self.errors_html());
    html.push("<div class='required'>Required fields.</div>\n".to_string());
    if self.include_honeypot {
      html.push(Self::honeypot_field());
    }

    match contents {
      None => {
        for element in &self.elements {
          if element.name().is_some_and(|name| exclude.contains(&name)) {
            continue;
          }
          html.push(element.wrapped_html(true, None));
        }
      }
      Some(FormContents::Markup(markup)) => html.push(markup),
      Some(FormContents::Tags(tags)) => {
        for tag in &tags {
          html.push(tag.to_html());
        }
      }
    }

    self.tag.set_text(html.join("\n"));
    self.tag.to_html()
  }

  /// The confirm-and-resubmit pattern: every element's submitted value as
  /// hidden inputs (list values emit `name[]` entries), the honeypot, and
  /// an optional confirm button.
  pub fn hidden_form(&mut self, confirm_button: Option<&Element>, exclude: &[&str]) -> String {
    let mut html: Vec<String> = Vec::new();

    for element in &self.elements {
      let Some(name) = element.name() else { continue };
      if exclude.contains(&name) {
        continue;
      }
      let name = escape_html(name);
      match element.value() {
        FieldValue::List(items) => {
          for item in items {
            let value = escape_html(&match item {
              FieldValue::Scalar(s) => s.clone(),
              other => other.joined(", "),
            });
            html.push(format!("<input type='hidden' name='{name}[]' value='{value}' />\n"));
          }
        }
        // File payloads cannot round-trip through hidden inputs.
        FieldValue::Files(_) => {}
        FieldValue::Scalar(s) => {
          let value = escape_html(s);
          html.push(format!("<input type='hidden' name='{name}' value='{value}' />\n"));
        }
        FieldValue::Absent => {
          html.push(format!("<input type='hidden' name='{name}' value='' />\n"));
        }
      }
    }

    if self.include_honeypot {
      html.push(Self::honeypot_field());
    }
    if let Some(button) = confirm_button {
      html.push(button.wrapped_html(true, None));
    }

    self.tag.set_text(html.join("\n"));
    self.tag.to_html()
  }

  /// Submitted form data formatted in the requested mode, one entry per
  /// non-excluded element.
  pub fn values(&mut self, ctx: &SubmissionContext, mode: OutputMode, exclude: &[&str]) -> String {
    self.ensure_validated(ctx);

    let mut contents = String::new();
    for element in &self.elements {
      if element.name().is_some_and(|name| exclude.contains(&name)) {
        continue;
      }
      contents.push_str(&element.formatted_value(mode));
    }

    match mode {
      OutputMode::Html => format!("<div class='form-values-html'>\n{contents}</div>\n"),
      OutputMode::HtmlEmail | OutputMode::Text => contents,
    }
  }

  fn ensure_validated(&mut self, ctx: &SubmissionContext) {
    if self.state.submitted() && !self.validation_run {
      self.validate(ctx);
    }
  }
}
