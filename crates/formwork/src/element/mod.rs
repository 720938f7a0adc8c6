/* crates/formwork/src/element/mod.rs */

//! Form elements: one tagged kind per HTML input family, each carrying its
//! markup tag, constraints, resolved value, and validation state.

mod color;
mod datetime;
mod file;
mod format;
mod number;
mod options;
mod patterns;
mod phone;
mod validate;

#[cfg(test)]
mod tests;

pub use file::{SaveReport, UploadPolicy, UPLOAD_ERR_NO_FILE, UPLOAD_ERR_OK};
pub use format::OutputMode;
pub use options::{OptionEntry, OptionItem};

use formwork_markup::{escape_html, Tag};
use serde_json::{Map, Value};

use crate::context::{Method, SubmissionContext};
use crate::errors::FormError;
use crate::resolve::resolve_value;
use crate::state::FieldState;
use crate::value::{is_truthy, stringify, FieldValue};

/// The closed set of element kinds. Kind-specific behavior dispatches by
/// exhaustive matching, never by probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
  Text,
  Textarea,
  Select,
  Checkbox,
  CheckboxList,
  RadioList,
  Button,
  File,
  Color,
  Email,
  Search,
  Url,
  Date,
  DatetimeLocal,
  Month,
  Week,
  Time,
  Number,
  Range,
  Phone,
  Password,
  Hidden,
}

impl ElementKind {
  pub(crate) fn tag_name(self) -> &'static str {
    match self {
      ElementKind::Textarea => "textarea",
      ElementKind::Select => "select",
      ElementKind::Button => "button",
      _ => "input",
    }
  }

  pub(crate) fn is_empty_tag(self) -> bool {
    !matches!(self, ElementKind::Textarea | ElementKind::Select | ElementKind::Button)
  }

  /// The canonical `type` attribute forced onto the tag. `None` for
  /// buttons, which keep their declared `submit`/`reset`/`button`.
  pub(crate) fn type_attr(self) -> Option<&'static str> {
    match self {
      ElementKind::Text => Some("text"),
      ElementKind::Textarea => Some("textarea"),
      ElementKind::Select => Some("select"),
      ElementKind::Checkbox | ElementKind::CheckboxList => Some("checkbox"),
      ElementKind::RadioList => Some("radio"),
      ElementKind::Button => None,
      ElementKind::File => Some("file"),
      ElementKind::Color => Some("color"),
      ElementKind::Email => Some("email"),
      ElementKind::Search => Some("search"),
      ElementKind::Url => Some("url"),
      ElementKind::Date => Some("date"),
      ElementKind::DatetimeLocal => Some("datetime-local"),
      ElementKind::Month => Some("month"),
      ElementKind::Week => Some("week"),
      ElementKind::Time => Some("time"),
      ElementKind::Number => Some("number"),
      ElementKind::Range => Some("range"),
      ElementKind::Phone => Some("tel"),
      ElementKind::Password => Some("password"),
      ElementKind::Hidden => Some("hidden"),
    }
  }

  pub(crate) fn has_options(self) -> bool {
    matches!(self, ElementKind::Select | ElementKind::CheckboxList | ElementKind::RadioList)
  }

  pub(crate) fn is_input_list(self) -> bool {
    matches!(self, ElementKind::CheckboxList | ElementKind::RadioList)
  }

  /// Kinds whose markup carries selection state instead of a value
  /// attribute.
  pub(crate) fn renders_selection(self) -> bool {
    matches!(
      self,
      ElementKind::Select | ElementKind::Checkbox | ElementKind::CheckboxList | ElementKind::RadioList
    )
  }
}

/// A declared option on a select/checkbox/radio element.
#[derive(Debug, Clone)]
pub enum OptionSpec {
  /// A plain option: submitted value and display label.
  Item { value: String, label: String },
  /// A select optgroup with its own ordered options.
  Group { label: String, options: Vec<(String, String)> },
  /// A user-fillable "write-in" sub-field attached to one option of a
  /// checkbox/radio list.
  WriteIn { value: String, spec: Box<ElementSpec> },
}

/// Declarative settings for constructing an element.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
  pub attributes: Vec<(String, String)>,
  pub label: Option<String>,
  pub note: Option<String>,
  pub record_key: Option<String>,
  pub trim: Option<bool>,
  pub options: Vec<OptionSpec>,
  pub options_one_line: bool,
  pub disabled_options: Vec<String>,
  pub allowed_extensions: Vec<String>,
  pub disallowed_extensions: Option<Vec<String>>,
  pub filepath: Option<String>,
}

impl ElementSpec {
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

  pub fn label(mut self, label: impl Into<String>) -> Self {
    self.label = Some(label.into());
    self
  }

  pub fn note(mut self, note: impl Into<String>) -> Self {
    self.note = Some(note.into());
    self
  }

  pub fn record_key(mut self, key: impl Into<String>) -> Self {
    self.record_key = Some(key.into());
    self
  }

  pub fn trim(mut self, trim: bool) -> Self {
    self.trim = Some(trim);
    self
  }

  pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
    self.options.push(OptionSpec::Item { value: value.into(), label: label.into() });
    self
  }

  pub fn write_in(mut self, value: impl Into<String>, spec: ElementSpec) -> Self {
    self.options.push(OptionSpec::WriteIn { value: value.into(), spec: Box::new(spec) });
    self
  }

  pub fn group(mut self, label: impl Into<String>, options: &[(&str, &str)]) -> Self {
    self.options.push(OptionSpec::Group {
      label: label.into(),
      options: options.iter().map(|(v, l)| ((*v).to_string(), (*l).to_string())).collect(),
    });
    self
  }

  pub fn get_attr(&self, name: &str) -> Option<&str> {
    self.attributes.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
  }
}

/// One form element: markup tag, constraints, resolved value, and state.
#[derive(Debug, Clone)]
pub struct Element {
  tag: Tag,
  kind: ElementKind,
  label: Option<String>,
  note: Option<String>,
  trim: bool,
  record_key: Option<String>,
  value: FieldValue,
  state: FieldState,
  options: Vec<OptionItem>,
  options_one_line: bool,
  disabled_options: Vec<String>,
  upload: UploadPolicy,
  validated: bool,
}

impl Element {
  /// Construct an element of the given kind, seeding defaults from the
  /// record and resolving the submitted value from the context.
  pub fn new(
    kind: ElementKind,
    spec: ElementSpec,
    method: Method,
    record: Option<&Map<String, Value>>,
    ctx: &mut SubmissionContext,
  ) -> Result<Self, FormError> {
    let mut tag = Tag::new(kind.tag_name());
    tag.set_is_empty_tag(kind.is_empty_tag());
    tag.set_attributes(spec.attributes.clone());
    match kind.type_attr() {
      Some(type_attr) => tag.set_attribute("type", type_attr),
      None => {
        if tag.attribute("type").is_none() {
          tag.set_attribute("type", "submit");
        }
      }
    }

    let label = spec.label.as_ref().map(|l| l.trim().to_string());
    let record_key = spec.record_key.clone().or_else(|| {
      tag.attribute("name").filter(|name| !name.is_empty()).map(ToString::to_string)
    });
    let trim = spec.trim.unwrap_or(true);

    let mut upload = UploadPolicy::default();
    if let Some(disallowed) = &spec.disallowed_extensions {
      upload.disallowed_extensions = disallowed.clone();
    }
    upload.allowed_extensions = spec.allowed_extensions.clone();
    if let Some(filepath) = &spec.filepath {
      upload.filepath = filepath.clone();
    }

    let parent_name = tag.attribute("name").unwrap_or("").to_string();
    let options = options::build_options(kind, &spec, &parent_name, method, record, ctx)?;

    let mut element = Element {
      tag,
      kind,
      label,
      note: spec.note,
      trim,
      record_key,
      value: FieldValue::Absent,
      state: FieldState::new(method),
      options,
      options_one_line: spec.options_one_line,
      disabled_options: spec.disabled_options,
      upload,
      validated: false,
    };

    element.derive_id();
    if let Some(record) = record {
      element.seed_from_record(record);
    }
    element.state.derive_submitted(ctx);
    element.resolve_submitted_value(ctx);

    Ok(element)
  }

  /// Derive an `id` attribute from the name when none was declared:
  /// non-alphanumeric runs collapse to `_`, trimmed, prefixed `i_`.
  fn derive_id(&mut self) {
    if self.tag.attribute("id").is_some_and(|id| !id.is_empty()) {
      return;
    }
    let name = self.tag.attribute("name").unwrap_or("");
    let mut sanitized = String::with_capacity(name.len());
    let mut pending = false;
    for ch in name.chars() {
      if ch.is_ascii_alphanumeric() {
        if pending && !sanitized.is_empty() {
          sanitized.push('_');
        }
        pending = false;
        sanitized.push(ch);
      } else {
        pending = true;
      }
    }
    self.tag.set_attribute("id", format!("i_{sanitized}"));
  }

  /// Seed the default value (or, for checkboxes, the checked state) from a
  /// record of prior values.
  fn seed_from_record(&mut self, record: &Map<String, Value>) {
    let Some(key) = self.record_key.clone() else { return };
    let Some(value) = record.get(&key) else { return };
    if self.kind == ElementKind::Checkbox {
      if is_truthy(value) {
        self.tag.set_attribute("checked", "checked");
      } else {
        self.tag.remove_attribute("checked");
      }
      return;
    }
    let value = stringify(value);
    if !value.is_empty() {
      self.tag.set_attribute("value", value);
    }
  }

  fn resolve_submitted_value(&mut self, ctx: &mut SubmissionContext) {
    if !self.state.submitted() {
      return;
    }
    let Some(name) = self.tag.attribute("name").map(ToString::to_string) else { return };
    if name.is_empty() {
      return;
    }
    self.value = resolve_value(&name, self.kind == ElementKind::File, self.trim, ctx);
  }

  pub fn kind(&self) -> ElementKind {
    self.kind
  }

  pub fn name(&self) -> Option<&str> {
    self.tag.attribute("name")
  }

  pub fn method(&self) -> Method {
    self.state.method()
  }

  pub fn submitted(&self) -> bool {
    self.state.submitted()
  }

  pub fn attribute(&self, name: &str) -> Option<&str> {
    self.tag.attribute(name)
  }

  pub fn has_attribute(&self, name: &str) -> bool {
    self.tag.has_attribute(name)
  }

  pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.tag.set_attribute(name, value);
  }

  pub fn append_to_attribute(&mut self, name: &str, value: &str, separator: &str) {
    self.tag.append_to_attribute(name, value, separator);
  }

  pub fn remove_attribute(&mut self, name: &str) {
    self.tag.remove_attribute(name);
  }

  pub(crate) fn is_disabled(&self) -> bool {
    self.has_attribute("disabled")
  }

  pub fn label(&self) -> Option<&str> {
    self.label.as_deref()
  }

  pub fn set_label(&mut self, label: impl Into<String>) {
    self.label = Some(label.into());
  }

  pub fn note(&self) -> Option<&str> {
    self.note.as_deref()
  }

  pub fn set_note(&mut self, note: impl Into<String>) {
    self.note = Some(note.into());
  }

  pub fn trim(&self) -> bool {
    self.trim
  }

  pub fn record_key(&self) -> Option<&str> {
    self.record_key.as_deref()
  }

  pub fn value(&self) -> &FieldValue {
    &self.value
  }

  pub fn set_value(&mut self, value: FieldValue) {
    self.value = value;
  }

  pub fn state(&self) -> &FieldState {
    &self.state
  }

  pub fn state_mut(&mut self) -> &mut FieldState {
    &mut self.state
  }

  pub(crate) fn upload_policy(&self) -> &UploadPolicy {
    &self.upload
  }

  pub fn options(&self) -> &[OptionItem] {
    &self.options
  }

  pub(crate) fn validated(&self) -> bool {
    self.validated
  }

  pub(crate) fn mark_validated(&mut self) {
    self.validated = true;
  }

  /// This element's errors, followed by any write-in sub-field errors.
  pub fn errors(&self) -> Vec<String> {
    let mut errors = self.state.errors().to_vec();
    for item in &self.options {
      if let OptionEntry::WriteIn(sub) = &item.entry {
        errors.extend(sub.errors());
      }
    }
    errors
  }

  /// Copy the label into the placeholder attribute when none is set (or
  /// unconditionally with `overwrite`).
  pub fn set_placeholder_from_label(&mut self, overwrite: bool) {
    let Some(label) = self.label.clone().filter(|l| !l.is_empty()) else { return };
    let placeholder_empty = self.attribute("placeholder").is_none_or(str::is_empty);
    if placeholder_empty || overwrite {
      self.tag.set_attribute("placeholder", label);
    }
  }

  /// Copy the placeholder attribute into the label when none is set (or
  /// unconditionally with `overwrite`).
  pub fn set_label_from_placeholder(&mut self, overwrite: bool) {
    let Some(placeholder) =
      self.attribute("placeholder").filter(|p| !p.is_empty()).map(ToString::to_string)
    else {
      return;
    };
    if self.label.as_deref().is_none_or(str::is_empty) || overwrite {
      self.label = Some(placeholder);
    }
  }

  /// Text used to identify the element in messages: the label, falling
  /// back to the placeholder.
  pub fn identifying_text(&self) -> String {
    match self.label.as_deref() {
      Some(label) if !label.is_empty() => label.to_string(),
      _ => self.attribute("placeholder").unwrap_or("").to_string(),
    }
  }

  /// Pre-rendered label span embedded into validation messages.
  pub(crate) fn label_span(&self) -> String {
    let mut span = Tag::with_attributes("span", &[("class", "label")]);
    span.set_text(self.identifying_text());
    span.to_html()
  }

  /// CSS type class used on HTML wrappers; distinguishes single checkboxes
  /// from checkbox lists.
  pub fn type_class(&self) -> String {
    match self.kind {
      ElementKind::CheckboxList => "checkbox-list".to_string(),
      ElementKind::RadioList => "radio-list".to_string(),
      _ => self.attribute("type").unwrap_or("").to_lowercase(),
    }
  }

  fn is_button_like(&self) -> bool {
    matches!(
      self.attribute("type").unwrap_or("").to_lowercase().as_str(),
      "submit" | "reset" | "button"
    )
  }

  /// Render the element's own markup.
  pub fn html(&self) -> String {
    match self.kind {
      ElementKind::Textarea => self.textarea_html(),
      ElementKind::Select => options::select_html(self),
      ElementKind::CheckboxList | ElementKind::RadioList => options::input_list_html(self),
      ElementKind::Checkbox => self.checkbox_html(),
      ElementKind::Button => self.button_html(),
      _ => self.render_tag(&[]),
    }
  }

  /// Render the tag with the submitted value injected as the `value`
  /// attribute where that applies (submitted, not disabled, and the kind
  /// renders a value rather than selection state).
  fn render_tag(&self, exclude: &[&str]) -> String {
    let mut tag = self.tag.clone();
    if self.submitted() && !self.is_disabled() && !self.kind.renders_selection() {
      match &self.value {
        FieldValue::Scalar(s) => tag.set_attribute("value", s.clone()),
        FieldValue::Absent => tag.set_attribute("value", ""),
        // Sequence values cannot be expressed as a single value attribute.
        FieldValue::List(_) | FieldValue::Files(_) => tag.remove_attribute("value"),
      }
    }
    tag.to_html_excluding(exclude)
  }

  fn textarea_html(&self) -> String {
    let value = if self.submitted() && !self.is_disabled() {
      self.value.as_scalar().unwrap_or("").to_string()
    } else {
      self.attribute("value").unwrap_or("").to_string()
    };
    let mut tag = self.tag.clone();
    tag.set_escaped_text(&value);
    tag.to_html_excluding(&["type", "value"])
  }

  fn checkbox_html(&self) -> String {
    let mut tag = self.tag.clone();
    if self.submitted() && !self.is_disabled() {
      if self.value == FieldValue::Absent {
        tag.remove_attribute("checked");
      } else {
        tag.set_attribute("checked", "checked");
      }
    }
    tag.to_html()
  }

  fn button_html(&self) -> String {
    let mut tag = self.tag.clone();
    tag.set_text(self.label.clone().unwrap_or_default());
    tag.to_html()
  }

  /// The element's `<label>` tag, with `required`/`attention` class hooks.
  pub fn label_html(&self) -> String {
    let mut label = Tag::new("label");
    label.set_attribute("for", self.attribute("id").unwrap_or(""));
    label.set_escaped_text(self.label.as_deref().unwrap_or(""));
    if self.has_attribute("required") {
      label.append_to_attribute("class", "required", " ");
    }
    if !self.errors().is_empty() {
      label.append_to_attribute("class", "attention", " ");
    }
    label.to_html() + "\n"
  }

  /// The element wrapped in its form-row markup: wrapper div with computed
  /// classes, label, input span, and note. Hidden elements render bare.
  pub fn wrapped_html(&self, include_label: bool, input: Option<&str>) -> String {
    if self.kind == ElementKind::Hidden {
      return match input {
        Some(input) if !input.is_empty() => input.to_string(),
        _ => self.html(),
      };
    }

    let mut classes = Vec::new();
    let type_class = self.type_class();
    if !type_class.is_empty() {
      classes.push(type_class);
    }
    if !self.errors().is_empty() {
      classes.push("attention".to_string());
    }
    if self.is_disabled() {
      classes.push("disabled".to_string());
    }
    if self.is_button_like() {
      classes.push("aligned".to_string());
    }
    let classes = classes.join(" ");
    let id = self.attribute("id").unwrap_or("");

    let mut html = Vec::new();
    html.push(format!("<div class='form-element-wrapper {classes}' id='form_{id}'>\n"));

    if include_label && !self.is_button_like() {
      html.push(self.label_html());
    }

    match input {
      Some(input) if !input.is_empty() => html.push(input.to_string()),
      _ => {
        html.push(format!("<span class=\"input-wrapper\">{}</span>", self.html()));
        if let Some(note) = self.note.as_deref().filter(|n| !n.is_empty()) {
          html.push(format!("<span class=\"input-note\">{}</span>", escape_html(note)));
        }
      }
    }

    html.push("</div>\n".to_string());
    html.join("\n")
  }
}
