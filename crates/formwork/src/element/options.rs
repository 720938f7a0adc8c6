/* crates/formwork/src/element/options.rs */

//! Option lists for select, checkbox-list, and radio-list elements,
//! including "write-in" sub-fields and the list renderers.

use formwork_markup::Tag;
use serde_json::{Map, Value};

use super::{Element, ElementKind, ElementSpec, OptionSpec};
use crate::context::{Method, SubmissionContext};
use crate::errors::FormError;
use crate::factory;
use crate::value::FieldValue;

/// One declared option, in declaration order.
#[derive(Debug, Clone)]
pub struct OptionItem {
  pub value: String,
  pub entry: OptionEntry,
}

/// What an option renders as.
#[derive(Debug, Clone)]
pub enum OptionEntry {
  /// A display label for the option value.
  Label(String),
  /// A select optgroup: group label plus its own value/label pairs.
  Group { label: String, options: Vec<(String, String)> },
  /// A user-fillable sub-field whose entered text substitutes for the
  /// option's value when chosen.
  WriteIn(Box<Element>),
}

/// Script emitted once per list render that contains write-ins; toggles the
/// write-in's required attribute with its checkbox/radio state.
const TOGGLE_WRITE_IN_SCRIPT: &str = r#"<script>
function toggleWriteInRequire(id, name) {
    if (!id) return;
    var checkbox = document.getElementById(id);
    var writein = document.querySelector('[name="'+name+'"]');
    if (checkbox.checked)
        writein.setAttribute('required', 'required');
    else
        writein.removeAttribute('required');
}
</script>"#;

/// Convert declared option specs into owned option items. Write-in specs
/// become elements with a synthetic `{parent}_writein{n}` name and a
/// default placeholder; they are built with the minimal (method, record)
/// context rather than an owning form.
pub(super) fn build_options(
  kind: ElementKind,
  spec: &ElementSpec,
  parent_name: &str,
  method: Method,
  record: Option<&Map<String, Value>>,
  ctx: &mut SubmissionContext,
) -> Result<Vec<OptionItem>, FormError> {
  if spec.options.is_empty() {
    return Ok(Vec::new());
  }
  if !kind.has_options() {
    return Err(FormError::options("options declared on an element kind without options"));
  }

  let mut items = Vec::with_capacity(spec.options.len());
  let mut ordinal = 1;
  for option in &spec.options {
    let item = match option {
      OptionSpec::Item { value, label } => {
        OptionItem { value: value.clone(), entry: OptionEntry::Label(label.clone()) }
      }
      OptionSpec::Group { label, options } => {
        if kind != ElementKind::Select {
          return Err(FormError::options("option groups are only supported on select elements"));
        }
        OptionItem {
          value: label.clone(),
          entry: OptionEntry::Group { label: label.clone(), options: options.clone() },
        }
      }
      OptionSpec::WriteIn { value, spec } => {
        if !kind.is_input_list() {
          return Err(FormError::options(
            "write-in options are only supported on checkbox and radio lists",
          ));
        }
        let mut sub = (**spec).clone();
        if sub.get_attr("name").is_none() {
          sub = sub.attr("name", format!("{parent_name}_writein{ordinal}"));
          ordinal += 1;
        }
        if sub.get_attr("placeholder").is_none() {
          sub = sub.attr("placeholder", "Other (please specify)");
        }
        let element = factory::create(sub, method, record, ctx)?;
        OptionItem { value: value.clone(), entry: OptionEntry::WriteIn(Box::new(element)) }
      }
    };
    items.push(item);
  }
  Ok(items)
}

impl Element {
  /// Whether the given option value is currently selected (or checked).
  /// Computed on demand from the submitted value, or from the `value`
  /// attribute when unsubmitted or disabled; never cached on the options.
  pub fn is_option_selected(&self, option_value: &str) -> bool {
    let option_value = option_value.trim();
    if self.submitted() && !self.is_disabled() {
      match &self.value {
        FieldValue::Scalar(s) => s == option_value,
        FieldValue::List(items) => items
          .iter()
          .any(|item| matches!(item, FieldValue::Scalar(s) if s == option_value)),
        FieldValue::Absent | FieldValue::Files(_) => false,
      }
    } else {
      self.attribute("value").unwrap_or("") == option_value
    }
  }

  /// The write-in sub-elements, in option order.
  pub fn write_ins(&self) -> Vec<&Element> {
    self
      .options
      .iter()
      .filter_map(|item| match &item.entry {
        OptionEntry::WriteIn(sub) => Some(sub.as_ref()),
        _ => None,
      })
      .collect()
  }

  /// The display label declared for an option value, if any.
  pub(super) fn option_label(&self, value: &str) -> Option<&str> {
    self.options.iter().find_map(|item| match &item.entry {
      OptionEntry::Label(label) if item.value == value => Some(label.as_str()),
      _ => None,
    })
  }
}

/// Render a select element: placeholder option, options, and optgroups,
/// with selection computed on demand.
pub(super) fn select_html(element: &Element) -> String {
  let mut option_tags: Vec<Tag> = Vec::new();

  let placeholder = element.attribute("placeholder").unwrap_or("");
  let auto_placeholder = !element.has_attribute("required")
    && !element.has_attribute("multiple")
    && !element.has_attribute("size");
  if auto_placeholder || !placeholder.is_empty() {
    let mut tag = Tag::with_attributes("option", &[("value", ""), ("class", "placeholder")]);
    tag.set_escaped_text(placeholder);
    option_tags.push(tag);
  }

  for item in element.options() {
    match &item.entry {
      OptionEntry::Label(label) => {
        option_tags.push(option_tag(element, &item.value, label));
      }
      OptionEntry::Group { label, options } => {
        let mut group = Tag::new("optgroup");
        group.set_attribute("label", label.clone());
        group.set_children(
          options.iter().map(|(value, label)| option_tag(element, value, label)).collect(),
        );
        option_tags.push(group);
      }
      // Construction rejects write-ins on selects.
      OptionEntry::WriteIn(_) => {}
    }
  }

  let mut tag = element.tag.clone();
  tag.set_children(option_tags);
  tag.to_html_excluding(&["type", "value", "placeholder"])
}

fn option_tag(element: &Element, value: &str, label: &str) -> Tag {
  let mut tag = Tag::new("option");
  tag.set_attribute("value", value);
  if element.is_option_selected(value) {
    tag.set_attribute("selected", "selected");
  }
  if element.disabled_options.iter().any(|d| d == value) {
    tag.set_attribute("disabled", "disabled");
  }
  tag.set_text(label);
  tag
}

/// Render a checkbox or radio list: one input per option, write-ins inline
/// with their toggle wiring, and the shared toggle script when needed.
pub(super) fn input_list_html(element: &Element) -> String {
  if element.options().is_empty() {
    return String::new();
  }

  let is_checkbox = element.kind() == ElementKind::CheckboxList;
  let mut exclude: Vec<&str> = vec!["id", "value"];
  // A required attribute on every checkbox would demand all of them.
  if is_checkbox && element.options().len() > 1 {
    exclude.push("required");
  }

  let mut base = element.tag.clone();
  // Multiple checkboxes under one name submit as an array. The markup
  // layer already appends `[]` when a `multiple` attribute is present.
  if is_checkbox && element.options().len() > 1 && !base.has_attribute("multiple") {
    base.append_to_attribute("name", "[]", "");
  }
  for excluded in &exclude {
    base.remove_attribute(excluded);
  }

  let id = element.attribute("id").unwrap_or("").to_string();
  let mut wrapper = Tag::with_attributes("div", &[("class", "form-options")]);
  if element.options_one_line {
    wrapper.append_to_attribute("class", "one-line", " ");
  }

  let mut html: Vec<String> = Vec::new();
  let mut has_write_ins = false;

  for (i, item) in element.options().iter().enumerate() {
    let n = i + 1;
    let write_in = match &item.entry {
      OptionEntry::WriteIn(sub) => {
        has_write_ins = true;
        Some(sub.as_ref())
      }
      _ => None,
    };

    // A write-in's checkbox submits the write-in's field name as its value
    // so validation can tell which option was picked.
    let option_value = match write_in {
      Some(sub) => sub.name().unwrap_or(""),
      None => item.value.as_str(),
    };

    let mut input = base.clone();
    if element.is_option_selected(option_value) {
      input.set_attribute("checked", "checked");
    } else {
      input.remove_attribute("checked");
    }
    input.set_attribute("id", format!("{id}-{n}"));
    input.set_attribute("value", option_value);
    if write_in.is_some() {
      input.append_to_attribute("onchange", "toggleWriteInRequire(this.id, this.value);", " ");
    }
    html.push(input.to_html());

    match (&item.entry, write_in) {
      (_, Some(sub)) => {
        // Typing into the write-in checks its option.
        let mut sub = sub.clone();
        sub.append_to_attribute(
          "onkeyup",
          &format!("if (this.value != '') document.getElementById(\"{id}-{n}\").checked = true;"),
          "; ",
        );
        if sub.label().is_some_and(|l| !l.is_empty()) {
          html.push(sub.label_html());
        }
        html.push(sub.html());
      }
      (OptionEntry::Label(text), None) => {
        let mut label = Tag::with_attributes("label", &[("for", ""), ("class", "inline")]);
        label.set_escaped_text(text);
        html.push(label.to_html());
      }
      _ => {}
    }

    if !element.options_one_line {
      html.push("<br />\n".to_string());
    }
  }

  if has_write_ins {
    html.push(TOGGLE_WRITE_IN_SCRIPT.to_string());
  }

  wrapper.set_text(html.join("\n"));
  wrapper.to_html()
}
