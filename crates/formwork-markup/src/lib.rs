/* crates/formwork-markup/src/lib.rs */

//! A small HTML tag tree: ordered attributes, nested contents, and string
//! rendering with escaping. The form layer composes these nodes instead of
//! concatenating markup by hand.

mod escape;

pub use escape::escape_html;

/// Contents of a tag: nothing, raw text, or nested child tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TagContents {
  #[default]
  Empty,
  Text(String),
  Children(Vec<Tag>),
}

/// An HTML tag with an ordered attribute list.
///
/// Empty tags render as `<name attrs />`; paired tags render as
/// `<name attrs>contents</name>`. Attribute values are HTML-escaped and
/// single-quoted.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
  name: String,
  attributes: Vec<(String, String)>,
  contents: TagContents,
  is_empty_tag: bool,
}

impl Tag {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), attributes: Vec::new(), contents: TagContents::Empty, is_empty_tag: false }
  }

  /// Convenience constructor for call sites with literal attribute lists.
  pub fn with_attributes(name: impl Into<String>, attributes: &[(&str, &str)]) -> Self {
    let mut tag = Self::new(name);
    tag.attributes =
      attributes.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    tag
  }

  pub fn tag_name(&self) -> &str {
    &self.name
  }

  pub fn set_tag_name(&mut self, name: impl Into<String>) {
    self.name = name.into();
  }

  pub fn is_empty_tag(&self) -> bool {
    self.is_empty_tag
  }

  pub fn set_is_empty_tag(&mut self, is_empty_tag: bool) {
    self.is_empty_tag = is_empty_tag;
  }

  /// Set an attribute, replacing an existing value in place (order kept).
  pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
    let name = name.into();
    let value = value.into();
    match self.attributes.iter_mut().find(|(k, _)| *k == name) {
      Some(entry) => entry.1 = value,
      None => self.attributes.push((name, value)),
    }
  }

  pub fn attribute(&self, name: &str) -> Option<&str> {
    self.attributes.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
  }

  pub fn has_attribute(&self, name: &str) -> bool {
    self.attribute(name).is_some()
  }

  /// Append to an attribute's value, inserting `separator` when the
  /// attribute already has a non-empty value. Creates the attribute when
  /// missing.
  pub fn append_to_attribute(&mut self, name: &str, value: &str, separator: &str) {
    let mut current = self.attribute(name).unwrap_or("").to_string();
    if !current.is_empty() {
      current.push_str(separator);
    }
    current.push_str(value);
    self.set_attribute(name, current);
  }

  pub fn remove_attribute(&mut self, name: &str) {
    self.attributes.retain(|(k, _)| k != name);
  }

  pub fn set_attributes(&mut self, attributes: Vec<(String, String)>) {
    self.attributes = attributes;
  }

  pub fn attributes(&self) -> &[(String, String)] {
    &self.attributes
  }

  /// Set raw text contents (no escaping).
  pub fn set_text(&mut self, text: impl Into<String>) {
    self.contents = TagContents::Text(text.into());
  }

  /// Set text contents, escaping at set time.
  pub fn set_escaped_text(&mut self, text: &str) {
    self.contents = TagContents::Text(escape_html(text));
  }

  pub fn set_children(&mut self, children: Vec<Tag>) {
    self.contents = TagContents::Children(children);
  }

  pub fn contents(&self) -> &TagContents {
    &self.contents
  }

  pub fn contents_html(&self) -> String {
    match &self.contents {
      TagContents::Empty => String::new(),
      TagContents::Text(text) => text.clone(),
      TagContents::Children(children) => {
        children.iter().map(Tag::to_html).collect::<Vec<_>>().join("\n")
      }
    }
  }

  /// The rendered attribute list: `name='value'` pairs joined by spaces,
  /// values escaped. A `name` attribute gains a trailing `[]` when the tag
  /// also carries a `multiple` attribute, so multi-value submissions
  /// arrive as arrays.
  pub fn attribute_string(&self, exclude: &[&str]) -> String {
    let multiple = self.has_attribute("multiple");
    let mut rendered = Vec::with_capacity(self.attributes.len());
    for (name, value) in &self.attributes {
      if exclude.contains(&name.as_str()) {
        continue;
      }
      let mut value = escape_html(value);
      if name == "name" && multiple {
        value.push_str("[]");
      }
      rendered.push(format!("{name}='{value}'"));
    }
    rendered.join(" ")
  }

  pub fn to_html(&self) -> String {
    self.to_html_excluding(&[])
  }

  /// Render to a string, omitting the named attributes.
  pub fn to_html_excluding(&self, exclude: &[&str]) -> String {
    let name = &self.name;
    let attributes = self.attribute_string(exclude);
    if self.is_empty_tag {
      format!("<{name} {attributes} />")
    } else {
      format!("<{name} {attributes}>{}</{name}>", self.contents_html())
    }
  }
}
