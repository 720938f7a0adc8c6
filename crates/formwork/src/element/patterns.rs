/* crates/formwork/src/element/patterns.rs */

//! Built-in format patterns and fixed data used by validation.

use regex::Regex;

use super::ElementKind;

/// Built-in format pattern for a kind, matched in full when strict
/// validation asks for it.
pub(crate) fn type_pattern(kind: ElementKind) -> Option<&'static str> {
  match kind {
    ElementKind::Email => Some(r"[^@\s]+@[^@\s]+\.[^@\s]+"),
    ElementKind::Url => Some(r"https?://\S+"),
    ElementKind::Phone => Some(r"[0-9+()\-\. x]+"),
    ElementKind::Color => Some("#[0-9a-fA-F]{6}"),
    ElementKind::Date => Some(r"\d{4}-\d{2}-\d{2}"),
    ElementKind::Time => Some(r"\d{2}:\d{2}(?::\d{2})?"),
    ElementKind::DatetimeLocal => Some(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(?::\d{2})?"),
    ElementKind::Month => Some(r"\d{4}-\d{2}"),
    ElementKind::Week => Some(r"\d{4}-W\d{2}"),
    ElementKind::Number | ElementKind::Range => Some(r"-?\d+(?:\.\d+)?"),
    _ => None,
  }
}

/// Human-readable shape hint, appended to format-mismatch messages.
pub(crate) fn format_hint(kind: ElementKind) -> Option<&'static str> {
  match kind {
    ElementKind::Date => Some("YYYY-MM-DD"),
    ElementKind::Time => Some("HH:MM:SS"),
    ElementKind::DatetimeLocal => Some("YYYY-MM-DD\"T\"HH:MM:SS"),
    ElementKind::Month => Some("YYYY-MM"),
    ElementKind::Week => Some("YYYY-W##"),
    _ => None,
  }
}

/// Color syntax family patterns, matched in full against the value.
pub(crate) fn color_pattern(family: &str) -> Option<&'static str> {
  match family {
    "hex_strict" => Some("#[0-9a-fA-F]{6}"),
    "hex" => Some("#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})"),
    "rgb" => Some(r"rgb\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*\)"),
    "rgba" => Some(r"rgba\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*(?:0|1|0?\.\d+)\s*\)"),
    "hsl" => Some(r"hsl\(\s*\d{1,3}\s*,\s*\d{1,3}%\s*,\s*\d{1,3}%\s*\)"),
    "hsla" => Some(r"hsla\(\s*\d{1,3}\s*,\s*\d{1,3}%\s*,\s*\d{1,3}%\s*,\s*(?:0|1|0?\.\d+)\s*\)"),
    _ => None,
  }
}

/// Substring search. An unparseable pattern counts as a mismatch.
pub(crate) fn search_match(pattern: &str, value: &str) -> bool {
  Regex::new(pattern).map(|re| re.is_match(value)).unwrap_or(false)
}

/// Anchored full-string match. An unparseable pattern counts as a mismatch.
pub(crate) fn full_match(pattern: &str, value: &str) -> bool {
  Regex::new(&format!("^(?:{pattern})$")).map(|re| re.is_match(value)).unwrap_or(false)
}

/// The CSS named colors (case-insensitive lookup; pass a lowercased name).
pub(crate) fn is_css_color_name(name: &str) -> bool {
  CSS_COLOR_NAMES.binary_search(&name).is_ok()
}

// Sorted for binary search.
const CSS_COLOR_NAMES: &[&str] = &[
  "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
  "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
  "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue", "darkcyan",
  "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki", "darkmagenta",
  "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen",
  "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise", "darkviolet", "deeppink",
  "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick", "floralwhite", "forestgreen",
  "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow",
  "grey", "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki", "lavender",
  "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
  "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink", "lightsalmon",
  "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey", "lightsteelblue",
  "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon", "mediumaquamarine",
  "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen", "mediumslateblue",
  "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue", "mintcream",
  "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab", "orange",
  "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise", "palevioletred",
  "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple",
  "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell",
  "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen",
  "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white",
  "whitesmoke", "yellow", "yellowgreen",
];

/// Message for a non-ok, non-"no file" upload transport code.
pub(crate) fn upload_error_message(code: u32) -> Option<&'static str> {
  match code {
    1 => Some("the uploaded file exceeds the maximum allowed size"),
    2 => Some("the uploaded file exceeds the size limit specified in the form"),
    3 => Some("the file was only partially uploaded"),
    6 => Some("a temporary folder is missing"),
    7 => Some("failed to write the file to disk"),
    8 => Some("a server extension stopped the upload"),
    _ => None,
  }
}
