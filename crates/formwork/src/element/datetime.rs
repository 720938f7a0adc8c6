/* crates/formwork/src/element/datetime.rs */

//! Date/time family validation: parse under the kind's format, then clamp
//! against declared min/max bounds.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use super::{patterns, Element, ElementKind};
use crate::value::FieldValue;

pub(super) fn validate(element: &mut Element, auto_correct: bool) {
  let label = element.label_span();
  let kind = element.kind();
  let raw = element.value().as_scalar().unwrap_or("").to_string();

  let Some(value) = parse(kind, &raw) else {
    let hint = patterns::format_hint(kind).map(|h| format!(" ({h})")).unwrap_or_default();
    element.state_mut().add_error(format!("{label} is not in the correct format.{hint}"));
    return;
  };

  if let Some(min_raw) = element.attribute("min").map(ToString::to_string) {
    if let Some(min) = parse(kind, &min_raw) {
      if value < min {
        if auto_correct {
          element.set_value(FieldValue::Scalar(format_value(kind, min)));
        } else {
          element
            .state_mut()
            .add_error(format!("{label} is below minimum allowed value of {min_raw}."));
          return;
        }
      }
    }
  }

  if let Some(max_raw) = element.attribute("max").map(ToString::to_string) {
    if let Some(max) = parse(kind, &max_raw) {
      if value > max {
        if auto_correct {
          element.set_value(FieldValue::Scalar(format_value(kind, max)));
        } else {
          element
            .state_mut()
            .add_error(format!("{label} is above maximum allowed value of {max_raw}."));
        }
      }
    }
  }
}

/// Parse a value under the kind's wire format. Times anchor to day zero so
/// the whole family compares as `NaiveDateTime`.
pub(super) fn parse(kind: ElementKind, s: &str) -> Option<NaiveDateTime> {
  let s = s.trim();
  match kind {
    ElementKind::Date => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0),
    ElementKind::Time => {
      let time = NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()?;
      NaiveDate::from_ymd_opt(1970, 1, 1).map(|d| d.and_time(time))
    }
    ElementKind::DatetimeLocal => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
      .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
      .ok(),
    ElementKind::Month => {
      let (year, month) = s.split_once('-')?;
      let year: i32 = year.parse().ok()?;
      let month: u32 = month.parse().ok()?;
      NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
    }
    ElementKind::Week => {
      let (year, week) = s.split_once("-W")?;
      let year: i32 = year.parse().ok()?;
      let week: u32 = week.parse().ok()?;
      NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?.and_hms_opt(0, 0, 0)
    }
    _ => None,
  }
}

/// Render a clamped boundary back in the kind's wire format.
pub(super) fn format_value(kind: ElementKind, value: NaiveDateTime) -> String {
  match kind {
    ElementKind::Date => value.format("%Y-%m-%d").to_string(),
    ElementKind::Time => value.format("%H:%M:%S").to_string(),
    ElementKind::DatetimeLocal => value.format("%Y-%m-%dT%H:%M:%S").to_string(),
    ElementKind::Month => value.format("%Y-%m").to_string(),
    ElementKind::Week => {
      let week = value.date().iso_week();
      format!("{:04}-W{:02}", week.year(), week.week())
    }
    _ => value.format("%Y-%m-%d").to_string(),
  }
}
