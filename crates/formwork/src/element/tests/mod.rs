/* crates/formwork/src/element/tests/mod.rs */

mod validation;

use serde_json::{Map, Value};

use crate::context::{Method, SubmissionContext};
use crate::element::{Element, ElementSpec};
use crate::factory;

fn to_map(entries: &[(&str, Value)]) -> Map<String, Value> {
  entries.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect()
}

/// A post submission carrying the given body parameters.
fn post_ctx(entries: &[(&str, Value)]) -> SubmissionContext {
  SubmissionContext::new(Method::Post).with_body(to_map(entries))
}

/// A post submission carrying uploaded-file descriptors.
fn files_ctx(entries: &[(&str, Value)]) -> SubmissionContext {
  SubmissionContext::new(Method::Post).with_files(to_map(entries))
}

/// An unsubmitted request.
fn fresh_ctx() -> SubmissionContext {
  SubmissionContext::new(Method::Post)
}

fn build(spec: ElementSpec, ctx: &mut SubmissionContext) -> Element {
  factory::create(spec, Method::Post, None, ctx).expect("create element")
}

fn build_with_record(
  spec: ElementSpec,
  record: &[(&str, Value)],
  ctx: &mut SubmissionContext,
) -> Element {
  let record = to_map(record);
  factory::create(spec, Method::Post, Some(&record), ctx).expect("create element")
}
