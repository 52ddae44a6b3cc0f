//! XML to nested value conversion.
//!
//! PubMed's `efetch` endpoint answers with XML whose shape depends on the data: an author with one
//! affiliation carries a single `AffiliationInfo` element, an author with three carries three. This
//! module turns such documents into [`serde_json::Value`] trees without trying to hide that
//! irregularity; the normalizer is the one place that deals with it.
//!
//! The conversion rules are:
//!
//! - each element becomes a key in its parent mapping
//! - an element repeated under the same parent becomes an array, but only once it occurs twice
//! - attributes become `@name` keys and text is kept under `$text`
//! - an element holding only text collapses to that string, an empty element collapses to `null`
//!
//! # Example
//!
//! ```
//! use pubscout::xml::convert_to_json;
//! use serde_json::json;
//!
//! let value = convert_to_json(r#"<a><b id="1">x</b><c>y</c><c>z</c><d/></a>"#);
//! assert_eq!(
//!   value,
//!   json!({ "a": { "b": { "@id": "1", "$text": "x" }, "c": ["y", "z"], "d": null } })
//! );
//! ```

use quick_xml::{
  events::{BytesStart, Event},
  Reader,
};
use serde_json::Map;

use super::*;

/// Key under which element text is stored when the element also has attributes or children.
pub const TEXT_KEY: &str = "$text";

/// Converts an XML document into a nested [`Value`].
///
/// Conversion never fails: a malformed document stops at the first reader error and whatever was
/// built up to that point is returned (the error is logged).
pub fn convert_to_json(xml: &str) -> Value {
  let mut reader = Reader::from_str(xml);
  let mut stack: Vec<(String, Map<String, Value>)> = Vec::new();
  let mut current = Map::new();

  loop {
    match reader.read_event() {
      Ok(Event::Start(ref e)) => {
        let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let element = attributes_of(e);
        stack.push((tag, std::mem::replace(&mut current, element)));
      },
      Ok(Event::Empty(ref e)) => {
        let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        insert_child(&mut current, tag, collapse(attributes_of(e)));
      },
      Ok(Event::Text(e)) => match e.unescape() {
        Ok(text) => push_text(&mut current, text.trim()),
        Err(err) => {
          warn!("Keeping raw text after unescape failure: {}", err);
          let raw = String::from_utf8_lossy(&e).into_owned();
          push_text(&mut current, raw.trim());
        },
      },
      Ok(Event::CData(e)) => {
        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
        push_text(&mut current, text.trim());
      },
      Ok(Event::End(_)) =>
        if let Some((tag, parent)) = stack.pop() {
          let element = std::mem::replace(&mut current, parent);
          insert_child(&mut current, tag, collapse(element));
        },
      Ok(Event::Eof) => break,
      Err(e) => {
        warn!("Stopping XML conversion at position {}: {}", reader.buffer_position(), e);
        break;
      },
      _ => (),
    }
  }

  // Unwind anything left open by a truncated document
  while let Some((tag, parent)) = stack.pop() {
    let element = std::mem::replace(&mut current, parent);
    insert_child(&mut current, tag, collapse(element));
  }

  Value::Object(current)
}

/// Parses an `efetch` response and returns its `PubmedArticle` records in document order.
///
/// The article element is coerced to a sequence, so a response holding a single article yields a
/// one-element vector just like a response holding many.
pub fn articles_from_xml(xml: &str) -> Vec<Value> {
  let document = convert_to_json(xml);
  trace!("Converted efetch document: {}", document);
  let set = document.get("PubmedArticleSet");
  normalize::as_sequence(set.and_then(|set| set.get("PubmedArticle")))
    .into_iter()
    .cloned()
    .collect()
}

/// Builds the starting mapping for an element from its attributes.
fn attributes_of(e: &BytesStart) -> Map<String, Value> {
  let mut element = Map::new();
  for attr in e.attributes().flatten() {
    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
    let value = match attr.unescape_value() {
      Ok(value) => value.into_owned(),
      Err(e) => {
        warn!("Keeping raw value of attribute `{}` after unescape failure: {}", key, e);
        String::from_utf8_lossy(&attr.value).into_owned()
      },
    };
    element.insert(format!("@{}", key), Value::String(value));
  }
  element
}

/// Appends a text fragment to the element being built.
///
/// Mixed content (text interleaved with inline markup such as `<i>`) arrives as several
/// fragments, which are joined with single spaces.
fn push_text(element: &mut Map<String, Value>, text: &str) {
  if text.is_empty() {
    return;
  }
  match element.get_mut(TEXT_KEY) {
    Some(Value::String(existing)) => {
      existing.push(' ');
      existing.push_str(text);
    },
    _ => {
      element.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    },
  }
}

/// Simplifies a finished element: text-only elements become strings, empty ones become null.
fn collapse(mut element: Map<String, Value>) -> Value {
  if element.is_empty() {
    Value::Null
  } else if element.len() == 1 && element.contains_key(TEXT_KEY) {
    element.remove(TEXT_KEY).unwrap_or(Value::Null)
  } else {
    Value::Object(element)
  }
}

/// Adds a finished element to its parent, promoting repeats to an array.
fn insert_child(parent: &mut Map<String, Value>, tag: String, value: Value) {
  match parent.get_mut(&tag) {
    Some(Value::Array(items)) => items.push(value),
    Some(existing) => {
      let first = existing.take();
      *existing = Value::Array(vec![first, value]);
    },
    None => {
      parent.insert(tag, value);
    },
  }
}
