//! Lenient-on-absence, strict-on-type lookups.

use crate::document::Document;
use crate::error::{ProxyError, Result};
use serde_json::Value;

/// Look up a nested object. Absent or `null` reads as an empty object.
pub fn lookup_object(doc: &Document, key: &str) -> Result<Document> {
    match doc.get(key) {
        None | Some(Value::Null) => Ok(Document::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(other) => Err(ProxyError::wrong_type(key, "object", other)),
    }
}

/// Mutable access to a nested object, inserting an empty one when the key is
/// absent or `null` so that writes through it end up in the document.
pub fn lookup_object_mut<'a>(doc: &'a mut Document, key: &str) -> Result<&'a mut Document> {
    let slot = doc.entry(key).or_insert(Value::Null);
    if slot.is_null() {
        *slot = Value::Object(Document::new());
    }
    match slot {
        Value::Object(map) => Ok(map),
        other => Err(ProxyError::wrong_type(key, "object", other)),
    }
}

/// Look up a string. Absent or `null` reads as the empty string.
pub fn lookup_string(doc: &Document, key: &str) -> Result<String> {
    match doc.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ProxyError::wrong_type(key, "string", other)),
    }
}

/// Look up an array of strings. Absent or `null` reads as an empty vec.
pub fn lookup_string_array(doc: &Document, key: &str) -> Result<Vec<String>> {
    match doc.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => strings_from_array(key, items, "array of strings"),
        Some(other) => Err(ProxyError::wrong_type(key, "array of strings", other)),
    }
}

/// Collect an array whose elements must all be strings. On a bad element the
/// error reports the whole array, which is what the client actually sent.
pub(crate) fn strings_from_array(
    key: &str,
    items: &[Value],
    expected: &'static str,
) -> Result<Vec<String>> {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            _ => Err(ProxyError::wrong_type(
                key,
                expected,
                &Value::Array(items.to_vec()),
            )),
        })
        .collect()
}
