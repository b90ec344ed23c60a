//! The polymorphic `Entrypoint` / `Cmd` field.
//!
//! The daemon accepts either a single string or a list of strings for these
//! fields, and clients send `null` or leave them out entirely. We normalize
//! once, right where the field is read, and work with `Vec<String>` after.

use crate::document::accessor::strings_from_array;
use crate::document::Document;
use crate::error::{ProxyError, Result};
use serde_json::Value;

const EXPECTED: &str = "string or array of strings";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandValue {
    Absent,
    Single(String),
    List(Vec<String>),
}

impl CommandValue {
    /// Read `key` from the document.
    pub fn lookup(doc: &Document, key: &str) -> Result<Self> {
        match doc.get(key) {
            None | Some(Value::Null) => Ok(CommandValue::Absent),
            Some(Value::String(s)) => Ok(CommandValue::Single(s.clone())),
            Some(Value::Array(items)) => {
                strings_from_array(key, items, EXPECTED).map(CommandValue::List)
            }
            Some(other) => Err(ProxyError::wrong_type(key, EXPECTED, other)),
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            CommandValue::Absent => Vec::new(),
            CommandValue::Single(s) => vec![s],
            CommandValue::List(v) => v,
        }
    }
}
