//! Typed access to the loosely-typed create-container body.
//!
//! The body stays a generic JSON tree so that fields we don't touch survive
//! the round trip untouched. Everything that reads from it goes through the
//! accessors here: absent (or `null`) fields read as zero values, fields of
//! the wrong shape fail with `ProxyError::WrongType`.

pub mod accessor;
pub mod command;

pub use accessor::{lookup_object, lookup_object_mut, lookup_string, lookup_string_array};
pub use command::CommandValue;

/// A JSON object, in the order the client sent its keys.
pub type Document = serde_json::Map<String, serde_json::Value>;
