//! Hostname derivation.
//!
//! The container name from the request (or a label, when configured) is run
//! through the configured rewrite. An empty result means "no hostname".

use crate::config::HostnameSettings;
use crate::document::{lookup_object, Document};
use crate::error::{ProxyError, Result};
use serde_json::Value;

pub fn container_hostname(
    container: &Document,
    name: &str,
    settings: &HostnameSettings,
) -> Result<String> {
    let candidate = match settings.from_label {
        Some(ref label) => hostname_from_label(container, label)?.unwrap_or_else(|| name.to_string()),
        None => name.to_string(),
    };
    Ok(settings.rewrite(&candidate))
}

/// The label's value, or `None` when it is absent or `null`.
fn hostname_from_label(container: &Document, label: &str) -> Result<Option<String>> {
    let labels = lookup_object(container, "Labels")?;
    match labels.get(label) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(ProxyError::wrong_type(label, "string", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use serde_json::json;

    fn settings(from_label: Option<&str>, pattern: &str, replacement: &str) -> HostnameSettings {
        HostnameSettings {
            from_label: from_label.map(String::from),
            pattern: Regex::new(pattern).unwrap(),
            replacement: replacement.to_string(),
        }
    }

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_name_with_identity_rewrite() {
        let s = settings(None, "^(.*)$", "$1");
        let container = doc(json!({"Labels": {"host": "ignored"}}));
        assert_eq!(container_hostname(&container, "web1", &s).unwrap(), "web1");
        assert_eq!(container_hostname(&container, "", &s).unwrap(), "");
    }

    #[test]
    fn test_rewrite_pattern() {
        let s = settings(None, "^aws-[0-9]+-(.*)$", "my-app-$1");
        let container = Document::new();
        assert_eq!(
            container_hostname(&container, "aws-12798186823-foo", &s).unwrap(),
            "my-app-foo"
        );
        assert_eq!(container_hostname(&container, "bar", &s).unwrap(), "bar");
    }

    #[test]
    fn test_label_overrides_name() {
        let s = settings(Some("com.example.hostname"), "^(.*)$", "$1");
        let container = doc(json!({"Labels": {"com.example.hostname": "db"}}));
        assert_eq!(container_hostname(&container, "web1", &s).unwrap(), "db");
    }

    #[test]
    fn test_absent_or_null_label_falls_back_to_name() {
        let s = settings(Some("com.example.hostname"), "^(.*)$", "$1");
        for container in [
            doc(json!({})),
            doc(json!({"Labels": null})),
            doc(json!({"Labels": {"other": "x"}})),
            doc(json!({"Labels": {"com.example.hostname": null}})),
        ] {
            assert_eq!(container_hostname(&container, "web1", &s).unwrap(), "web1");
        }
    }

    #[test]
    fn test_non_string_label() {
        let s = settings(Some("com.example.hostname"), "^(.*)$", "$1");
        let container = doc(json!({"Labels": {"com.example.hostname": 12}}));
        match container_hostname(&container, "web1", &s) {
            Err(ProxyError::WrongType { field, expected, .. }) => {
                assert_eq!(field, "com.example.hostname");
                assert_eq!(expected, "string");
            }
            other => panic!("Expected WrongType, got {:?}", other),
        }
    }
}
