//! Entrypoint wrapping.
//!
//! The container must run the network-wait wrapper before anything else.
//! When the request doesn't say what to run, the image's defaults are looked
//! up so the wrapper has something to hand over to.

use crate::daemon::DaemonClient;
use crate::document::{lookup_string, CommandValue, Document};
use crate::error::{ProxyError, Result};
use serde_json::Value;

/// Make the container's entrypoint start with `wrapper`.
///
/// Fails with `MissingRequiredField` when the image has to be inspected but
/// the request names none, `NoSuchImage` when the daemon doesn't know it, and
/// `NoCommandSpecified` when there is nothing to run at all.
pub async fn wrap_entrypoint(
    container: &mut Document,
    wrapper: &[String],
    daemon: &(dyn DaemonClient + Send + Sync),
) -> Result<()> {
    let mut entrypoint = CommandValue::lookup(container, "Entrypoint")?.into_vec();
    let mut cmd = CommandValue::lookup(container, "Cmd")?.into_vec();
    let mut entrypoint_changed = false;

    if entrypoint.is_empty() {
        let image = lookup_string(container, "Image")?;
        if image.is_empty() {
            return Err(ProxyError::missing("Image"));
        }

        let defaults = daemon
            .inspect_image(&image)
            .await?
            .ok_or(ProxyError::NoSuchImage { name: image })?;

        if cmd.is_empty() && !defaults.cmd.is_empty() {
            cmd = defaults.cmd;
            container.insert("Cmd".to_string(), Value::from(cmd.clone()));
        }

        if !defaults.entrypoint.is_empty() {
            entrypoint = defaults.entrypoint;
            entrypoint_changed = true;
        }
    }

    if entrypoint.is_empty() && cmd.is_empty() {
        return Err(ProxyError::NoCommandSpecified);
    }

    if entrypoint.first() != wrapper.first() {
        entrypoint = wrapper.iter().cloned().chain(entrypoint).collect();
        entrypoint_changed = true;
    }

    if entrypoint_changed {
        container.insert("Entrypoint".to_string(), Value::from(entrypoint));
    }
    Ok(())
}
