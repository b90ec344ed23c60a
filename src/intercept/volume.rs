//! Helper volume injection.
//!
//! Every attached container gets exactly one bind of the helper volume at
//! `HELPER_MOUNT_POINT`, and it is always the last entry in `Binds`.

use crate::config::HELPER_MOUNT_POINT;
use crate::document::{lookup_string_array, Document};
use crate::error::Result;
use serde_json::Value;

/// Replace any bind targeting the helper mount point with our own.
pub fn add_helper_volume(host_config: &mut Document, helper_volume: &str) -> Result<()> {
    let mut binds: Vec<String> = lookup_string_array(host_config, "Binds")?
        .into_iter()
        .filter(|bind| bind_target(bind) != Some(HELPER_MOUNT_POINT))
        .collect();
    binds.push(format!("{}:{}:ro", helper_volume, HELPER_MOUNT_POINT));

    host_config.insert("Binds".to_string(), Value::from(binds));
    Ok(())
}

/// Second field of `source:target[:mode]`.
fn bind_target(bind: &str) -> Option<&str> {
    bind.split(':').nth(1)
}
