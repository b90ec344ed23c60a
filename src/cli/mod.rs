pub mod check;
pub mod init;
pub mod transform;

use crate::config::{self, ProxyConfig};
use crate::utils::paths;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load the proxy config, returning the file it came from (`None` means
/// built-in defaults).
pub fn load_config(explicit: Option<&Path>) -> Result<(ProxyConfig, Option<PathBuf>)> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    match paths::resolve_config_path(explicit, &cwd) {
        Some(path) => Ok((config::parse_config_file(&path)?, Some(path))),
        None => Ok((config::default_config()?, None)),
    }
}
