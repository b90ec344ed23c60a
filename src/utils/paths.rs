//! Config file discovery.
//!
//! Lookup order: an explicit path (flag or `OVERLAY_PROXY_CONFIG`), then
//! `.overlay-proxy.yaml` in the current directory or any parent, then
//! `~/.overlay-proxy/config.yaml`. No file at all means built-in defaults.

use std::path::{Path, PathBuf};

/// Project-local config file name.
pub const CONFIG_FILE_NAME: &str = ".overlay-proxy.yaml";

/// Find the config file walking up the directory tree.
pub fn find_config_walking_up(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// `~/.overlay-proxy/config.yaml`, if there is a home directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".overlay-proxy").join("config.yaml"))
}

/// Pick the config file to load, if any.
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        // An explicit path is returned even if missing so loading reports it.
        return Some(path.to_path_buf());
    }
    find_config_walking_up(cwd).or_else(|| user_config_path().filter(|p| p.is_file()))
}
