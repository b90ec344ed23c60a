//! Default resolver: network mode plus an `OVERLAY_CIDR=` environment entry.
//!
//! ```text
//! docker run -e OVERLAY_CIDR="10.2.1.1/24 net:10.2.2.0/24" ...   # these addresses
//! docker run -e OVERLAY_CIDR=none ...                            # opt out
//! docker run ...                                                 # default subnet
//! docker run --net=host ...                                      # not ours
//! ```

use crate::network::{NetworkResolver, Verdict};

/// Environment variable a container sets to choose (or refuse) addresses.
pub const CIDR_ENV_VAR: &str = "OVERLAY_CIDR";

/// Address request meaning "allocate from the default subnet".
pub const DEFAULT_ALLOCATION: &str = "net:default";

/// Network modes the overlay attaches to. Anything else is `host`, `none`,
/// another container's namespace, or a network plugin.
const MANAGED_NETWORK_MODES: &[&str] = &["", "default", "bridge"];

#[derive(Debug, Clone, Default)]
pub struct EnvCidrResolver {
    /// Refuse containers that don't ask for addresses explicitly.
    pub no_default_ipam: bool,
}

impl EnvCidrResolver {
    pub fn new(no_default_ipam: bool) -> Self {
        Self { no_default_ipam }
    }
}

impl NetworkResolver for EnvCidrResolver {
    fn resolve(&self, network_mode: &str, env: &[String]) -> Verdict {
        if !MANAGED_NETWORK_MODES.contains(&network_mode) {
            return Verdict::disabled(format!("the container has '--net={}'", network_mode));
        }

        let requested = env.iter().find_map(|entry| {
            entry
                .strip_prefix(CIDR_ENV_VAR)
                .and_then(|rest| rest.strip_prefix('='))
        });

        match requested.map(str::trim) {
            Some("none") => Verdict::disabled(format!(
                "the container was created with '{}=none'",
                CIDR_ENV_VAR
            )),
            Some(value) if !value.is_empty() => Verdict::Enabled {
                cidrs: value.split_whitespace().map(String::from).collect(),
            },
            _ if self.no_default_ipam => Verdict::disabled(format!(
                "the container was created without specifying {}",
                CIDR_ENV_VAR
            )),
            _ => Verdict::Enabled {
                cidrs: vec![DEFAULT_ALLOCATION.to_string()],
            },
        }
    }
}
