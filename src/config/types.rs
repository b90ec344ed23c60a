//! Validated, read-only proxy configuration.
//!
//! Built once at startup by the parser and shared as `Arc<ProxyConfig>` with
//! every request handler. Nothing in here changes after construction.

use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

/// Where the helper volume is mounted inside every attached container.
pub const HELPER_MOUNT_POINT: &str = "/w";

/// Longest `hostname.domainname` the daemon accepts.
pub const MAX_HOSTNAME_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Source of the read-only helper volume bound at `HELPER_MOUNT_POINT`.
    pub helper_volume: String,
    /// Tokens prepended to the container's entrypoint.
    pub wrapper_command: Vec<String>,
    pub hostname: HostnameSettings,
    pub dns: DnsSettings,
    /// Address appended to `HostConfig.Dns`.
    pub docker_bridge_ip: IpAddr,
    /// Only attach containers that request addresses explicitly.
    pub no_default_ipam: bool,
    pub timeouts: Timeouts,
}

/// How a container's hostname is derived from its name.
#[derive(Debug, Clone)]
pub struct HostnameSettings {
    /// Label whose value, when present, replaces the container name.
    pub from_label: Option<String>,
    pub pattern: Regex,
    pub replacement: String,
}

impl HostnameSettings {
    /// Apply the rewrite to a candidate name.
    pub fn rewrite(&self, candidate: &str) -> String {
        self.pattern
            .replace_all(candidate, self.replacement.as_str())
            .into_owned()
    }
}

/// When to point containers at the overlay network's DNS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DnsInjection {
    /// Only when the network agent is up.
    Auto,
    /// Even when the agent can't be reached.
    Always,
    /// Never touch DNS settings.
    Never,
}

impl fmt::Display for DnsInjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsInjection::Auto => write!(f, "auto"),
            DnsInjection::Always => write!(f, "always"),
            DnsInjection::Never => write!(f, "never"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DnsSettings {
    pub injection: DnsInjection,
    /// Domain used when the agent can't tell us its own.
    pub default_domain: String,
    /// Name of the container running the network agent.
    pub agent_container: String,
    /// Port of the agent's HTTP status endpoint.
    pub agent_port: u16,
    pub max_hostname_len: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub daemon: Duration,
    pub probe: Duration,
}
