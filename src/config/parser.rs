//! YAML config parser.
//!
//! Every key is optional; anything left out takes the built-in default.
//!
//! # Example config file:
//! ```yaml
//! helper_volume: weavewait
//! hostname:
//!   from_label: com.example.hostname
//!   match: "^([^.]+)\\..*$"
//!   replacement: "$1"
//! dns:
//!   injection: always
//! ```

use crate::config::defaults;
use crate::config::types::*;
use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

/// Raw YAML representation before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    helper_volume: Option<String>,
    #[serde(default)]
    wrapper_command: Option<StringOrVec>,
    #[serde(default)]
    hostname: RawHostname,
    #[serde(default)]
    dns: RawDns,
    #[serde(default)]
    docker_bridge_ip: Option<String>,
    #[serde(default)]
    no_default_ipam: bool,
    #[serde(default)]
    timeouts: RawTimeouts,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHostname {
    #[serde(default)]
    from_label: Option<String>,
    #[serde(default, rename = "match")]
    pattern: Option<String>,
    #[serde(default)]
    replacement: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDns {
    #[serde(default)]
    injection: Option<DnsInjection>,
    #[serde(default)]
    default_domain: Option<String>,
    #[serde(default)]
    agent_container: Option<String>,
    #[serde(default)]
    agent_port: Option<u16>,
    #[serde(default)]
    max_hostname_len: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTimeouts {
    #[serde(default)]
    daemon_secs: Option<u64>,
    #[serde(default)]
    probe_secs: Option<u64>,
}

/// The wrapper command may be written as one string or a list.
/// ```yaml
/// wrapper_command: /w/w              # single token
/// wrapper_command: ["/w/w", "-s"]    # several
/// ```
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrVec {
    Single(String),
    Multiple(Vec<String>),
}

impl StringOrVec {
    fn into_vec(self) -> Vec<String> {
        match self {
            StringOrVec::Single(s) => vec![s],
            StringOrVec::Multiple(v) => v,
        }
    }
}

/// Parse a config file from a path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<ProxyConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse a YAML config string.
pub fn parse_config_str(yaml: &str) -> Result<ProxyConfig> {
    let raw: RawConfig = if yaml.trim().is_empty() {
        RawConfig::default()
    } else {
        serde_yaml::from_str(yaml).context("Invalid YAML syntax in config file")?
    };
    convert_config(raw)
}

/// The configuration used when no file is found.
pub fn default_config() -> Result<ProxyConfig> {
    convert_config(RawConfig::default())
}

fn convert_config(raw: RawConfig) -> Result<ProxyConfig> {
    let helper_volume = raw
        .helper_volume
        .unwrap_or_else(|| defaults::HELPER_VOLUME.to_string());
    if helper_volume.trim().is_empty() || helper_volume.contains(':') {
        bail!(
            "helper_volume must be a non-empty volume name or path without ':' (got {:?})",
            helper_volume
        );
    }

    let wrapper_command = raw
        .wrapper_command
        .map(StringOrVec::into_vec)
        .unwrap_or_else(|| defaults::WRAPPER_COMMAND.iter().map(|s| s.to_string()).collect());
    if wrapper_command.first().map_or(true, |first| first.is_empty()) {
        bail!("wrapper_command must start with a non-empty executable");
    }

    let hostname = convert_hostname(raw.hostname).context("Invalid 'hostname' section")?;
    let dns = convert_dns(raw.dns).context("Invalid 'dns' section")?;

    let bridge_ip = raw
        .docker_bridge_ip
        .unwrap_or_else(|| defaults::DOCKER_BRIDGE_IP.to_string());
    let docker_bridge_ip: IpAddr = bridge_ip
        .parse()
        .with_context(|| format!("docker_bridge_ip is not an IP address: {:?}", bridge_ip))?;

    let timeouts = Timeouts {
        daemon: seconds(
            "timeouts.daemon_secs",
            raw.timeouts.daemon_secs.unwrap_or(defaults::DAEMON_TIMEOUT_SECS),
        )?,
        probe: seconds(
            "timeouts.probe_secs",
            raw.timeouts.probe_secs.unwrap_or(defaults::PROBE_TIMEOUT_SECS),
        )?,
    };

    Ok(ProxyConfig {
        helper_volume,
        wrapper_command,
        hostname,
        dns,
        docker_bridge_ip,
        no_default_ipam: raw.no_default_ipam,
        timeouts,
    })
}

fn convert_hostname(raw: RawHostname) -> Result<HostnameSettings> {
    let from_label = raw.from_label.filter(|label| !label.trim().is_empty());
    let pattern_str = raw
        .pattern
        .unwrap_or_else(|| defaults::HOSTNAME_MATCH.to_string());
    let pattern = Regex::new(&pattern_str)
        .with_context(|| format!("Invalid hostname match pattern: {:?}", pattern_str))?;

    Ok(HostnameSettings {
        from_label,
        pattern,
        replacement: raw
            .replacement
            .unwrap_or_else(|| defaults::HOSTNAME_REPLACEMENT.to_string()),
    })
}

fn convert_dns(raw: RawDns) -> Result<DnsSettings> {
    let default_domain = raw
        .default_domain
        .unwrap_or_else(|| defaults::DNS_DOMAIN.to_string());
    if default_domain.trim_end_matches('.').is_empty() {
        bail!("default_domain must not be empty");
    }

    let agent_container = raw
        .agent_container
        .unwrap_or_else(|| defaults::AGENT_CONTAINER.to_string());
    if agent_container.trim().is_empty() {
        bail!("agent_container must not be empty");
    }

    let agent_port = raw.agent_port.unwrap_or(defaults::AGENT_PORT);
    if agent_port == 0 {
        bail!("agent_port must not be 0");
    }

    let max_hostname_len = raw.max_hostname_len.unwrap_or(MAX_HOSTNAME_LEN);
    if max_hostname_len == 0 {
        bail!("max_hostname_len must be greater than 0");
    }

    Ok(DnsSettings {
        injection: raw.injection.unwrap_or(DnsInjection::Auto),
        default_domain,
        agent_container,
        agent_port,
        max_hostname_len,
    })
}

fn seconds(key: &str, secs: u64) -> Result<Duration> {
    if secs == 0 {
        bail!("{} must be greater than 0", key);
    }
    Ok(Duration::from_secs(secs))
}
