//! Built-in defaults and the config template written by `overlay-proxy init`.

pub const HELPER_VOLUME: &str = "weavewait";
pub const WRAPPER_COMMAND: &[&str] = &["/w/w"];
pub const HOSTNAME_MATCH: &str = "^(.*)$";
pub const HOSTNAME_REPLACEMENT: &str = "$1";
pub const DNS_DOMAIN: &str = "weave.local.";
pub const AGENT_CONTAINER: &str = "weave";
pub const AGENT_PORT: u16 = 6784;
pub const DOCKER_BRIDGE_IP: &str = "172.17.0.1";
pub const DAEMON_TIMEOUT_SECS: u64 = 10;
pub const PROBE_TIMEOUT_SECS: u64 = 2;

/// Default configuration file. Every key is optional; this spells them all
/// out so users can see what there is to change.
pub const DEFAULT_CONFIG_YAML: &str = r#"# overlay-proxy configuration

# Volume holding the network-wait helper, mounted read-only at /w.
helper_volume: weavewait

# Prepended to every attached container's entrypoint.
wrapper_command: ["/w/w"]

hostname:
  # Use this label's value instead of the container name, when set.
  # from_label: com.example.hostname
  match: "^(.*)$"
  replacement: "$1"

dns:
  # auto: only when the network agent is running
  # always: even when it isn't
  # never: leave DNS settings alone
  injection: auto
  default_domain: weave.local.
  agent_container: weave
  agent_port: 6784
  max_hostname_len: 64

docker_bridge_ip: 172.17.0.1

# Only attach containers that set OVERLAY_CIDR explicitly.
no_default_ipam: false

timeouts:
  daemon_secs: 10
  probe_secs: 2
"#;
