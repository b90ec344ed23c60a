//! DNS configuration for attached containers.
//!
//! The overlay network's DNS domain comes from the network agent, which runs
//! in a well-known container and answers `GET /domain` on its status port.
//! When the agent can't be reached we fall back to the configured default
//! domain and, unless injection is forced, leave DNS settings alone.

use crate::config::{DnsInjection, DnsSettings, ProxyConfig};
use crate::daemon::DaemonClient;
use crate::document::{lookup_object_mut, lookup_string, lookup_string_array, Document};
use crate::error::Result;
use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// The overlay network's DNS domain, as learned for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsDomain {
    pub domain: String,
    /// Whether the agent answered. `false` means `domain` is the fallback.
    pub agent_running: bool,
}

impl DnsDomain {
    pub fn fallback(default_domain: &str) -> Self {
        Self {
            domain: default_domain.to_string(),
            agent_running: false,
        }
    }
}

/// Where the DNS domain comes from. Never fails: sources fall back instead.
#[async_trait]
pub trait DomainSource {
    async fn dns_domain(&self) -> DnsDomain;
}

/// Asks the network agent container for its domain over HTTP.
pub struct AgentDomainProbe {
    daemon: Arc<dyn DaemonClient + Send + Sync>,
    http: reqwest::Client,
    agent_container: String,
    agent_port: u16,
    default_domain: String,
}

impl AgentDomainProbe {
    pub fn new(
        daemon: Arc<dyn DaemonClient + Send + Sync>,
        settings: &DnsSettings,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        // The agent sits on the local bridge; never route to it via a proxy.
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .context("Failed to build HTTP client for the network agent probe")?;

        Ok(Self {
            daemon,
            http,
            agent_container: settings.agent_container.clone(),
            agent_port: settings.agent_port,
            default_domain: settings.default_domain.clone(),
        })
    }

    async fn fetch_domain(&self, address: &str) -> std::result::Result<String, reqwest::Error> {
        let url = format!("http://{}:{}/domain", address, self.agent_port);
        self.http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl DomainSource for AgentDomainProbe {
    async fn dns_domain(&self) -> DnsDomain {
        let address = match self.daemon.container_address(&self.agent_container).await {
            Ok(Some(address)) => address,
            Ok(None) => {
                tracing::debug!(
                    "Network agent container '{}' has no address; using default domain",
                    self.agent_container
                );
                return DnsDomain::fallback(&self.default_domain);
            }
            Err(e) => {
                tracing::debug!(
                    "Cannot inspect network agent container '{}': {}",
                    self.agent_container,
                    e
                );
                return DnsDomain::fallback(&self.default_domain);
            }
        };

        match self.fetch_domain(&address).await {
            Ok(domain) => DnsDomain {
                domain,
                agent_running: true,
            },
            Err(e) => {
                tracing::debug!("Network agent at {} did not answer: {}", address, e);
                DnsDomain::fallback(&self.default_domain)
            }
        }
    }
}

/// Whether DNS injection can apply at all. When it can't, skip the probe.
pub fn injection_enabled(settings: &DnsSettings) -> bool {
    settings.injection != DnsInjection::Never
}

/// Point the container at the overlay DNS and give it a hostname in the
/// overlay domain when it has none.
///
/// `name` is the derived hostname; empty means there is none to set.
pub fn apply_dns(
    container: &mut Document,
    name: &str,
    fact: &DnsDomain,
    config: &ProxyConfig,
) -> Result<()> {
    let injection = config.dns.injection;
    if injection == DnsInjection::Never {
        return Ok(());
    }
    if !(fact.agent_running || injection == DnsInjection::Always) {
        return Ok(());
    }

    let host_config = lookup_object_mut(container, "HostConfig")?;
    let mut dns = lookup_string_array(host_config, "Dns")?;
    dns.push(config.docker_bridge_ip.to_string());
    host_config.insert("Dns".to_string(), Value::from(dns));

    let mut hostname = lookup_string(container, "Hostname")?;
    if hostname.is_empty() && !name.is_empty() {
        // Hostnames rarely carry the root dot.
        let domain = fact.domain.strip_suffix('.').unwrap_or(&fact.domain);
        if name.len() + 1 + domain.len() > config.dns.max_hostname_len {
            tracing::warn!("Container name [{}] too long to be used as hostname", name);
        } else {
            hostname = name.to_string();
            container.insert("Hostname".to_string(), Value::from(name));
            container.insert("Domainname".to_string(), Value::from(domain));
        }
    }

    let host_config = lookup_object_mut(container, "HostConfig")?;
    if lookup_string_array(host_config, "DnsSearch")?.is_empty() {
        // With a hostname the container already has its FQDN; don't let the
        // resolver append the overlay domain to every lookup.
        let search = if hostname.is_empty() {
            fact.domain.clone()
        } else {
            ".".to_string()
        };
        host_config.insert("DnsSearch".to_string(), Value::from(vec![search]));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_config, DnsInjection};
    use crate::daemon::{DaemonError, ImageDefaults};
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config(injection: DnsInjection) -> ProxyConfig {
        let mut config = default_config().unwrap();
        config.dns.injection = injection;
        config
    }

    fn running(domain: &str) -> DnsDomain {
        DnsDomain {
            domain: domain.to_string(),
            agent_running: true,
        }
    }

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_sets_hostname_and_search_dot() {
        let mut container = doc(json!({"HostConfig": {}}));
        apply_dns(&mut container, "web1", &running("weave.local."), &config(DnsInjection::Auto))
            .unwrap();

        assert_eq!(container["Hostname"], json!("web1"));
        assert_eq!(container["Domainname"], json!("weave.local"));
        assert_eq!(container["HostConfig"]["Dns"], json!(["172.17.0.1"]));
        assert_eq!(container["HostConfig"]["DnsSearch"], json!(["."]));
    }

    #[test]
    fn test_no_hostname_searches_domain() {
        let mut container = doc(json!({"HostConfig": {"Dns": ["8.8.8.8"]}}));
        apply_dns(&mut container, "", &running("weave.local."), &config(DnsInjection::Auto))
            .unwrap();

        assert!(container.get("Hostname").is_none());
        assert_eq!(container["HostConfig"]["Dns"], json!(["8.8.8.8", "172.17.0.1"]));
        assert_eq!(container["HostConfig"]["DnsSearch"], json!(["weave.local."]));
    }

    #[test]
    fn test_client_hostname_and_search_are_kept() {
        let mut container = doc(json!({
            "Hostname": "custom",
            "HostConfig": {"DnsSearch": ["corp.example"]}
        }));
        apply_dns(&mut container, "web1", &running("weave.local."), &config(DnsInjection::Auto))
            .unwrap();

        assert_eq!(container["Hostname"], json!("custom"));
        assert!(container.get("Domainname").is_none());
        assert_eq!(container["HostConfig"]["DnsSearch"], json!(["corp.example"]));
    }

    #[test]
    fn test_client_hostname_searches_dot() {
        let mut container = doc(json!({"Hostname": "custom"}));
        apply_dns(&mut container, "", &running("weave.local."), &config(DnsInjection::Auto))
            .unwrap();
        assert_eq!(container["HostConfig"]["DnsSearch"], json!(["."]));
    }

    #[test]
    fn test_too_long_hostname_is_skipped() {
        let name = "a".repeat(60);
        let mut container = doc(json!({}));
        apply_dns(&mut container, &name, &running("weave.local."), &config(DnsInjection::Auto))
            .unwrap();

        assert!(container.get("Hostname").is_none());
        assert!(container.get("Domainname").is_none());
        assert_eq!(container["HostConfig"]["DnsSearch"], json!(["weave.local."]));
    }

    #[test]
    fn test_hostname_exactly_at_limit() {
        // "x" * 52 + "." + "weave.local" is 64 characters.
        let name = "x".repeat(52);
        let mut container = doc(json!({}));
        apply_dns(&mut container, &name, &running("weave.local."), &config(DnsInjection::Auto))
            .unwrap();
        assert_eq!(container["Hostname"], json!(name));
    }

    #[test]
    fn test_agent_down_auto_is_noop() {
        let mut container = doc(json!({"HostConfig": {}}));
        let before = container.clone();
        apply_dns(
            &mut container,
            "web1",
            &DnsDomain::fallback("weave.local."),
            &config(DnsInjection::Auto),
        )
        .unwrap();
        assert_eq!(container, before);
    }

    #[test]
    fn test_agent_down_always_uses_fallback() {
        let mut container = doc(json!({}));
        apply_dns(
            &mut container,
            "",
            &DnsDomain::fallback("weave.local."),
            &config(DnsInjection::Always),
        )
        .unwrap();
        assert_eq!(container["HostConfig"]["DnsSearch"], json!(["weave.local."]));
    }

    #[test]
    fn test_never_is_noop() {
        let mut container = doc(json!({}));
        apply_dns(&mut container, "web1", &running("weave.local."), &config(DnsInjection::Never))
            .unwrap();
        assert!(container.is_empty());
        assert!(!injection_enabled(&config(DnsInjection::Never).dns));
    }

    #[test]
    fn test_bad_dns_type() {
        let mut container = doc(json!({"HostConfig": {"Dns": "8.8.8.8"}}));
        assert!(apply_dns(
            &mut container,
            "web1",
            &running("weave.local."),
            &config(DnsInjection::Auto)
        )
        .is_err());
    }

    /// Daemon stub that only knows where the agent container lives.
    struct AgentAt(std::result::Result<Option<String>, ()>);

    #[async_trait]
    impl DaemonClient for AgentAt {
        async fn inspect_image(
            &self,
            _name: &str,
        ) -> std::result::Result<Option<ImageDefaults>, DaemonError> {
            Ok(None)
        }

        async fn container_address(
            &self,
            _name: &str,
        ) -> std::result::Result<Option<String>, DaemonError> {
            self.0.clone().map_err(|_| DaemonError::Timeout {
                operation: "container inspection",
                after: Duration::from_secs(1),
            })
        }
    }

    fn probe(daemon: AgentAt, port: u16) -> AgentDomainProbe {
        let mut settings = default_config().unwrap().dns;
        settings.agent_port = port;
        AgentDomainProbe::new(Arc::new(daemon), &settings, Duration::from_secs(2)).unwrap()
    }

    /// Serve one HTTP response on a local port, returning the port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        });
        port
    }

    #[tokio::test]
    async fn test_probe_reads_agent_domain() {
        let port = serve_once("200 OK", "cluster.local.").await;
        let fact = probe(AgentAt(Ok(Some("127.0.0.1".to_string()))), port)
            .dns_domain()
            .await;
        assert_eq!(fact, running("cluster.local."));
    }

    #[tokio::test]
    async fn test_probe_falls_back_on_error_status() {
        let port = serve_once("500 Internal Server Error", "oops").await;
        let fact = probe(AgentAt(Ok(Some("127.0.0.1".to_string()))), port)
            .dns_domain()
            .await;
        assert_eq!(fact, DnsDomain::fallback("weave.local."));
    }

    #[tokio::test]
    async fn test_probe_falls_back_without_agent() {
        let fact = probe(AgentAt(Ok(None)), 6784).dns_domain().await;
        assert_eq!(fact, DnsDomain::fallback("weave.local."));

        let fact = probe(AgentAt(Err(())), 6784).dns_domain().await;
        assert!(!fact.agent_running);
    }
}
