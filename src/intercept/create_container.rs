//! Interceptor for `POST /containers/create`.
//!
//! Flow for each request:
//! 1. Parse the body and ask the network resolver whether the container
//!    joins the overlay network. If not, the body is left byte-for-byte alone.
//! 2. Bind the helper volume.
//! 3. Wrap the entrypoint (may inspect the image).
//! 4. Derive the hostname.
//! 5. Configure DNS (may probe the network agent).
//! 6. Serialize the rewritten body.
//!
//! The order matters: nothing is looked up for containers we won't touch, and
//! the hostname must be known before DNS search domains are chosen.

use crate::config::ProxyConfig;
use crate::daemon::DaemonClient;
use crate::document::{lookup_object, lookup_object_mut, lookup_string, lookup_string_array, Document};
use crate::error::{ProxyError, Result};
use crate::intercept::dns::{self, DomainSource};
use crate::intercept::{entrypoint, hostname, volume, Interceptor, ProxiedRequest};
use crate::network::{NetworkResolver, Verdict};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::Instrument;

pub struct CreateContainerInterceptor {
    config: Arc<ProxyConfig>,
    daemon: Arc<dyn DaemonClient + Send + Sync>,
    resolver: Arc<dyn NetworkResolver + Send + Sync>,
    domains: Arc<dyn DomainSource + Send + Sync>,
}

impl CreateContainerInterceptor {
    pub fn new(
        config: Arc<ProxyConfig>,
        daemon: Arc<dyn DaemonClient + Send + Sync>,
        resolver: Arc<dyn NetworkResolver + Send + Sync>,
        domains: Arc<dyn DomainSource + Send + Sync>,
    ) -> Self {
        Self {
            config,
            daemon,
            resolver,
            domains,
        }
    }

    /// Rewrite the body. Returns `None` when the container is left alone.
    pub async fn rewrite(&self, name: &str, body: &[u8]) -> Result<Option<Vec<u8>>> {
        let mut container: Document = serde_json::from_slice(body)?;

        let network_mode = lookup_string(&lookup_object(&container, "HostConfig")?, "NetworkMode")?;
        let env = lookup_string_array(&lookup_object(&container, "Config")?, "Env")?;

        match self.resolver.resolve(&network_mode, &env) {
            Verdict::Disabled { reason } => {
                tracing::info!("Leaving container alone because {}", reason);
                return Ok(None);
            }
            Verdict::Enabled { cidrs } => {
                tracing::info!("Creating container with addresses \"{}\"", cidrs.join(" "));
            }
        }

        volume::add_helper_volume(
            lookup_object_mut(&mut container, "HostConfig")?,
            &self.config.helper_volume,
        )?;
        entrypoint::wrap_entrypoint(
            &mut container,
            &self.config.wrapper_command,
            self.daemon.as_ref(),
        )
        .await?;
        let hostname = hostname::container_hostname(&container, name, &self.config.hostname)?;
        if dns::injection_enabled(&self.config.dns) {
            let fact = self.domains.dns_domain().await;
            dns::apply_dns(&mut container, &hostname, &fact, &self.config)?;
        }

        let body = serde_json::to_vec(&container).map_err(ProxyError::Encode)?;
        Ok(Some(body))
    }
}

#[async_trait]
impl Interceptor for CreateContainerInterceptor {
    async fn intercept_request(&self, request: &mut ProxiedRequest) -> Result<()> {
        let name = request.query_param("name").unwrap_or_default();
        let span = tracing::info_span!(
            "create_container",
            request_id = %uuid::Uuid::new_v4(),
            name = %name
        );

        let rewritten = self.rewrite(&name, &request.body).instrument(span).await?;
        if let Some(body) = rewritten {
            request.body = body;
        }
        Ok(())
    }
}
