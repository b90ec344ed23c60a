//! `overlay-proxy transform`: run the create-container interceptor once.
//!
//! Reads a create-container request body from a file or stdin, rewrites it
//! against the local daemon exactly as the proxy would, and writes the result
//! to stdout. Bodies for containers that stay off the overlay network are
//! echoed back unchanged.

use crate::config::ProxyConfig;
use crate::daemon::{DaemonClient, DockerDaemon};
use crate::intercept::{AgentDomainProbe, CreateContainerInterceptor};
use crate::network::EnvCidrResolver;
use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Options for the `overlay-proxy transform` command.
#[derive(Debug, Default)]
pub struct TransformOptions {
    /// Container name, as the `name` query parameter would carry it.
    pub name: Option<String>,
    /// Body file (stdin when `None`).
    pub input: Option<PathBuf>,
}

/// Run the `overlay-proxy transform` command.
pub async fn run_transform(config: ProxyConfig, options: TransformOptions) -> Result<()> {
    let body = read_body(options.input.as_ref())?;

    let config = Arc::new(config);
    let daemon: Arc<dyn DaemonClient + Send + Sync> =
        Arc::new(DockerDaemon::new(config.timeouts.daemon));
    let probe = AgentDomainProbe::new(daemon.clone(), &config.dns, config.timeouts.probe)?;
    let interceptor = CreateContainerInterceptor::new(
        config.clone(),
        daemon,
        Arc::new(EnvCidrResolver::new(config.no_default_ipam)),
        Arc::new(probe),
    );

    let name = options.name.unwrap_or_default();
    let rewritten = match interceptor.rewrite(&name, &body).await {
        Ok(rewritten) => rewritten,
        Err(e) => {
            let status = e.status_code();
            return Err(anyhow::Error::new(e)
                .context(format!("Request would be rejected with HTTP {}", status)));
        }
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rewritten.as_deref().unwrap_or(body.as_slice()))
        .context("Failed to write to stdout")?;
    stdout.flush()?;

    Ok(())
}

fn read_body(input: Option<&PathBuf>) -> Result<Vec<u8>> {
    match input {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read request body: {}", path.display())),
        None => {
            let mut body = Vec::new();
            std::io::stdin()
                .read_to_end(&mut body)
                .context("Failed to read request body from stdin")?;
            Ok(body)
        }
    }
}
