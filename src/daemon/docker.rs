//! `DaemonClient` backed by the bollard crate.
//!
//! The client connects on first use, so requests that never need the daemon
//! (opted-out or malformed bodies) work without one. Every call is bounded by
//! the configured daemon timeout.

use crate::daemon::{DaemonClient, DaemonError, ImageDefaults};
use async_trait::async_trait;
use bollard::container::InspectContainerOptions;
use bollard::errors::Error as BollardError;
use bollard::Docker;
use std::future::Future;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Connection to the real container daemon.
pub struct DockerDaemon {
    docker: OnceCell<Docker>,
    timeout: Duration,
}

impl DockerDaemon {
    /// Use the local defaults (`DOCKER_HOST` or the unix socket). Nothing is
    /// checked until the first inspection.
    pub fn new(timeout: Duration) -> Self {
        Self {
            docker: OnceCell::new(),
            timeout,
        }
    }

    pub fn with_client(docker: Docker, timeout: Duration) -> Self {
        Self {
            docker: OnceCell::from(docker),
            timeout,
        }
    }

    async fn client(&self) -> Result<&Docker, DaemonError> {
        self.docker
            .get_or_try_init(|| async {
                Docker::connect_with_local_defaults().map_err(DaemonError::Connect)
            })
            .await
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, BollardError>>,
    ) -> Result<T, DaemonError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(DaemonError::from),
            Err(_) => Err(DaemonError::Timeout {
                operation,
                after: self.timeout,
            }),
        }
    }
}

fn is_not_found(err: &DaemonError) -> bool {
    matches!(
        err,
        DaemonError::Api(BollardError::DockerResponseServerError {
            status_code: 404,
            ..
        })
    )
}

#[async_trait]
impl DaemonClient for DockerDaemon {
    async fn inspect_image(&self, name: &str) -> Result<Option<ImageDefaults>, DaemonError> {
        let docker = self.client().await?;
        let image = match self
            .bounded("image inspection", docker.inspect_image(name))
            .await
        {
            Ok(image) => image,
            Err(e) if is_not_found(&e) => return Ok(None),
            Err(e) => return Err(e),
        };

        let config = image.config.unwrap_or_default();
        Ok(Some(ImageDefaults {
            cmd: config.cmd.unwrap_or_default(),
            entrypoint: config.entrypoint.unwrap_or_default(),
        }))
    }

    async fn container_address(&self, name: &str) -> Result<Option<String>, DaemonError> {
        let docker = self.client().await?;
        let container = match self
            .bounded(
                "container inspection",
                docker.inspect_container(name, None::<InspectContainerOptions>),
            )
            .await
        {
            Ok(container) => container,
            Err(e) if is_not_found(&e) => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(container
            .network_settings
            .and_then(|settings| settings.ip_address)
            .filter(|address| !address.is_empty()))
    }
}
