//! The container daemon, as seen by the interceptor.
//!
//! Only two read-only calls are needed: the defaults baked into an image and
//! the address of a named container. Both are behind `DaemonClient` so the
//! interception policies can be exercised without a daemon.

pub mod docker;

pub use docker::DockerDaemon;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Default command and entrypoint of an image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageDefaults {
    pub cmd: Vec<String>,
    pub entrypoint: Vec<String>,
}

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Cannot connect to the Docker daemon: {0}")]
    Connect(#[source] bollard::errors::Error),

    #[error("Docker API error: {0}")]
    Api(#[from] bollard::errors::Error),
}

#[async_trait]
pub trait DaemonClient {
    /// Inspect an image. `Ok(None)` means the daemon has no such image.
    async fn inspect_image(&self, name: &str) -> Result<Option<ImageDefaults>, DaemonError>;

    /// IP address of a container on the default bridge. `Ok(None)` when the
    /// container doesn't exist, has no network settings, or no address.
    async fn container_address(&self, name: &str) -> Result<Option<String>, DaemonError>;
}
