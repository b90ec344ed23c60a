//! Request interception for the container API.
//!
//! The surrounding proxy picks which requests to intercept and forwards them
//! afterwards. An interceptor only ever sees one request at a time: it gets
//! the request target and full body, and may replace the body.

pub mod create_container;
pub mod dns;
pub mod entrypoint;
pub mod hostname;
pub mod volume;

pub use create_container::CreateContainerInterceptor;
pub use dns::{AgentDomainProbe, DnsDomain, DomainSource};

use crate::error::Result;
use async_trait::async_trait;

/// A request on its way to the daemon.
#[derive(Debug, Clone)]
pub struct ProxiedRequest {
    /// Path and query, e.g. `/v1.41/containers/create?name=web1`.
    pub target: String,
    pub body: Vec<u8>,
}

impl ProxiedRequest {
    pub fn new(target: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            target: target.into(),
            body: body.into(),
        }
    }

    /// Value of a query parameter, percent-decoded.
    pub fn query_param(&self, key: &str) -> Option<String> {
        // Only the query matters; the base just makes the target parseable.
        let url = reqwest::Url::parse("http://daemon.invalid")
            .and_then(|base| base.join(&self.target))
            .ok()?;
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

/// A daemon response on its way back to the client.
#[derive(Debug, Clone)]
pub struct ProxiedResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait Interceptor {
    /// Inspect and possibly rewrite a request. An error means the request
    /// must not be forwarded.
    async fn intercept_request(&self, request: &mut ProxiedRequest) -> Result<()>;

    /// Inspect and possibly rewrite a response. Pass-through by default.
    async fn intercept_response(&self, _response: &mut ProxiedResponse) -> Result<()> {
        Ok(())
    }
}
