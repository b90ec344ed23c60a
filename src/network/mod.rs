//! Network membership: should this container join the overlay network?
//!
//! The interceptor only needs a verdict. How it is reached is behind the
//! `NetworkResolver` trait so tests (and other deployments) can swap it.

pub mod cidr;

pub use cidr::EnvCidrResolver;

/// Outcome of network membership resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Leave the container alone.
    Disabled { reason: String },
    /// Attach the container, with these address requests (never empty).
    Enabled { cidrs: Vec<String> },
}

impl Verdict {
    pub fn disabled(reason: impl Into<String>) -> Self {
        Verdict::Disabled {
            reason: reason.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Verdict::Enabled { .. })
    }
}

/// Decides network membership from the request's network mode and env.
pub trait NetworkResolver {
    fn resolve(&self, network_mode: &str, env: &[String]) -> Verdict;
}
