//! Team-name resolution.
//!
//! Layered lookup: the static local roster answers first; on a miss,
//! every configured external provider is queried concurrently and the
//! first fulfilled-and-valid response wins. `None` is only returned
//! after every lookup has settled with no valid match.

pub mod roster;

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;
use crate::providers::TeamLookupProvider;
use crate::types::TeamIdentity;

/// Inputs shorter than this (after trimming) are rejected without any
/// provider call.
const MIN_INPUT_LEN: usize = 2;

/// Resolves free-text team names to canonical identities.
pub struct TeamResolver {
    providers: Vec<Arc<dyn TeamLookupProvider>>,
    provider_timeout: Duration,
}

impl TeamResolver {
    /// Create a resolver over the given provider set.
    ///
    /// Providers have no precedence among themselves: they are raced,
    /// and any valid first answer is acceptable.
    pub fn new(providers: Vec<Arc<dyn TeamLookupProvider>>, config: &ResolverConfig) -> Self {
        Self {
            providers,
            provider_timeout: Duration::from_secs(config.provider_timeout_secs),
        }
    }

    /// Resolver with no external providers (local roster only).
    pub fn local_only() -> Self {
        Self {
            providers: Vec::new(),
            provider_timeout: Duration::from_secs(ResolverConfig::default().provider_timeout_secs),
        }
    }

    /// Resolve a free-text team name.
    ///
    /// `None` is a normal negative outcome (team unknown everywhere),
    /// not an error. Individual provider failures are logged and treated
    /// as no-match for that provider.
    pub async fn resolve(&self, name: &str) -> Option<TeamIdentity> {
        let trimmed = name.trim();
        if trimmed.len() < MIN_INPUT_LEN {
            debug!(input = %name, "Input too short to resolve");
            return None;
        }

        // 1. Local roster, no network on the common path
        if let Some(identity) = roster::lookup(trimmed) {
            info!(input = %trimmed, canonical = %identity.canonical_name, "Resolved locally");
            return Some(identity);
        }

        if self.providers.is_empty() {
            debug!(input = %trimmed, "No providers configured, local miss is final");
            return None;
        }

        // 2. Provider fan-out: race with filter. First valid answer wins;
        //    losing in-flight calls are left to complete and be discarded.
        let mut lookups = FuturesUnordered::new();
        for provider in &self.providers {
            let provider = Arc::clone(provider);
            let input = trimmed.to_string();
            let timeout = self.provider_timeout;
            lookups.push(async move {
                let result = tokio::time::timeout(timeout, provider.lookup(&input)).await;
                (provider.name().to_string(), result)
            });
        }

        while let Some((provider, result)) = lookups.next().await {
            match result {
                Ok(Ok(Some(identity))) => {
                    if identity.canonical_name.is_empty() {
                        warn!(provider = %provider, "Provider returned empty canonical name, skipping");
                        continue;
                    }
                    info!(
                        input = %trimmed,
                        canonical = %identity.canonical_name,
                        provider = %provider,
                        "Resolved via provider"
                    );
                    return Some(identity);
                }
                Ok(Ok(None)) => {
                    debug!(provider = %provider, input = %trimmed, "Provider found no match");
                }
                Ok(Err(e)) => {
                    warn!(provider = %provider, error = %e, "Provider lookup failed, continuing");
                }
                Err(_) => {
                    warn!(
                        provider = %provider,
                        timeout_secs = self.provider_timeout.as_secs(),
                        "Provider lookup timed out, continuing"
                    );
                }
            }
        }

        info!(input = %trimmed, "No source could resolve team");
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
