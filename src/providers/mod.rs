//! External team-lookup providers.
//!
//! Defines the `TeamLookupProvider` trait and provides implementations for:
//! - football-data.org: club data for the major European competitions
//! - API-Football: widest coverage, keyed
//! - TheSportsDB: free fallback, no key required
//!
//! Providers are interchangeable: the resolver races every configured
//! provider and takes the first valid answer, so none of them has
//! inherent precedence over the others.

pub mod api_football;
pub mod football_data;
pub mod sportsdb;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::TeamIdentity;

/// Abstraction over external team-name lookup sources.
///
/// `Ok(None)` means the provider answered and found no such team,
/// a normal negative result, distinct from a transport failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamLookupProvider: Send + Sync {
    /// Look up a free-text team name and return its canonical identity
    /// if this source knows the team.
    async fn lookup(&self, name: &str) -> Result<Option<TeamIdentity>>;

    /// Provider name for logging and identification.
    fn name(&self) -> &str;
}
