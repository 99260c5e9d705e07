//! Labour market outlook retrieval and normalization for NOC unit groups.
//!
//! The upstream LMI-EO API is reached only through [`client::OutlookClient`];
//! handlers go through the process-wide cache so each (unit group, region)
//! pair is fetched at most once per expiry window.

pub mod client;
pub mod handlers;
pub mod rating;

use std::time::Duration;

/// Cached outlooks expire after two months; there is no earlier invalidation.
pub const OUTLOOK_CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 30 * 2);

/// Cache key for one (unit group, region) outlook.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutlookKey {
    pub noc: String,
    pub region_id: String,
}
