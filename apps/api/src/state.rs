use std::sync::Arc;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::outlook::client::OutlookSource;
use crate::outlook::rating::Outlook;
use crate::outlook::OutlookKey;
use crate::programs::client::ProgramsClient;
use crate::unit_groups::UnitGroupDirectory;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Outlook upstream behind its seam so tests can substitute a stub.
    pub outlook: Arc<dyn OutlookSource>,
    pub programs: ProgramsClient,
    pub unit_groups: Arc<UnitGroupDirectory>,
    /// Process-wide outlook cache, keyed by (NOC, region id).
    pub outlook_cache: Arc<TtlCache<OutlookKey, Outlook>>,
    pub config: Config,
}
