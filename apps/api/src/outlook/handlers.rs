use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::outlook::client::OutlookError;
use crate::outlook::rating::{Outlook, OutlookPotential};
use crate::outlook::OutlookKey;
use crate::regions::{region_by_id, Region};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OutlookQuery {
    pub region: Option<String>,
}

/// Composed page data for one unit group's outlook in one region.
#[derive(Debug, Serialize)]
pub struct OutlookReport {
    pub noc: String,
    pub title: String,
    pub jobs: Vec<String>,
    pub requirements: Vec<String>,
    pub duties: Vec<String>,
    pub outlook: OutlookPotential,
    pub outlook_verbose: String,
    pub trends: Value,
    pub region: String,
}

/// GET /api/v1/outlook/:noc
///
/// Resolves the unit group from the bundled directory before touching the
/// upstream, so unknown codes 404 without spending an API call.
pub async fn handle_outlook(
    State(state): State<AppState>,
    Path(noc): Path<String>,
    Query(query): Query<OutlookQuery>,
) -> Result<Json<OutlookReport>, AppError> {
    let noc = validate_noc(&noc)?;
    let region = resolve_region(query.region.as_deref(), &state.config.default_region)?;

    let unit_group = state
        .unit_groups
        .find(noc)
        .ok_or_else(|| AppError::NotFound(format!("No unit group found for NOC: {noc}")))?;

    let key = OutlookKey {
        noc: noc.to_string(),
        region_id: region.id.to_string(),
    };
    let outlook = state
        .outlook_cache
        .get_or_fetch(key, || async {
            let raw = state.outlook.provincial_outlook(noc, region.id).await?;
            Ok::<_, OutlookError>(Outlook::from_raw(raw))
        })
        .await?;

    Ok(Json(OutlookReport {
        noc: noc.to_string(),
        title: unit_group.title.clone(),
        jobs: unit_group.jobs.clone(),
        requirements: unit_group.requirements.clone(),
        duties: unit_group.duties.clone(),
        outlook: outlook.potential,
        outlook_verbose: outlook.outlook_verbose,
        trends: outlook.trends,
        region: region.name.to_string(),
    }))
}

/// The occupation code must be present and numeric. Violations map to 404,
/// not 400: a malformed code and an unknown one read the same to the caller.
fn validate_noc(noc: &str) -> Result<&str, AppError> {
    if noc.is_empty() {
        return Err(AppError::Validation(
            "NOC parameter was not provided".to_string(),
        ));
    }
    if !noc.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(format!(
            "Received bad NOC parameter: {noc}"
        )));
    }
    Ok(noc)
}

fn resolve_region(requested: Option<&str>, default_id: &str) -> Result<&'static Region, AppError> {
    let id = requested.unwrap_or(default_id);
    region_by_id(id).ok_or_else(|| AppError::Validation(format!("Unknown region id: {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;
    use crate::config::Config;
    use crate::outlook::client::{
        OutlookError, OutlookSource, RawOutlook, LMI_API_BASE_URL,
    };
    use crate::outlook::OUTLOOK_CACHE_TTL;
    use crate::programs::client::{ProgramsClient, PROGRAMS_API_BASE_URL};
    use crate::regions::DEFAULT_REGION_ID;
    use crate::unit_groups::UnitGroupDirectory;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StubOutlook {
        calls: AtomicUsize,
        potential: u8,
    }

    impl StubOutlook {
        fn new(potential: u8) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                potential,
            })
        }
    }

    #[async_trait]
    impl OutlookSource for StubOutlook {
        async fn provincial_outlook(
            &self,
            _noc: &str,
            _region_id: &str,
        ) -> Result<RawOutlook, OutlookError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RawOutlook {
                potential: self.potential,
                trends: serde_json::json!(2),
            })
        }
    }

    fn test_state(source: Arc<StubOutlook>) -> AppState {
        AppState {
            outlook: source,
            programs: ProgramsClient::new(PROGRAMS_API_BASE_URL.to_string()),
            unit_groups: Arc::new(UnitGroupDirectory::bundled().unwrap()),
            outlook_cache: Arc::new(TtlCache::new(OUTLOOK_CACHE_TTL)),
            config: Config {
                gc_api_user_key: "test-key".to_string(),
                lmi_api_base_url: LMI_API_BASE_URL.to_string(),
                programs_api_base_url: PROGRAMS_API_BASE_URL.to_string(),
                default_region: DEFAULT_REGION_ID.to_string(),
                port: 8080,
                rust_log: "info".to_string(),
            },
        }
    }

    async fn request(
        state: &AppState,
        noc: &str,
        region: Option<&str>,
    ) -> Result<Json<OutlookReport>, AppError> {
        handle_outlook(
            State(state.clone()),
            Path(noc.to_string()),
            Query(OutlookQuery {
                region: region.map(str::to_string),
            }),
        )
        .await
    }

    #[tokio::test]
    async fn test_composes_report_for_known_noc() {
        let state = test_state(StubOutlook::new(1));
        let Json(report) = request(&state, "2174", None).await.unwrap();

        assert_eq!(report.noc, "2174");
        assert_eq!(
            report.title,
            "Computer programmers and interactive media developers"
        );
        assert!(!report.jobs.is_empty());
        assert!(!report.requirements.is_empty());
        assert!(!report.duties.is_empty());
        assert_eq!(report.outlook, OutlookPotential::Good);
        assert_eq!(report.outlook_verbose, "Good");
        assert_eq!(report.trends, serde_json::json!(2));
        assert_eq!(report.region, "British Columbia");
    }

    #[tokio::test]
    async fn test_explicit_region_is_resolved() {
        let state = test_state(StubOutlook::new(3));
        let Json(report) = request(&state, "2174", Some("48")).await.unwrap();

        assert_eq!(report.region, "Alberta");
        assert_eq!(report.outlook, OutlookPotential::Fair);
        assert_eq!(report.outlook_verbose, "Fair");
    }

    #[tokio::test]
    async fn test_unknown_noc_is_not_found() {
        let stub = StubOutlook::new(1);
        let state = test_state(stub.clone());
        let err = request(&state, "9999", None).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_numeric_noc_is_rejected() {
        let state = test_state(StubOutlook::new(1));
        let err = request(&state, "21a4", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_region_is_rejected() {
        let state = test_state(StubOutlook::new(1));
        let err = request(&state, "2174", Some("99")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_second_request_is_served_from_cache() {
        let stub = StubOutlook::new(1);
        let state = test_state(stub.clone());
        request(&state, "2174", None).await.unwrap();
        request(&state, "2174", None).await.unwrap();

        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_regions_are_cached_independently() {
        let stub = StubOutlook::new(1);
        let state = test_state(stub.clone());
        request(&state, "2174", Some("59")).await.unwrap();
        request(&state, "2174", Some("35")).await.unwrap();

        assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_validate_noc_rejects_empty() {
        assert!(matches!(
            validate_noc("").unwrap_err(),
            AppError::Validation(_)
        ));
    }
}
