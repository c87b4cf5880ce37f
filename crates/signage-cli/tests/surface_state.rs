use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use signage_cli::viewer::DashboardState;
use signage_core::{DashboardSnapshot, OverviewApi, OverviewError, FALLBACK_MESSAGE};

/// Replays a scripted sequence of fetch outcomes, like a backend that
/// flaps between healthy and overloaded.
struct ScriptedClient {
    outcomes: Mutex<Vec<Result<DashboardSnapshot, OverviewError>>>,
}

impl ScriptedClient {
    fn new(outcomes: Vec<Result<DashboardSnapshot, OverviewError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
        }
    }
}

#[async_trait]
impl OverviewApi for ScriptedClient {
    async fn fetch_overview(&self) -> Result<DashboardSnapshot, OverviewError> {
        self.outcomes.lock().expect("outcomes lock").remove(0)
    }
}

fn sample_snapshot() -> DashboardSnapshot {
    serde_json::from_value(json!({
        "totalAudience": 1247,
        "totalViews": 3856,
        "totalAds": 12,
        "avgViewSeconds": 24.5,
        "ageDistribution": {"children": 150},
        "genderDistribution": {"male": 648},
        "emotionDistribution": {"neutral": 561},
        "adsPerformance": [{"adName": "Summer Sale 2026", "totalViewers": 485}],
        "adsAttention": [{"adName": "Summer Sale 2026", "lookYes": 388, "lookNo": 97}]
    }))
    .expect("sample snapshot")
}

#[tokio::test]
async fn surface_degrades_and_recovers_across_refreshes() {
    let client = ScriptedClient::new(vec![
        Ok(sample_snapshot()),
        Err(OverviewError {
            message: FALLBACK_MESSAGE.to_string(),
        }),
        Ok(sample_snapshot()),
    ]);

    let mut state = DashboardState::new();

    state.apply(client.fetch_overview().await);
    assert!(state.latest.is_some());
    assert!(state.last_error.is_none());

    state.apply(client.fetch_overview().await);
    assert_eq!(state.last_error.as_deref(), Some(FALLBACK_MESSAGE));
    assert!(
        state.latest.is_some(),
        "failed refresh keeps showing the previous snapshot"
    );

    state.apply(client.fetch_overview().await);
    assert!(state.last_error.is_none());
    assert_eq!(state.refreshes_ok, 2);
    assert_eq!(state.refreshes_err, 1);
}
