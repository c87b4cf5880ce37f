use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Labeled count breakdown (age/gender/emotion). Bucket labels are
/// backend-defined and not validated here.
pub type Distribution = BTreeMap<String, u64>;

/// Complete set of dashboard metrics returned by one backend call.
///
/// The whole value deserializes or the whole call fails; there is no
/// partially constructed snapshot. Field names mirror the backend's
/// camelCase wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    #[serde(flatten)]
    pub kpis: Kpis,
    pub age_distribution: Distribution,
    pub gender_distribution: Distribution,
    pub emotion_distribution: Distribution,
    pub ads_performance: Vec<AdPerformance>,
    pub ads_attention: Vec<AdAttention>,
}

/// Top-level aggregate counters, flat on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_audience: u64,
    pub total_views: u64,
    pub total_ads: u64,
    pub avg_view_seconds: f64,
}

/// Per-advertisement viewer count; list order is the backend's display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdPerformance {
    pub ad_name: String,
    pub total_viewers: u64,
}

/// Per-advertisement attention split, correlated with [`AdPerformance`] by
/// `ad_name` on the backend side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdAttention {
    pub ad_name: String,
    pub look_yes: u64,
    pub look_no: u64,
}

impl AdAttention {
    /// Fraction of viewers that looked at the ad, 0.0 when nothing was
    /// recorded.
    pub fn attention_rate(&self) -> f64 {
        let total = self.look_yes + self.look_no;
        if total == 0 {
            return 0.0;
        }
        self.look_yes as f64 / total as f64
    }
}
