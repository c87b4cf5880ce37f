use std::collections::BTreeMap;

use signage_core::{AdAttention, AdPerformance, DashboardSnapshot, Kpis};

use crate::format::render_human;

fn sample_snapshot() -> DashboardSnapshot {
    DashboardSnapshot {
        kpis: Kpis {
            total_audience: 1247,
            total_views: 3856,
            total_ads: 12,
            avg_view_seconds: 24.5,
        },
        age_distribution: BTreeMap::from([
            ("children".to_string(), 150),
            ("youngAdults".to_string(), 437),
        ]),
        gender_distribution: BTreeMap::from([
            ("female".to_string(), 599),
            ("male".to_string(), 648),
        ]),
        emotion_distribution: BTreeMap::new(),
        ads_performance: vec![AdPerformance {
            ad_name: "Summer Sale 2026".to_string(),
            total_viewers: 485,
        }],
        ads_attention: vec![AdAttention {
            ad_name: "Summer Sale 2026".to_string(),
            look_yes: 388,
            look_no: 97,
        }],
    }
}

#[test]
fn human_output_lists_kpis_and_distributions() {
    let out = render_human(&sample_snapshot());

    assert!(out.starts_with("=== Dashboard Overview ==="));
    assert!(out.contains("Audience:   1247"));
    assert!(out.contains("Views:      3856"));
    assert!(out.contains("Avg View:   24.50 s"));
    assert!(out.contains("Age:        children=150, youngAdults=437"));
    assert!(out.contains("Gender:     female=599, male=648"));
    assert!(out.contains("Emotions:   n/a"));
}

#[test]
fn human_output_lists_ads_with_attention_rate() {
    let out = render_human(&sample_snapshot());

    assert!(out.contains("485 viewers"));
    assert!(out.contains("looked=388 ignored=97 (80%)"));
}
