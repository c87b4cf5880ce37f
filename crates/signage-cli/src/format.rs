use anyhow::Result;
use clap::ValueEnum;
use signage_core::{DashboardSnapshot, Distribution};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Ndjson,
}

pub fn print_snapshot(snapshot: &DashboardSnapshot, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(snapshot)?);
        }
        OutputFormat::Ndjson => {
            println!("{}", serde_json::to_string(snapshot)?);
        }
        OutputFormat::Human => {
            print!("{}", render_human(snapshot));
        }
    }

    Ok(())
}

pub fn render_human(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    out.push_str("=== Dashboard Overview ===\n");
    out.push_str(&format!("Audience:   {}\n", snapshot.kpis.total_audience));
    out.push_str(&format!("Views:      {}\n", snapshot.kpis.total_views));
    out.push_str(&format!("Ads:        {}\n", snapshot.kpis.total_ads));
    out.push_str(&format!(
        "Avg View:   {:.2} s\n",
        snapshot.kpis.avg_view_seconds
    ));
    out.push_str(&format!(
        "Age:        {}\n",
        join_distribution(&snapshot.age_distribution)
    ));
    out.push_str(&format!(
        "Gender:     {}\n",
        join_distribution(&snapshot.gender_distribution)
    ));
    out.push_str(&format!(
        "Emotions:   {}\n",
        join_distribution(&snapshot.emotion_distribution)
    ));

    out.push_str("Ad Performance:\n");
    for ad in &snapshot.ads_performance {
        out.push_str(&format!(
            "  {:<28} {:>6} viewers\n",
            ad.ad_name, ad.total_viewers
        ));
    }

    out.push_str("Ad Attention:\n");
    for ad in &snapshot.ads_attention {
        out.push_str(&format!(
            "  {:<28} looked={} ignored={} ({:.0}%)\n",
            ad.ad_name,
            ad.look_yes,
            ad.look_no,
            ad.attention_rate() * 100.0
        ));
    }

    out
}

fn join_distribution(distribution: &Distribution) -> String {
    if distribution.is_empty() {
        return "n/a".to_string();
    }

    distribution
        .iter()
        .map(|(label, count)| format!("{label}={count}"))
        .collect::<Vec<_>>()
        .join(", ")
}
