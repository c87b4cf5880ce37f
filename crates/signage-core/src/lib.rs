pub mod client;
pub mod config;
pub mod snapshot;

pub use client::{HttpOverviewClient, OverviewApi, OverviewError, FALLBACK_MESSAGE};
pub use config::{ClientConfig, RefreshConfig};
pub use snapshot::{AdAttention, AdPerformance, DashboardSnapshot, Distribution, Kpis};
