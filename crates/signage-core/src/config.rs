use std::time::Duration;

/// Where the backend lives. The origin is injected from the outside (CLI
/// flag during development, reverse proxy or same-origin deployment in
/// production); the logical `/api` prefix stays fixed.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub origin: String,
    pub api_prefix: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8080".to_string(),
            api_prefix: "/api".to_string(),
        }
    }
}

impl ClientConfig {
    /// Full URL of the overview endpoint.
    pub fn overview_url(&self) -> String {
        format!(
            "{}{}/dashboard/overview",
            self.origin.trim_end_matches('/'),
            self.api_prefix
        )
    }
}

/// Surface-side cadence. Refreshes are always initiated by the surface,
/// never by the client itself.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub refresh_interval: Duration,
    pub slide_dwell: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(30),
            slide_dwell: Duration::from_secs(8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_url_joins_origin_and_prefix() {
        let config = ClientConfig::default();
        assert_eq!(
            config.overview_url(),
            "http://localhost:8080/api/dashboard/overview"
        );
    }

    #[test]
    fn overview_url_tolerates_trailing_slash() {
        let config = ClientConfig {
            origin: "http://signage.local:9090/".to_string(),
            api_prefix: "/api".to_string(),
        };
        assert_eq!(
            config.overview_url(),
            "http://signage.local:9090/api/dashboard/overview"
        );
    }
}
