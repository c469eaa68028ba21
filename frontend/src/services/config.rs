//! Runtime settings of the web client.
//!
//! Defaults suit a local `campus-portal-server`; the API address can be
//! overridden per deployment with `<meta name="campus-portal-api" content="...">`
//! in the host page.

pub const API_META_NAME: &str = "campus-portal-api";

#[derive(Debug, Clone, PartialEq)]
pub struct FrontendConfig {
    pub api_base_url: String,
    /// How long a toast stays on screen
    pub toast_ttl_ms: u32,
    /// Delay of the offline sender used when nobody is signed in
    pub simulated_send_delay_ms: u32,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5001".to_string(),
            toast_ttl_ms: 3000,
            simulated_send_delay_ms: 1500,
        }
    }
}

impl FrontendConfig {
    /// Defaults, with the API address taken from the page when it declares one
    pub fn from_document() -> Self {
        let config = Self::default();
        let declared = gloo::utils::document()
            .query_selector(&format!("meta[name=\"{}\"]", API_META_NAME))
            .ok()
            .flatten()
            .and_then(|meta| meta.get_attribute("content"));
        match declared {
            Some(url) => config.with_api_base_url(&url),
            None => config,
        }
    }

    pub fn with_api_base_url(mut self, url: &str) -> Self {
        let trimmed = url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.api_base_url = trimmed.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FrontendConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5001");
        assert_eq!(config.toast_ttl_ms, 3000);
        assert_eq!(config.simulated_send_delay_ms, 1500);
    }

    #[test]
    fn test_api_base_url_override() {
        let config = FrontendConfig::default().with_api_base_url(" https://portal.example.edu/ ");
        assert_eq!(config.api_base_url, "https://portal.example.edu");

        let blank = FrontendConfig::default().with_api_base_url("  ");
        assert_eq!(blank.api_base_url, "http://localhost:5001");
    }
}
