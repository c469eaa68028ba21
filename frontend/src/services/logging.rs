use gloo::net::http::Request;
use shared::LogEntry;
use wasm_bindgen_futures::spawn_local;

use crate::services::config::FrontendConfig;

/// Forwards client-side log lines to the server log
pub struct Logger;

impl Logger {
    pub fn info_with_component(component: &str, message: &str) {
        Self::log("info", message, Some(component.to_string()));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log("warn", message, Some(component.to_string()));
    }

    fn log(level: &str, message: &str, component: Option<String>) {
        let entry = LogEntry {
            level: level.to_string(),
            message: message.to_string(),
            component,
        };
        let url = format!("{}/api/logs", FrontendConfig::from_document().api_base_url);

        // Fire and forget
        spawn_local(async move {
            match Request::post(&url).json(&entry) {
                Ok(request) => {
                    let _ = request.send().await;
                }
                Err(e) => gloo::console::warn!(format!("Could not encode log entry: {}", e)),
            }
        });
    }
}
