use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub json_logs: bool,
    pub default_filter: String,
    pub metrics_enabled: bool,
}

impl TelemetryConfig {
    pub fn from_env(default_service_name: &str) -> Self {
        let service_name =
            env::var("SMOOCH_SERVICE_NAME").unwrap_or_else(|_| default_service_name.to_string());
        let json_logs = env::var("LOG_FORMAT")
            .map(|v| matches!(v.to_lowercase().as_str(), "json"))
            .unwrap_or(false);
        let default_filter = env::var("SMOOCH_LOG_LEVEL").unwrap_or_else(|_| "info".into());
        let metrics_enabled = env::var("SMOOCH_METRICS")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(true);

        Self {
            service_name,
            json_logs,
            default_filter,
            metrics_enabled,
        }
    }
}
