use std::{collections::HashMap, fs, path::Path, time::Duration};

pub const SETTINGS_FILE: &str = "time_shift.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub agent_url: String,
    pub request_timeout_ms: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            agent_url: "http://127.0.0.1:4000".into(),
            request_timeout_ms: 10_000,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            if let Some(v) = file_cfg.get("agent_url").and_then(|v| v.as_str()) {
                settings.agent_url = v.to_string();
            }
            if let Some(v) = file_cfg
                .get("request_timeout_ms")
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
            {
                settings.request_timeout_ms = v;
            }
            if let Some(v) = file_cfg.get("log_filter").and_then(|v| v.as_str()) {
                settings.log_filter = v.to_string();
            }
        }
    }

    if let Some(v) = env("TIME_SHIFT_AGENT_URL") {
        settings.agent_url = v;
    }
    if let Some(v) = env("APP__AGENT_URL") {
        settings.agent_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_ms = parsed;
        }
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}
