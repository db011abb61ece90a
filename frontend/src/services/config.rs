use web_sys::Document;

use crate::services::logging::{LogLevel, Logger};

const COMPONENT: &str = "config";

/// Default lifetime of a notification banner
pub const DEFAULT_ALERT_TIMEOUT_MS: u32 = 5000;

/// What to do with an edit response that arrives after a newer edit was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleResponsePolicy {
    /// Every response is applied, so the last one to arrive wins
    #[default]
    LastArrivalWins,
    /// Only the response to the most recent trigger is applied
    LatestRequestWins,
}

impl StaleResponsePolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "last-arrival" => Some(StaleResponsePolicy::LastArrivalWins),
            "latest-request" => Some(StaleResponsePolicy::LatestRequestWins),
            _ => None,
        }
    }
}

/// Settings for the page controller
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Prefix for API requests; empty means the page's own origin
    pub api_base: String,
    pub alert_timeout_ms: u32,
    pub log_level: LogLevel,
    pub stale_responses: StaleResponsePolicy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            alert_timeout_ms: DEFAULT_ALERT_TIMEOUT_MS,
            log_level: LogLevel::Info,
            stale_responses: StaleResponsePolicy::default(),
        }
    }
}

impl ControllerConfig {
    /// Defaults overridden by `data-*` attributes on `<body>`:
    /// `data-api-base`, `data-alert-timeout-ms`, `data-log-level` and
    /// `data-stale-responses`.
    pub fn from_document(document: &Document) -> Self {
        let mut config = Self::default();
        let Some(body) = document.body() else {
            return config;
        };

        if let Some(base) = body.get_attribute("data-api-base") {
            config.api_base = base.trim().to_string();
        }

        if let Some(raw) = body.get_attribute("data-alert-timeout-ms") {
            match raw.trim().parse::<u32>() {
                Ok(ms) => config.alert_timeout_ms = ms,
                Err(e) => Logger::warn_with_component(
                    COMPONENT,
                    &format!("Ignoring data-alert-timeout-ms='{}': {}", raw, e),
                ),
            }
        }

        if let Some(raw) = body.get_attribute("data-log-level") {
            match raw.parse::<LogLevel>() {
                Ok(level) => config.log_level = level,
                Err(e) => Logger::warn_with_component(
                    COMPONENT,
                    &format!("Ignoring data-log-level: {}", e),
                ),
            }
        }

        if let Some(raw) = body.get_attribute("data-stale-responses") {
            match StaleResponsePolicy::parse(&raw) {
                Some(policy) => config.stale_responses = policy,
                None => Logger::warn_with_component(
                    COMPONENT,
                    &format!("Ignoring data-stale-responses='{}'", raw),
                ),
            }
        }

        config
    }
}
