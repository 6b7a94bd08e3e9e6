//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults.
//! The `load` module converts them into the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape — serde target before resolution.
#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub service: RawService,
    #[serde(default)]
    pub http: RawHttp,
    #[serde(default)]
    pub vendor: RawVendor,
    #[serde(default)]
    pub report: RawReport,
}

#[derive(Deserialize)]
pub(super) struct RawService {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for RawService {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawHttp {
    #[serde(default = "default_http_bind")]
    pub bind: String,
}

impl Default for RawHttp {
    fn default() -> Self {
        Self { bind: default_http_bind() }
    }
}

#[derive(Deserialize, Default)]
pub(super) struct RawVendor {
    #[serde(default)]
    pub manifest: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct RawReport {
    #[serde(default = "default_escalate")]
    pub escalate: Vec<String>,
}

impl Default for RawReport {
    fn default() -> Self {
        Self { escalate: default_escalate() }
    }
}

// ── Defaults ─────────────────────────────────────────────────────────────────

pub(super) fn default_service_name() -> String {
    "diagd".to_string()
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_http_bind() -> String {
    "127.0.0.1:8080".to_string()
}

pub(super) fn default_escalate() -> Vec<String> {
    vec!["warning".to_string(), "error".to_string()]
}
