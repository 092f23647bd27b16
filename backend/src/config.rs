//! Runtime settings, compiled defaults with environment overrides.

use std::env;

/// n8n webhook that persists confirmed KPI batches.
const DEFAULT_WEBHOOK_URL: &str =
    "https://kpi-dashboard-n8n.f7jaui.easypanel.host/webhook/kpi-upload";

/// Upper bound on the outbound forwarding call.
pub const FORWARD_TIMEOUT_SECS: u64 = 60;

pub fn webhook_url() -> String {
    env::var("N8N_WEBHOOK_URL").unwrap_or_else(|_| DEFAULT_WEBHOOK_URL.to_string())
}

pub fn bind_host() -> String {
    env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
}

pub fn bind_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080)
}
