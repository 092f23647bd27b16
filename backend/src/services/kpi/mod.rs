//! KPI batch upload, preview and confirmation.
//!
//! This module owns the whole lifecycle of a KPI batch: the multipart upload
//! that turns up to seven spreadsheets into unified per-executive records,
//! the preview a supervisor reviews, and the confirmation that forwards the
//! batch to the n8n workflow for persistence.
//!
//! The provided routes are:
//! - `POST /api/kpi/upload`: Receives the registration date, one spreadsheet
//!   per KPI and the per-KPI omit flags. Extracts and unifies the data, parks
//!   the result in the preview store and returns a `preview_url` the browser
//!   navigates to.
//!
//! - `GET /api/kpi/preview/{session_id}`: Returns the stored batch (records,
//!   registration date, omitted KPIs) as JSON for the preview page, or a
//!   not-found error once the session has been confirmed or lost.
//!
//! - `POST /api/kpi/confirm/{session_id}`: Sends the batch to the n8n
//!   webhook. The session entry is removed only when the webhook accepts the
//!   batch, so a failed delivery can be retried from the same preview.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod confirm;
pub mod extract;
mod forward;
mod preview;
pub mod unify;
mod upload;

const API_PATH: &str = "/api/kpi";

/// Configures and returns the Actix scope for the KPI batch routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        // Route to process a new batch of KPI spreadsheets.
        .route("/upload", post().to(upload::process))
        // Route to read a pending batch back for review.
        .route("/preview/{session_id}", get().to(preview::process))
        // Route to forward a reviewed batch to n8n.
        .route("/confirm/{session_id}", post().to(confirm::process))
}
