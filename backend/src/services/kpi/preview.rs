//! Read-back of a pending batch for the preview page.

use crate::session_store::state::PreviewStore;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// HTTP handler for `GET /api/kpi/preview/{session_id}`.
///
/// Returns the stored `PreviewEntry` as JSON, or `404 Not Found` once the
/// session has been confirmed or never existed.
pub(crate) async fn process(
    session_id: web::Path<String>,
    store: web::Data<PreviewStore>,
) -> impl Responder {
    match store.get(&session_id).await {
        Some(entry) => HttpResponse::Ok().json(entry),
        None => HttpResponse::NotFound().json(json!({
            "status": "error",
            "detail": "Sesión no encontrada",
        })),
    }
}
