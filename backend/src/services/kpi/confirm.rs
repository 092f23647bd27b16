//! Confirmation of a reviewed batch.

use crate::services::kpi::forward;
use crate::session_store::state::PreviewStore;
use actix_web::{web, HttpResponse, Responder};
use log::info;
use serde_json::json;

/// HTTP handler for `POST /api/kpi/confirm/{session_id}`.
///
/// Looks the session up first: an unknown id is a not-found failure and the
/// webhook is never contacted. The entry is removed only after n8n accepts
/// the batch, so a failed delivery leaves the preview in place for a retry.
pub(crate) async fn process(
    session_id: web::Path<String>,
    store: web::Data<PreviewStore>,
) -> impl Responder {
    let session_id = session_id.into_inner();

    let Some(entry) = store.get(&session_id).await else {
        return HttpResponse::NotFound().json(json!({
            "status": "error",
            "detail": "Sesión no encontrada",
        }));
    };

    match forward::send_to_n8n(&entry.registros, &entry.fecha_registro).await {
        Ok(n8n_response) => {
            store.remove(&session_id).await;
            info!(
                "Batch {} confirmado: {} registros enviados",
                session_id,
                entry.registros.len()
            );
            HttpResponse::Ok().json(json!({
                "status": "success",
                "message": "Datos procesados correctamente",
                "n8n_response": n8n_response,
            }))
        }
        Err(detail) => HttpResponse::InternalServerError().json(json!({
            "status": "error",
            "detail": detail,
        })),
    }
}
