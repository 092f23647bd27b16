//! Multipart upload of a KPI batch.
//!
//! The form sends one text field (`fecha_registro`), up to seven file parts
//! named after [`KpiKind::form_field`] and up to seven `omitir_<field>`
//! checkboxes (browsers only submit them when checked, with value `on`).
//! Field order is not relied upon: everything is collected first and
//! processed once the stream ends.

use crate::services::kpi::unify;
use crate::session_store::state::PreviewStore;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::model::kpi::KpiKind;
use common::model::session::PreviewEntry;
use futures_util::StreamExt;
use log::info;
use serde_json::json;
use std::collections::HashMap;

/// HTTP handler for `POST /api/kpi/upload`.
///
/// - On success: `200 OK` with the preview URL for the stored batch.
/// - On failure: `400 Bad Request` with a structured error body.
pub async fn process(store: web::Data<PreviewStore>, payload: Multipart) -> impl Responder {
    match handle_upload(store, payload).await {
        Ok(session_id) => HttpResponse::Ok().json(json!({
            "status": "success",
            "preview_url": format!("/preview.html?session={}", session_id),
        })),
        Err(e) => HttpResponse::BadRequest().json(json!({
            "status": "error",
            "detail": e,
        })),
    }
}

async fn handle_upload(
    store: web::Data<PreviewStore>,
    mut payload: Multipart,
) -> Result<String, String> {
    let mut fecha_registro: Option<String> = None;
    let mut files: HashMap<KpiKind, Vec<u8>> = HashMap::new();
    let mut omitidos: Vec<KpiKind> = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| e.to_string())?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        let Some(name) = name else { continue };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk.map_err(|e| e.to_string())?);
        }

        if name == "fecha_registro" {
            let fecha = String::from_utf8(bytes)
                .map_err(|_| "fecha_registro no es UTF-8 válido".to_string())?;
            fecha_registro = Some(fecha);
        } else if let Some(flag) = name.strip_prefix("omitir_") {
            if let Some(kind) = KpiKind::from_form_field(flag) {
                if bytes == b"on" && !omitidos.contains(&kind) {
                    omitidos.push(kind);
                }
            }
        } else if let Some(kind) = KpiKind::from_form_field(&name) {
            // Unselected file inputs still arrive as empty parts; ignore them.
            if !bytes.is_empty() {
                files.insert(kind, bytes);
            }
        }
    }

    let fecha_registro = fecha_registro.ok_or("Falta el campo fecha_registro".to_string())?;

    let registros = unify::unify_files(&files, &omitidos);
    info!(
        "Batch procesado: {} ejecutivos, {} archivos, {} KPIs omitidos",
        registros.len(),
        files.len(),
        omitidos.len()
    );

    let session_id = store
        .insert(PreviewEntry {
            registros,
            fecha_registro,
            kpis_omitidos: omitidos,
        })
        .await;

    Ok(session_id)
}
