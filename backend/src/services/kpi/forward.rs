//! Delivery of a confirmed batch to the n8n webhook.

use crate::config;
use chrono::{Datelike, NaiveDate};
use common::model::record::KpiRecord;
use common::model::submission::KpiSubmission;
use log::error;
use std::time::Duration;

/// Month names the downstream workflow uses to label its monthly tables.
const MESES: [&str; 12] = [
    "ENERO",
    "FEBRERO",
    "MARZO",
    "ABRIL",
    "MAYO",
    "JUNIO",
    "JULIO",
    "AGOSTO",
    "SEPTIEMBRE",
    "OCTUBRE",
    "NOVIEMBRE",
    "DICIEMBRE",
];

/// Derives year and Spanish month from the registration date and wraps the
/// records in the webhook payload.
pub fn build_submission(
    registros: &[KpiRecord],
    fecha_registro: &str,
) -> Result<KpiSubmission, String> {
    let fecha = NaiveDate::parse_from_str(fecha_registro, "%Y-%m-%d")
        .map_err(|e| format!("Fecha de registro inválida '{}': {}", fecha_registro, e))?;

    Ok(KpiSubmission {
        registros: registros.to_vec(),
        fecha_registro: fecha_registro.to_string(),
        anio: fecha.year(),
        mes: MESES[fecha.month0() as usize].to_string(),
    })
}

/// Sends the batch to n8n with a single POST bounded by a 60-second timeout.
///
/// Success is exactly an HTTP 200 answer; its parsed JSON body is handed
/// back to the caller. Any other status or a transport error is reported as
/// a failure string, with no retry.
pub async fn send_to_n8n(
    registros: &[KpiRecord],
    fecha_registro: &str,
) -> Result<serde_json::Value, String> {
    let payload = build_submission(registros, fecha_registro)?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config::FORWARD_TIMEOUT_SECS))
        .build()
        .map_err(|e| e.to_string())?;

    let response = client
        .post(config::webhook_url())
        .json(&payload)
        .send()
        .await
        .map_err(|e| {
            error!("Error llamando a n8n: {}", e);
            format!("Error llamando a n8n: {}", e)
        })?;

    let status = response.status();
    if status == reqwest::StatusCode::OK {
        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| format!("Respuesta de n8n inválida: {}", e))
    } else {
        error!("n8n respondió {}", status.as_u16());
        Err(format!("Error en n8n: {}", status.as_u16()))
    }
}
