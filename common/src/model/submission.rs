use crate::model::record::KpiRecord;
use serde::{Deserialize, Serialize};

/// The JSON body delivered to the n8n webhook on confirmation.
///
/// `anio` and `mes` are derived from `fecha_registro`; `mes` is the Spanish
/// month name in upper case, the way the downstream workflow indexes its
/// monthly tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiSubmission {
    pub registros: Vec<KpiRecord>,
    pub fecha_registro: String,
    pub anio: i32,
    pub mes: String,
}
