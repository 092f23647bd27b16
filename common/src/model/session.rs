use crate::model::kpi::KpiKind;
use crate::model::record::KpiRecord;
use serde::{Deserialize, Serialize};

/// A pending, unconfirmed batch of unified records.
///
/// Created when an upload is processed, read back by the preview page, and
/// removed only after the batch has been forwarded successfully. Entries for
/// abandoned previews stay in the store until the process restarts; there is
/// no expiry policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewEntry {
    /// The unified rows, sorted by executive name.
    pub registros: Vec<KpiRecord>,
    /// The registration date as submitted (`YYYY-MM-DD`).
    pub fecha_registro: String,
    /// KPI kinds the uploader flagged as having no data this period.
    pub kpis_omitidos: Vec<KpiKind>,
}
