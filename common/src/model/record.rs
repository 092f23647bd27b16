use crate::model::kpi::KpiKind;
use serde::{Deserialize, Serialize};

/// One unified row per executive, carrying every KPI as a nullable
/// percentage. Field names (and their order) are the wire format expected by
/// the n8n workflow: the executive's name followed by the seven KPI kinds in
/// canonical order, lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiRecord {
    pub ejecutivo: String,
    pub tmo: Option<f64>,
    pub transfepa: Option<f64>,
    pub tipificaciones: Option<f64>,
    pub satep: Option<f64>,
    pub resep: Option<f64>,
    pub satsnl: Option<f64>,
    pub ressnl: Option<f64>,
}

impl KpiRecord {
    /// A record for `ejecutivo` with every KPI value null.
    pub fn new(ejecutivo: String) -> Self {
        KpiRecord {
            ejecutivo,
            tmo: None,
            transfepa: None,
            tipificaciones: None,
            satep: None,
            resep: None,
            satsnl: None,
            ressnl: None,
        }
    }

    pub fn value(&self, kind: KpiKind) -> Option<f64> {
        match kind {
            KpiKind::TMO => self.tmo,
            KpiKind::TransfEPA => self.transfepa,
            KpiKind::Tipificaciones => self.tipificaciones,
            KpiKind::SatEP => self.satep,
            KpiKind::ResEP => self.resep,
            KpiKind::SatSNL => self.satsnl,
            KpiKind::ResSNL => self.ressnl,
        }
    }

    pub fn set_value(&mut self, kind: KpiKind, value: Option<f64>) {
        match kind {
            KpiKind::TMO => self.tmo = value,
            KpiKind::TransfEPA => self.transfepa = value,
            KpiKind::Tipificaciones => self.tipificaciones = value,
            KpiKind::SatEP => self.satep = value,
            KpiKind::ResEP => self.resep = value,
            KpiKind::SatSNL => self.satsnl = value,
            KpiKind::ResSNL => self.ressnl = value,
        }
    }
}
