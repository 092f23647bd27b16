use serde::{Deserialize, Serialize};

/// The seven KPI categories tracked per executive.
///
/// The order of `ALL` is fixed: it determines the field order of a
/// [`KpiRecord`](crate::model::record::KpiRecord) and the set of recognized
/// omit flags on the upload form. Serialized form equals the variant name
/// (e.g. `"TransfEPA"`), which is the canonical name used in the source
/// spreadsheets' file slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KpiKind {
    TMO,
    TransfEPA,
    Tipificaciones,
    SatEP,
    ResEP,
    SatSNL,
    ResSNL,
}

impl KpiKind {
    /// Every kind, in canonical order.
    pub const ALL: [KpiKind; 7] = [
        KpiKind::TMO,
        KpiKind::TransfEPA,
        KpiKind::Tipificaciones,
        KpiKind::SatEP,
        KpiKind::ResEP,
        KpiKind::SatSNL,
        KpiKind::ResSNL,
    ];

    /// Canonical display name, identical to the variant name.
    pub fn name(&self) -> &'static str {
        match self {
            KpiKind::TMO => "TMO",
            KpiKind::TransfEPA => "TransfEPA",
            KpiKind::Tipificaciones => "Tipificaciones",
            KpiKind::SatEP => "SatEP",
            KpiKind::ResEP => "ResEP",
            KpiKind::SatSNL => "SatSNL",
            KpiKind::ResSNL => "ResSNL",
        }
    }

    /// Name of the multipart form field carrying this KPI's file.
    /// The matching omit checkbox is `omitir_<form_field>`.
    pub fn form_field(&self) -> &'static str {
        match self {
            KpiKind::TMO => "tmo",
            KpiKind::TransfEPA => "transf_epa",
            KpiKind::Tipificaciones => "tipificaciones",
            KpiKind::SatEP => "sat_ep",
            KpiKind::ResEP => "res_ep",
            KpiKind::SatSNL => "sat_snl",
            KpiKind::ResSNL => "res_snl",
        }
    }

    /// Resolves a multipart form field name back to its kind.
    pub fn from_form_field(field: &str) -> Option<KpiKind> {
        KpiKind::ALL.into_iter().find(|k| k.form_field() == field)
    }
}
