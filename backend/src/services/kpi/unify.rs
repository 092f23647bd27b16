//! Merges the per-KPI extracts into one record per executive.

use crate::services::kpi::extract::{extract_kpi, KpiExtract};
use common::model::kpi::KpiKind;
use common::model::record::KpiRecord;
use std::collections::{BTreeSet, HashMap};

/// Extracts every non-omitted file and merges the results.
///
/// Kinds without a file simply contribute no extract; kinds flagged as
/// omitted are never extracted, even if a file was supplied for them.
pub fn unify_files(files: &HashMap<KpiKind, Vec<u8>>, omitted: &[KpiKind]) -> Vec<KpiRecord> {
    let mut extracts: HashMap<KpiKind, KpiExtract> = HashMap::new();
    for (kind, bytes) in files {
        if !omitted.contains(kind) {
            extracts.insert(*kind, extract_kpi(bytes, *kind));
        }
    }
    merge_extracts(&extracts, omitted)
}

/// Builds the unified records: one row per distinct executive across all
/// extracts, sorted by name, with every KPI kind present in canonical order.
/// Omitted kinds are always null; so is any kind without data for that
/// executive.
pub fn merge_extracts(
    extracts: &HashMap<KpiKind, KpiExtract>,
    omitted: &[KpiKind],
) -> Vec<KpiRecord> {
    let mut ejecutivos: BTreeSet<String> = BTreeSet::new();
    for extract in extracts.values() {
        ejecutivos.extend(extract.keys().cloned());
    }

    ejecutivos
        .into_iter()
        .map(|ejecutivo| {
            let mut registro = KpiRecord::new(ejecutivo);
            for kind in KpiKind::ALL {
                let valor = if omitted.contains(&kind) {
                    None
                } else {
                    extracts
                        .get(&kind)
                        .and_then(|e| e.get(&registro.ejecutivo))
                        .copied()
                        .flatten()
                };
                registro.set_value(kind, valor);
            }
            registro
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&str]) -> Vec<u8> {
        rows.join("\n").into_bytes()
    }

    #[test]
    fn unifies_two_kpis_with_all_others_omitted() {
        let mut files = HashMap::new();
        files.insert(
            KpiKind::TMO,
            sheet(&["Ejecutivo,TMO", "Ejecutivo,TMO", "A,0.85", "B,0.90"]),
        );
        files.insert(
            KpiKind::SatEP,
            sheet(&["Ejecutivo,SatEP", "Ejecutivo,SatEP", "A,0.70"]),
        );
        let omitted = vec![
            KpiKind::TransfEPA,
            KpiKind::Tipificaciones,
            KpiKind::ResEP,
            KpiKind::SatSNL,
            KpiKind::ResSNL,
        ];

        let registros = unify_files(&files, &omitted);

        assert_eq!(registros.len(), 2);
        assert_eq!(registros[0].ejecutivo, "A");
        assert_eq!(registros[0].tmo, Some(85.0));
        assert_eq!(registros[0].satep, Some(70.0));
        assert_eq!(registros[1].ejecutivo, "B");
        assert_eq!(registros[1].tmo, Some(90.0));
        assert_eq!(registros[1].satep, None);
        for registro in &registros {
            for kind in omitted.iter() {
                assert_eq!(registro.value(*kind), None);
            }
        }
    }

    #[test]
    fn output_names_are_the_union_of_extracts() {
        let mut extracts = HashMap::new();
        extracts.insert(
            KpiKind::TMO,
            HashMap::from([("B".to_string(), Some(90.0)), ("A".to_string(), Some(85.0))]),
        );
        extracts.insert(
            KpiKind::ResEP,
            HashMap::from([("C".to_string(), None), ("A".to_string(), Some(70.0))]),
        );

        let registros = merge_extracts(&extracts, &[]);

        let names: Vec<&str> = registros.iter().map(|r| r.ejecutivo.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn omitted_kind_is_null_even_when_its_file_was_supplied() {
        let mut files = HashMap::new();
        files.insert(
            KpiKind::TMO,
            sheet(&["Ejecutivo,TMO", "Ejecutivo,TMO", "A,0.85"]),
        );
        files.insert(
            KpiKind::SatEP,
            sheet(&["Ejecutivo,SatEP", "Ejecutivo,SatEP", "A,0.70"]),
        );

        let registros = unify_files(&files, &[KpiKind::SatEP]);

        assert_eq!(registros.len(), 1);
        assert_eq!(registros[0].satep, None);
        assert_eq!(registros[0].tmo, Some(85.0));
    }

    #[test]
    fn executive_only_in_omitted_file_never_appears() {
        let mut files = HashMap::new();
        files.insert(
            KpiKind::TMO,
            sheet(&["Ejecutivo,TMO", "Ejecutivo,TMO", "Solo Omitido,0.5"]),
        );

        let registros = unify_files(&files, &[KpiKind::TMO]);

        assert!(registros.is_empty());
    }

    #[test]
    fn null_extract_value_stays_null_in_the_record() {
        let mut extracts = HashMap::new();
        extracts.insert(KpiKind::TMO, HashMap::from([("A".to_string(), None)]));

        let registros = merge_extracts(&extracts, &[]);

        assert_eq!(registros.len(), 1);
        assert_eq!(registros[0].tmo, None);
    }
}
