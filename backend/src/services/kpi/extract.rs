//! Extraction of per-executive values from one KPI spreadsheet.
//!
//! Every KPI arrives as a sheet exported by the reporting system, with the
//! executive name in the first column and the metric in the second (for
//! `Tipificaciones` the metric lives in the last column instead). The export
//! carries a few known artifacts that are filtered here: the header value is
//! duplicated into the first data row, a `Total` aggregate row and a
//! "Filtros aplicados" footer close the sheet.

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use common::model::kpi::KpiKind;
use log::warn;
use std::collections::HashMap;
use std::error::Error;
use std::io::Cursor;

/// Mapping from executive name to the extracted percentage, or `None` when
/// the source cell was missing or non-numeric.
pub type KpiExtract = HashMap<String, Option<f64>>;

/// Extracts one KPI file, degrading to an empty extract on any parse error.
///
/// A corrupt file must not abort the whole upload: the batch goes through
/// with that KPI reading as "no data for anyone", and the problem is logged.
pub fn extract_kpi(bytes: &[u8], kind: KpiKind) -> KpiExtract {
    match parse_sheet(bytes, kind) {
        Ok(extract) => extract,
        Err(e) => {
            warn!("Error procesando {}: {}", kind.name(), e);
            HashMap::new()
        }
    }
}

fn parse_sheet(bytes: &[u8], kind: KpiKind) -> Result<KpiExtract, Box<dyn Error>> {
    if looks_like_workbook(bytes) {
        parse_workbook(bytes, kind)
    } else {
        parse_delimited(bytes, kind)
    }
}

/// Excel uploads are recognized by their container magic: xlsx is a ZIP
/// archive, legacy xls an OLE2 compound file. Everything else is treated as
/// delimited text.
fn looks_like_workbook(bytes: &[u8]) -> bool {
    bytes.starts_with(b"PK\x03\x04") || bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0])
}

fn parse_workbook(bytes: &[u8], kind: KpiKind) -> Result<KpiExtract, Box<dyn Error>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet_names = workbook.sheet_names().to_owned();
    let first_sheet = sheet_names
        .first()
        .ok_or("El archivo no contiene hojas")?;
    let range = workbook.worksheet_range(first_sheet)?;

    let value_col = value_column(kind, range.width());

    let mut extract = HashMap::new();
    // Index 0 is the header; index 1 repeats the header value and is always
    // discarded. Real data starts at index 2.
    for row in range.rows().skip(2) {
        let ejecutivo = cell_to_string(row.first().unwrap_or(&Data::Empty));
        if skip_row(&ejecutivo) {
            continue;
        }
        let valor = match row.get(value_col) {
            Some(Data::Float(f)) => Some(*f),
            Some(Data::Int(i)) => Some(*i as f64),
            _ => None,
        };
        extract.insert(ejecutivo, valor.map(to_percentage));
    }

    Ok(extract)
}

fn parse_delimited(bytes: &[u8], kind: KpiKind) -> Result<KpiExtract, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
    let value_col = value_column(kind, reader.headers()?.len());

    let mut extract = HashMap::new();
    for record in reader.records().skip(1) {
        let record = record?;
        let ejecutivo = record.get(0).unwrap_or("").to_string();
        if skip_row(&ejecutivo) {
            continue;
        }
        let valor = record
            .get(value_col)
            .and_then(|v| v.trim().parse::<f64>().ok());
        extract.insert(ejecutivo, valor.map(to_percentage));
    }

    Ok(extract)
}

/// The relevant metric sits in the second column, except for
/// `Tipificaciones` where the export appends it as the last column.
fn value_column(kind: KpiKind, width: usize) -> usize {
    match kind {
        KpiKind::Tipificaciones => width.saturating_sub(1),
        _ => 1,
    }
}

/// Sentinel rows that must never reach the extract: blank names, the `Total`
/// aggregate and the "Filtros aplicados" filter-summary footer.
fn skip_row(ejecutivo: &str) -> bool {
    ejecutivo.is_empty() || ejecutivo == "Total" || ejecutivo.contains("Filtros aplicados")
}

/// Normalizes a fractional ratio to a percentage with 2 decimals.
fn to_percentage(valor: f64) -> f64 {
    (valor * 100.0 * 100.0).round() / 100.0
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_bytes(rows: &[&str]) -> Vec<u8> {
        rows.join("\n").into_bytes()
    }

    #[test]
    fn fractions_become_percentages() {
        let data = csv_bytes(&[
            "Ejecutivo,TMO",
            "Ejecutivo,TMO",
            "Ana Rojas,0.8567",
            "Luis Pérez,0.9",
        ]);
        let extract = extract_kpi(&data, KpiKind::TMO);
        assert_eq!(extract.get("Ana Rojas"), Some(&Some(85.67)));
        assert_eq!(extract.get("Luis Pérez"), Some(&Some(90.0)));
    }

    #[test]
    fn first_data_row_is_discarded() {
        // The duplicated-header artifact occupies the first data row; even a
        // plausible-looking executive there must be dropped.
        let data = csv_bytes(&["Ejecutivo,TMO", "Carla Soto,0.5", "Ana Rojas,0.8"]);
        let extract = extract_kpi(&data, KpiKind::TMO);
        assert!(!extract.contains_key("Carla Soto"));
        assert_eq!(extract.len(), 1);
    }

    #[test]
    fn footer_rows_are_skipped() {
        let data = csv_bytes(&[
            "Ejecutivo,TMO",
            "Ejecutivo,TMO",
            "Ana Rojas,0.8",
            "Total,0.85",
            "Filtros aplicados: canal EP,",
            ",0.2",
        ]);
        let extract = extract_kpi(&data, KpiKind::TMO);
        assert_eq!(extract.len(), 1);
        assert!(extract.contains_key("Ana Rojas"));
    }

    #[test]
    fn non_numeric_values_become_null() {
        let data = csv_bytes(&["Ejecutivo,TMO", "Ejecutivo,TMO", "Ana Rojas,s/i", "Luis Pérez,"]);
        let extract = extract_kpi(&data, KpiKind::TMO);
        assert_eq!(extract.get("Ana Rojas"), Some(&None));
        assert_eq!(extract.get("Luis Pérez"), Some(&None));
    }

    #[test]
    fn tipificaciones_reads_the_last_column() {
        let data = csv_bytes(&[
            "Ejecutivo,Ventas,Total,Total.1",
            "Ejecutivo,Ventas,Total,%Tipif",
            "Ana Rojas,0.11,0.22,0.95",
        ]);
        let extract = extract_kpi(&data, KpiKind::Tipificaciones);
        assert_eq!(extract.get("Ana Rojas"), Some(&Some(95.0)));
        // Any other kind keeps reading column 1.
        let extract = extract_kpi(&data, KpiKind::SatEP);
        assert_eq!(extract.get("Ana Rojas"), Some(&Some(11.0)));
    }

    #[test]
    fn corrupt_workbook_degrades_to_empty_extract() {
        // ZIP magic with garbage behind it: calamine fails, the extract is
        // empty instead of the upload erroring out.
        let mut data = b"PK\x03\x04".to_vec();
        data.extend_from_slice(b"not really a workbook");
        assert!(extract_kpi(&data, KpiKind::TMO).is_empty());
    }

    #[test]
    fn workbook_detection_uses_container_magic() {
        assert!(looks_like_workbook(b"PK\x03\x04rest"));
        assert!(looks_like_workbook(&[0xD0, 0xCF, 0x11, 0xE0, 0x00]));
        assert!(!looks_like_workbook(b"Ejecutivo,TMO\n"));
    }

    #[test]
    fn rounding_is_to_two_decimals() {
        assert_eq!(to_percentage(0.856749), 85.67);
        assert_eq!(to_percentage(0.12345), 12.35);
        assert_eq!(to_percentage(1.0), 100.0);
    }
}
