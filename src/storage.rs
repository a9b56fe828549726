use crate::models::{PlotParameters, Row, RowTable};
use crate::spec::VisualizationSpec;
use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use serde_json::{Number, Value};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Read plot parameters from a JSON file.
pub fn load_params<P: AsRef<Path>>(path: P) -> Result<PlotParameters> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse plot parameters from {}", path.display()))
}

/// Read rows from `.json` (array of objects) or `.csv` (header row), chosen by extension.
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<RowTable> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => load_rows_json(path),
        "csv" => load_rows_csv(path),
        other => bail!("unsupported row file extension: {:?}", other),
    }
}

fn load_rows_json(path: &Path) -> Result<RowTable> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse rows from {} (expected an array of objects)", path.display()))
}

fn load_rows_csv(path: &Path) -> Result<RowTable> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec.with_context(|| format!("read record from {}", path.display()))?;
        let row: Row = headers
            .iter()
            .zip(rec.iter())
            .map(|(h, cell)| (h.to_string(), csv_cell(cell)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Integers stay integers so `status` compares equal to `0`; other numbers become floats.
fn csv_cell(cell: &str) -> Value {
    if cell.is_empty() || cell.eq_ignore_ascii_case("NA") {
        return Value::Null;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::from(i);
    }
    match cell.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(cell.to_string()),
    }
}

/// Save the Vega document as pretty JSON.
pub fn save_spec<P: AsRef<Path>>(spec: &VisualizationSpec, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(spec)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
