use crate::models::{PlotParameters, Row, STATUS_FIELD, status_code};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Numeric range of one coordinate column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Extent {
    pub field: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Quick overview of a row table as the plot will see it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub rows: usize,
    /// Row count per status value; rows without a whole-number status are not counted here.
    pub status_counts: BTreeMap<i64, usize>,
    pub missing_status: usize,
    pub x: Extent,
    pub y: Extent,
}

/// Compute per-status counts and the x/y extents (non-numeric cells count as missing).
pub fn summarize(params: &PlotParameters, rows: &[Row]) -> Summary {
    let mut status_counts: BTreeMap<i64, usize> = BTreeMap::new();
    let mut missing_status = 0;
    for r in rows {
        match r.get(STATUS_FIELD).and_then(status_code) {
            Some(s) => *status_counts.entry(s).or_default() += 1,
            None => missing_status += 1,
        }
    }
    Summary {
        rows: rows.len(),
        status_counts,
        missing_status,
        x: extent(&params.x_field, rows),
        y: extent(&params.y_field, rows),
    }
}

fn extent(field: &str, rows: &[Row]) -> Extent {
    let vals: Vec<f64> = rows
        .iter()
        .filter_map(|r| r.get(field).and_then(|v| v.as_f64()))
        .filter(|v| v.is_finite())
        .collect();
    let min = vals.iter().copied().reduce(f64::min);
    let max = vals.iter().copied().reduce(f64::max);
    Extent {
        field: field.to_string(),
        count: vals.len(),
        missing: rows.len() - vals.len(),
        min,
        max,
    }
}
