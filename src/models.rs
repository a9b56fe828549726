use crate::error::SpecError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sentinel `point_count` used by the widget shell for a single, full-width plot.
pub const SINGLE_PLOT_COUNT: i64 = -1;

/// Status codes in the order `status_colours` is matched against.
pub const STATUS_DOMAIN: [i64; 3] = [-1, 0, 1];

/// Column every row must carry for colouring and sizing.
pub const STATUS_FIELD: &str = "status";

/// One flat record of the row table.
pub type Row = Map<String, Value>;

/// Ordered rows embedded in the `source` data set.
pub type RowTable = Vec<Row>;

/// How the plot shares horizontal space with its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    /// One plot that fills most of the row.
    Single,
    /// Two plots side by side, each taking half the row.
    Paired,
}

impl LayoutMode {
    /// Derive the layout from the shell's `point_count` field.
    pub fn from_point_count(count: i64) -> Self {
        if count == SINGLE_PLOT_COUNT {
            LayoutMode::Single
        } else {
            LayoutMode::Paired
        }
    }

    /// Fraction of the available width given to the plot area.
    pub fn width_fraction(&self) -> f64 {
        match *self {
            LayoutMode::Single => 0.9,
            LayoutMode::Paired => 0.5,
        }
    }
}

/// Pixel size of the container the plot is hosted in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasDimensions {
    pub width: f64,
    pub height: f64,
}

impl CanvasDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), SpecError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(SpecError::InvalidCanvas {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Per-render plot parameters supplied by the hosting widget.
///
/// Field names follow the shell's JSON (`x`, `y`, `cols`, `status_colours`, `counts`);
/// the camelCase spellings are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotParameters {
    #[serde(rename = "x", alias = "xField")]
    pub x_field: String,
    #[serde(rename = "y", alias = "yField")]
    pub y_field: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "cols", alias = "columns", default)]
    pub columns: Vec<String>,
    #[serde(alias = "statusColours")]
    pub status_colours: Vec<String>,
    /// `-1` selects the single-plot layout, anything else the paired one.
    /// Some shells encode it as a **string**; both forms are accepted.
    #[serde(
        rename = "counts",
        alias = "pointCount",
        deserialize_with = "de_i64_from_string_or_number"
    )]
    pub point_count: i64,
}

impl PlotParameters {
    pub fn layout(&self) -> LayoutMode {
        LayoutMode::from_point_count(self.point_count)
    }

    /// Fail-fast checks on the parameters alone. `spec::build` never calls this.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.status_colours.len() != STATUS_DOMAIN.len() {
            return Err(SpecError::StatusColourCount {
                found: self.status_colours.len(),
            });
        }
        if self.columns.is_empty() {
            return Err(SpecError::EmptyColumns);
        }
        Ok(())
    }
}

/// Check that every row carries the x/y/status fields and all tooltip columns,
/// and that `status` is one of `-1`, `0`, `1`.
pub fn validate_rows(params: &PlotParameters, rows: &[Row]) -> Result<(), SpecError> {
    let required = [
        params.x_field.as_str(),
        params.y_field.as_str(),
        STATUS_FIELD,
    ];
    for (idx, row) in rows.iter().enumerate() {
        let columns = params.columns.iter().map(|c| c.as_str());
        for field in required.into_iter().chain(columns) {
            if !row.contains_key(field) {
                return Err(SpecError::MissingField {
                    row: idx,
                    field: field.to_string(),
                });
            }
        }
        let status = &row[STATUS_FIELD];
        match status_code(status) {
            Some(s) if STATUS_DOMAIN.contains(&s) => {}
            _ => {
                return Err(SpecError::InvalidStatus {
                    row: idx,
                    value: status.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Read a status cell as a whole number; `1` and `1.0` are the same status.
pub fn status_code(v: &Value) -> Option<i64> {
    if let Some(i) = v.as_i64() {
        return Some(i);
    }
    let f = v.as_f64()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() <= i64::MAX as f64).then_some(f as i64)
}

/// Serde helper: parse `i64` from either a JSON number or a string.
fn de_i64_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer representing a point count")
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i64::try_from(v).map_err(E::custom)
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.fract() != 0.0 || !v.is_finite() {
                return Err(E::custom("point count must be a whole number"));
            }
            Ok(v as i64)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<i64>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(I64Visitor)
}
