//! Typed model of the Vega v5 document this crate emits.
//!
//! Only the slice of the grammar the XY plot needs is modelled. Serialising a
//! [`VisualizationSpec`] with `serde_json` yields the exact JSON the runtime expects.

use crate::expr::{field_accessor, parse_field_accessor};
use crate::models::Row;
use crate::tooltip::TooltipDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Complete, self-contained plot description handed to the rendering runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSpec {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub description: String,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub autosize: Autosize,
    pub title: Title,
    pub signals: Vec<Signal>,
    pub data: Vec<DataSource>,
    pub scales: Vec<Scale>,
    pub legends: Vec<Legend>,
    pub axes: Vec<Axis>,
    pub marks: Vec<Mark>,
}

impl VisualizationSpec {
    pub fn data_source(&self, name: &str) -> Option<&DataSource> {
        self.data.iter().find(|d| d.name == name)
    }

    pub fn scale(&self, name: &str) -> Option<&Scale> {
        self.scales.iter().find(|s| s.name == name)
    }

    pub fn mark(&self, name: &str) -> Option<&Mark> {
        self.marks.iter().find(|m| m.name == name)
    }

    pub fn signal(&self, name: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.name == name)
    }

    pub fn to_json(&self) -> Value {
        // Every field is plain data with string keys, so conversion cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutosizeType {
    Fit,
}

/// How the runtime fits the plot into its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Autosize {
    #[serde(rename = "type")]
    pub kind: AutosizeType,
    /// Re-run layout whenever the container resizes.
    pub resize: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

/// A reactive value updated by interaction events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    /// Initial value; serialised as `null` when absent.
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub on: Vec<EventHandler>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventHandler {
    pub events: String,
    pub update: String,
}

/// A named data set, either inline rows or an empty sink filled by the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Row>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

impl DataSource {
    /// The rows as the runtime sees them once the inline transforms have run.
    pub fn materialize(&self) -> Vec<Row> {
        let mut rows = self.values.clone().unwrap_or_default();
        for t in &self.transform {
            for row in rows.iter_mut() {
                t.apply(row);
            }
        }
        rows
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transform {
    /// Derive `as` per row from `expr`.
    Formula {
        expr: String,
        #[serde(rename = "as")]
        as_field: String,
    },
}

impl Transform {
    /// Formula that copies `field` into `as_field`.
    pub fn copy_field(field: &str, as_field: &str) -> Self {
        Transform::Formula {
            expr: field_accessor(field),
            as_field: as_field.to_string(),
        }
    }

    /// Apply to one row. Only plain field-copy formulas are understood; any other
    /// expression, or a missing source field, leaves `null` in the output field.
    pub fn apply(&self, row: &mut Row) {
        match self {
            Transform::Formula { expr, as_field } => {
                let v = parse_field_accessor(expr)
                    .and_then(|f| row.get(&f).cloned())
                    .unwrap_or(Value::Null);
                row.insert(as_field.clone(), v);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Linear,
    Ordinal,
}

/// Mapping from a data domain to a visual range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ScaleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nice: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero: Option<bool>,
    pub domain: ScaleDomain,
    pub range: ScaleRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleDomain {
    /// Extent of `field` over data set `data`, computed by the runtime.
    Data { data: String, field: String },
    /// Fixed category list.
    Values(Vec<i64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleRange {
    /// Built-in range such as `"width"` or `"height"`.
    Named(String),
    Values(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub fill: String,
    pub title: String,
    pub symbol_stroke_color: String,
    pub symbol_stroke_width: f64,
    pub symbol_opacity: f64,
    pub symbol_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub scale: String,
    pub grid: bool,
    /// Whether the axis domain line is drawn.
    pub domain: bool,
    pub orient: Orient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_padding: Option<f64>,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkFrom {
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encode {
    pub update: SymbolEncoding,
}

/// A layer of glyphs, one per datum of `from.data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MarkType,
    pub from: MarkFrom,
    pub encode: Encode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolEncoding {
    pub x: Channel,
    pub y: Channel,
    pub shape: Channel,
    pub size: Channel,
    pub opacity: Channel,
    pub fill: Channel,
    pub stroke_width: Channel,
    pub stroke: Channel,
    pub tooltip: TooltipDescriptor,
}

/// Value reference for one visual channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Channel {
    /// `field` of the datum passed through `scale`.
    Scaled { scale: String, field: String },
    /// First rule whose `test` holds wins; a rule without `test` is the fallback.
    Rules(Vec<Rule>),
    /// Constant.
    Value { value: Value },
}

impl Channel {
    pub fn scaled(scale: &str, field: &str) -> Self {
        Channel::Scaled {
            scale: scale.to_string(),
            field: field.to_string(),
        }
    }

    pub fn value(v: impl Into<Value>) -> Self {
        Channel::Value { value: v.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    pub value: Value,
}
