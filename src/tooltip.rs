//! Hover tooltip descriptor shared by both symbol layers.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::expr::{quote, read_quoted};

/// Maps every tooltip column to the hovered datum's value for that column.
///
/// Serialises to the grammar's signal form:
/// `{"signal": "{'dim1': datum['dim1'], 'status': datum['status']}"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TooltipDescriptor {
    fields: Vec<String>,
}

impl TooltipDescriptor {
    /// Unique column identifiers, first-seen order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The signal expression evaluated by the runtime on hover.
    pub fn signal_expr(&self) -> String {
        let entries: Vec<String> = self
            .fields
            .iter()
            .map(|f| {
                let q = quote(f);
                format!("'{q}': datum['{q}']")
            })
            .collect();
        format!("{{{}}}", entries.join(", "))
    }
}

/// Build the tooltip descriptor from the dataset's column list.
///
/// An empty list gives an empty descriptor; tooltips are cosmetic so there is no error path.
pub fn build_tooltip_fields<S: AsRef<str>>(columns: &[S]) -> TooltipDescriptor {
    let mut fields: Vec<String> = Vec::with_capacity(columns.len());
    for c in columns {
        let c = c.as_ref();
        if !fields.iter().any(|f| f == c) {
            fields.push(c.to_string());
        }
    }
    TooltipDescriptor { fields }
}

impl Serialize for TooltipDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("signal", &self.signal_expr())?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for TooltipDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            signal: String,
        }
        let raw = Raw::deserialize(deserializer)?;
        parse_signal(&raw.signal).ok_or_else(|| de::Error::custom("unrecognised tooltip signal"))
    }
}

// Inverse of `signal_expr`: recover the keys of `{'a': datum['a'], ...}`.
fn parse_signal(expr: &str) -> Option<TooltipDescriptor> {
    let mut rest = expr.trim().strip_prefix('{')?.strip_suffix('}')?.trim_start();
    let mut fields = Vec::new();
    while !rest.is_empty() {
        let (key, tail) = read_quoted(rest)?;
        let accessor = format!(": datum['{}']", quote(&key));
        rest = tail.strip_prefix(accessor.as_str())?.trim_start();
        rest = rest.strip_prefix(',').unwrap_or(rest).trim_start();
        fields.push(key);
    }
    Some(TooltipDescriptor { fields })
}
