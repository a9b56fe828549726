//! Assemble the Vega v5 specification for an interactive XY (MDS/PCA) scatter plot.
//!
//! - Plot width follows the layout mode (`Single` → 90%, `Paired` → 50% of the container)
//! - Plot height is always 35% of the container
//! - Status colours over the fixed domain `-1, 0, 1`, legend titled "Status"
//! - `click` signal plus an empty `selected_points` data set for the runtime's selection wiring
//! - Two symbol layers: `marks` (all rows) below `selected_marks` (selected rows)

pub mod types;

pub use types::{
    Autosize, AutosizeType, Axis, Channel, DataSource, Encode, EventHandler, Legend, Mark,
    MarkFrom, MarkType, Orient, Rule, Scale, ScaleDomain, ScaleRange, ScaleType, Signal,
    SymbolEncoding, Title, Transform, VisualizationSpec,
};

use crate::error::SpecError;
use crate::models::{
    CanvasDimensions, PlotParameters, Row, STATUS_DOMAIN, STATUS_FIELD, validate_rows,
};
use crate::tooltip::{TooltipDescriptor, build_tooltip_fields};
use log::{debug, warn};
use serde_json::Value;

pub const SCHEMA_URL: &str = "https://vega.github.io/schema/vega/v5.json";
pub const DESCRIPTION: &str = "Interactive XY plot of dimensionality-reduction coordinates";

pub const SOURCE_DATA: &str = "source";
pub const SELECTED_DATA: &str = "selected_points";
pub const CLICK_SIGNAL: &str = "click";
pub const COLOUR_SCALE: &str = "colour_scale";
pub const BASE_MARKS: &str = "marks";
pub const SELECTED_MARKS: &str = "selected_marks";
/// Per-row field derived by the `source` formula.
pub const TOOLTIP_FIELD: &str = "tooltip";

pub const HEIGHT_FRACTION: f64 = 0.35;
/// Symbol area for status 0 rows.
pub const BACKGROUND_SIZE: f64 = 40.0;
/// Symbol area for every other status, and for selected rows.
pub const EMPHASIS_SIZE: f64 = 100.0;
pub const BASE_OPACITY: f64 = 0.65;
pub const HIGHLIGHT_FILL: &str = "darkorange";

/// Build the Vega document. Pure and total: malformed input is passed through
/// to the runtime unchecked. Use [`build_checked`] to fail fast instead.
pub fn build(params: &PlotParameters, rows: &[Row], dims: CanvasDimensions) -> VisualizationSpec {
    let layout = params.layout();
    let width = dims.width * layout.width_fraction();
    let height = dims.height * HEIGHT_FRACTION;
    let tooltip = build_tooltip_fields(&params.columns);

    debug!(
        "building xy spec: layout={:?} rows={} plot={}x{} tooltip_fields={}",
        layout,
        rows.len(),
        width,
        height,
        tooltip.fields().len()
    );

    VisualizationSpec {
        schema: SCHEMA_URL.to_string(),
        description: DESCRIPTION.to_string(),
        width,
        height,
        padding: 0.0,
        autosize: Autosize {
            kind: AutosizeType::Fit,
            resize: true,
        },
        title: Title {
            text: params.title.clone(),
        },
        signals: vec![click_signal()],
        data: data_sources(params, rows),
        scales: scales(params),
        legends: vec![status_legend()],
        axes: axes(params),
        marks: vec![
            base_marks(params, &tooltip),
            selected_marks(params, &tooltip),
        ],
    }
}

/// Same output as [`build`], after checking the canvas, the parameters and every row.
pub fn build_checked(
    params: &PlotParameters,
    rows: &[Row],
    dims: CanvasDimensions,
) -> Result<VisualizationSpec, SpecError> {
    dims.validate()
        .and_then(|_| params.validate())
        .and_then(|_| validate_rows(params, rows))
        .inspect_err(|e| warn!("rejecting xy plot input: {e}"))?;
    Ok(build(params, rows, dims))
}

fn click_signal() -> Signal {
    Signal {
        name: CLICK_SIGNAL.to_string(),
        value: None,
        on: vec![EventHandler {
            events: "mousedown".to_string(),
            update: "[datum, now()]".to_string(),
        }],
    }
}

fn data_sources(params: &PlotParameters, rows: &[Row]) -> Vec<DataSource> {
    vec![
        DataSource {
            name: SOURCE_DATA.to_string(),
            values: Some(rows.to_vec()),
            transform: vec![Transform::copy_field(&params.x_field, TOOLTIP_FIELD)],
        },
        // Filled only by the runtime's selection wiring.
        DataSource {
            name: SELECTED_DATA.to_string(),
            values: None,
            transform: Vec::new(),
        },
    ]
}

fn position_scale(name: &str, field: &str, range: &str) -> Scale {
    Scale {
        name: name.to_string(),
        kind: ScaleType::Linear,
        round: Some(true),
        nice: Some(true),
        zero: Some(true),
        domain: ScaleDomain::Data {
            data: SOURCE_DATA.to_string(),
            field: field.to_string(),
        },
        range: ScaleRange::Named(range.to_string()),
    }
}

fn scales(params: &PlotParameters) -> Vec<Scale> {
    vec![
        position_scale("x", &params.x_field, "width"),
        position_scale("y", &params.y_field, "height"),
        // Fixed domain keeps every status in the legend even when absent from the rows.
        Scale {
            name: COLOUR_SCALE.to_string(),
            kind: ScaleType::Ordinal,
            round: None,
            nice: None,
            zero: None,
            domain: ScaleDomain::Values(STATUS_DOMAIN.to_vec()),
            range: ScaleRange::Values(params.status_colours.clone()),
        },
    ]
}

fn status_legend() -> Legend {
    Legend {
        fill: COLOUR_SCALE.to_string(),
        title: "Status".to_string(),
        symbol_stroke_color: "black".to_string(),
        symbol_stroke_width: 1.0,
        symbol_opacity: 0.7,
        symbol_type: "circle".to_string(),
    }
}

fn axes(params: &PlotParameters) -> Vec<Axis> {
    vec![
        Axis {
            scale: "x".to_string(),
            grid: true,
            domain: false,
            orient: Orient::Bottom,
            tick_count: Some(5),
            title_padding: None,
            title: params.x_field.clone(),
        },
        Axis {
            scale: "y".to_string(),
            grid: true,
            domain: false,
            orient: Orient::Left,
            tick_count: None,
            title_padding: Some(5.0),
            title: params.y_field.clone(),
        },
    ]
}

fn symbol_mark(name: &str, data: &str, update: SymbolEncoding) -> Mark {
    Mark {
        name: name.to_string(),
        kind: MarkType::Symbol,
        from: MarkFrom {
            data: data.to_string(),
        },
        encode: Encode { update },
    }
}

fn base_marks(params: &PlotParameters, tooltip: &TooltipDescriptor) -> Mark {
    let size = Channel::Rules(vec![
        Rule {
            test: Some(format!("datum.{STATUS_FIELD} == 0")),
            value: Value::from(BACKGROUND_SIZE),
        },
        Rule {
            test: None,
            value: Value::from(EMPHASIS_SIZE),
        },
    ]);
    symbol_mark(
        BASE_MARKS,
        SOURCE_DATA,
        SymbolEncoding {
            x: Channel::scaled("x", &params.x_field),
            y: Channel::scaled("y", &params.y_field),
            shape: Channel::value("circle"),
            size,
            opacity: Channel::value(BASE_OPACITY),
            fill: Channel::scaled(COLOUR_SCALE, STATUS_FIELD),
            stroke_width: Channel::value(1.0),
            stroke: Channel::value("transparent"),
            tooltip: tooltip.clone(),
        },
    )
}

fn selected_marks(params: &PlotParameters, tooltip: &TooltipDescriptor) -> Mark {
    symbol_mark(
        SELECTED_MARKS,
        SELECTED_DATA,
        SymbolEncoding {
            x: Channel::scaled("x", &params.x_field),
            y: Channel::scaled("y", &params.y_field),
            shape: Channel::value("circle"),
            size: Channel::value(EMPHASIS_SIZE),
            opacity: Channel::value(1.0),
            fill: Channel::value(HIGHLIGHT_FILL),
            stroke_width: Channel::value(1.0),
            stroke: Channel::value("black"),
            tooltip: tooltip.clone(),
        },
    )
}
