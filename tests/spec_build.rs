use serde_json::{Value, json};
use std::collections::BTreeSet;
use xyspec::models::{PlotParameters, Row};
use xyspec::spec::{
    self, BASE_MARKS, COLOUR_SCALE, Channel, SELECTED_DATA, SELECTED_MARKS, SOURCE_DATA,
    ScaleDomain, ScaleRange, VisualizationSpec,
};
use xyspec::{CanvasDimensions, LayoutMode};

fn params(point_count: i64) -> PlotParameters {
    PlotParameters {
        x_field: "x".into(),
        y_field: "y".into(),
        title: "MDS plot".into(),
        columns: vec!["x".into(), "y".into(), "status".into()],
        status_colours: vec!["red".into(), "grey".into(), "blue".into()],
        point_count,
    }
}

fn rows(v: Value) -> Vec<Row> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_object().cloned().unwrap())
        .collect()
}

fn example() -> VisualizationSpec {
    spec::build(
        &params(-1),
        &rows(json!([{"x": 1, "y": 2, "status": 0}])),
        CanvasDimensions::new(1000.0, 800.0),
    )
}

#[test]
fn worked_example_matches_expected_document() {
    let v = example().to_json();

    assert_eq!(v["$schema"], "https://vega.github.io/schema/vega/v5.json");
    assert_eq!(v["width"].as_f64().unwrap().round(), 900.0);
    assert_eq!(v["height"].as_f64().unwrap().round(), 280.0);
    assert_eq!(v["padding"], json!(0.0));
    assert_eq!(v["autosize"], json!({"type": "fit", "resize": true}));
    assert_eq!(v["title"], json!({"text": "MDS plot"}));

    let keys: BTreeSet<&str> = v.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    let expected: BTreeSet<&str> = [
        "$schema",
        "description",
        "width",
        "height",
        "padding",
        "autosize",
        "title",
        "signals",
        "data",
        "scales",
        "legends",
        "axes",
        "marks",
    ]
    .into_iter()
    .collect();
    assert_eq!(keys, expected);

    assert_eq!(
        v["signals"],
        json!([{
            "name": "click",
            "value": null,
            "on": [{"events": "mousedown", "update": "[datum, now()]"}]
        }])
    );

    assert_eq!(
        v["data"],
        json!([
            {
                "name": "source",
                "values": [{"x": 1, "y": 2, "status": 0}],
                "transform": [{"type": "formula", "expr": "datum['x']", "as": "tooltip"}]
            },
            {"name": "selected_points"}
        ])
    );

    assert_eq!(
        v["scales"],
        json!([
            {"name": "x", "type": "linear", "round": true, "nice": true, "zero": true,
             "domain": {"data": "source", "field": "x"}, "range": "width"},
            {"name": "y", "type": "linear", "round": true, "nice": true, "zero": true,
             "domain": {"data": "source", "field": "y"}, "range": "height"},
            {"name": "colour_scale", "type": "ordinal",
             "domain": [-1, 0, 1], "range": ["red", "grey", "blue"]}
        ])
    );

    assert_eq!(
        v["legends"],
        json!([{
            "fill": "colour_scale",
            "title": "Status",
            "symbolStrokeColor": "black",
            "symbolStrokeWidth": 1.0,
            "symbolOpacity": 0.7,
            "symbolType": "circle"
        }])
    );

    assert_eq!(
        v["axes"],
        json!([
            {"scale": "x", "grid": true, "domain": false, "orient": "bottom",
             "tickCount": 5, "title": "x"},
            {"scale": "y", "grid": true, "domain": false, "orient": "left",
             "titlePadding": 5.0, "title": "y"}
        ])
    );
}

#[test]
fn marks_layers_encode_as_expected() {
    let v = example().to_json();
    let marks = v["marks"].as_array().unwrap();
    assert_eq!(marks.len(), 2);
    assert_eq!(marks[0]["name"], "marks");
    assert_eq!(marks[1]["name"], "selected_marks");

    let base = &marks[0];
    assert_eq!(base["type"], "symbol");
    assert_eq!(base["from"], json!({"data": "source"}));
    let u = &base["encode"]["update"];
    assert_eq!(u["x"], json!({"scale": "x", "field": "x"}));
    assert_eq!(u["y"], json!({"scale": "y", "field": "y"}));
    assert_eq!(u["shape"], json!({"value": "circle"}));
    assert_eq!(
        u["size"],
        json!([{"test": "datum.status == 0", "value": 40.0}, {"value": 100.0}])
    );
    assert_eq!(u["fill"], json!({"scale": "colour_scale", "field": "status"}));
    assert_eq!(u["opacity"], json!({"value": 0.65}));
    assert_eq!(u["strokeWidth"], json!({"value": 1.0}));
    assert_eq!(u["stroke"], json!({"value": "transparent"}));
    assert_eq!(
        u["tooltip"],
        json!({"signal": "{'x': datum['x'], 'y': datum['y'], 'status': datum['status']}"})
    );

    let sel = &marks[1];
    assert_eq!(sel["from"], json!({"data": "selected_points"}));
    let u = &sel["encode"]["update"];
    assert_eq!(u["size"], json!({"value": 100.0}));
    assert_eq!(u["fill"], json!({"value": "darkorange"}));
    assert_eq!(u["stroke"], json!({"value": "black"}));
    assert_eq!(u["strokeWidth"], json!({"value": 1.0}));
    assert_eq!(u["opacity"], json!({"value": 1.0}));
}

#[test]
fn width_depends_only_on_layout_mode() {
    let r = rows(json!([{"x": 1, "y": 2, "status": 0}]));
    for (count, fraction) in [(-1, 0.9), (0, 0.5), (1, 0.5), (500, 0.5), (-7, 0.5)] {
        let p = params(count);
        assert_eq!(p.layout().width_fraction(), fraction);
        for (w, h) in [(1000.0, 800.0), (333.0, 121.0), (1.0, 1.0)] {
            let s = spec::build(&p, &r, CanvasDimensions::new(w, h));
            assert!((s.width - w * fraction).abs() < 1e-9, "count={count} w={w}");
            assert!((s.height - h * 0.35).abs() < 1e-9, "h={h}");
        }
    }
    assert_eq!(params(-1).layout(), LayoutMode::Single);
}

#[test]
fn colour_domain_is_fixed_whatever_statuses_appear() {
    let only_ones = rows(json!([
        {"x": 1, "y": 1, "status": 1},
        {"x": 2, "y": 2, "status": 1}
    ]));
    for r in [only_ones, Vec::new()] {
        let s = spec::build(&params(-1), &r, CanvasDimensions::new(100.0, 100.0));
        let colour = s.scale(COLOUR_SCALE).unwrap();
        assert_eq!(colour.domain, ScaleDomain::Values(vec![-1, 0, 1]));
        assert_eq!(
            colour.range,
            ScaleRange::Values(vec!["red".into(), "grey".into(), "blue".into()])
        );
    }
}

#[test]
fn source_rows_gain_tooltip_copy_of_x_field() {
    let mut p = params(-1);
    p.x_field = "dim1".into();
    p.y_field = "dim2".into();
    p.columns = vec!["label".into(), "dim1".into(), "dim2".into(), "status".into()];
    let r = rows(json!([
        {"label": "A", "dim1": -0.4, "dim2": 1.1, "status": -1},
        {"label": "B", "dim1": 2.5, "dim2": 0.0, "status": 0},
        {"label": "C", "dim1": 7, "dim2": -3.2, "status": 1}
    ]));
    let s = spec::build(&p, &r, CanvasDimensions::new(800.0, 600.0));

    let source = s.data_source(SOURCE_DATA).unwrap();
    assert_eq!(source.values.as_ref().unwrap(), &r);
    let seen = source.materialize();
    assert_eq!(seen.len(), r.len());
    for (out, inp) in seen.iter().zip(r.iter()) {
        assert_eq!(out["tooltip"], inp["dim1"]);
        assert_eq!(out["label"], inp["label"]);
    }
}

#[test]
fn selected_points_always_start_empty() {
    let many = rows(json!([
        {"x": 1, "y": 1, "status": 1},
        {"x": 2, "y": 2, "status": 0}
    ]));
    for r in [many, Vec::new()] {
        let s = spec::build(&params(3), &r, CanvasDimensions::new(100.0, 100.0));
        let sel = s.data_source(SELECTED_DATA).unwrap();
        assert!(sel.values.is_none());
        assert!(sel.transform.is_empty());
        assert!(sel.materialize().is_empty());
    }
}

#[test]
fn both_layers_share_the_tooltip_descriptor() {
    let mut p = params(-1);
    p.columns = vec!["status".into(), "x".into(), "sample".into(), "y".into()];
    let s = spec::build(&p, &[], CanvasDimensions::new(100.0, 100.0));
    let base = &s.mark(BASE_MARKS).unwrap().encode.update.tooltip;
    let sel = &s.mark(SELECTED_MARKS).unwrap().encode.update.tooltip;
    assert_eq!(base, sel);
    let got: BTreeSet<&str> = base.fields().iter().map(|f| f.as_str()).collect();
    let want: BTreeSet<&str> = p.columns.iter().map(|f| f.as_str()).collect();
    assert_eq!(got, want);
}

#[test]
fn positions_use_configured_fields() {
    let mut p = params(-1);
    p.x_field = "PC1".into();
    p.y_field = "PC2".into();
    let s = spec::build(&p, &[], CanvasDimensions::new(100.0, 100.0));
    for name in [BASE_MARKS, SELECTED_MARKS] {
        let u = &s.mark(name).unwrap().encode.update;
        assert_eq!(u.x, Channel::scaled("x", "PC1"));
        assert_eq!(u.y, Channel::scaled("y", "PC2"));
    }
    assert_eq!(s.axes[0].title, "PC1");
    assert_eq!(s.axes[1].title, "PC2");
}

#[test]
fn click_signal_starts_unset() {
    let s = example();
    let click = s.signal("click").unwrap();
    assert_eq!(click.value, None);
    assert_eq!(click.on.len(), 1);
    assert_eq!(click.on[0].events, "mousedown");
}

#[test]
fn build_is_idempotent_and_round_trips() {
    let a = example();
    let b = example();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );

    let text = serde_json::to_string_pretty(&a).unwrap();
    let back: VisualizationSpec = serde_json::from_str(&text).unwrap();
    assert_eq!(back, a);
}

#[test]
fn malformed_input_still_builds() {
    let mut p = params(-1);
    p.status_colours = vec!["red".into()];
    p.columns.clear();
    let r = rows(json!([{"status": 9}]));
    let s = spec::build(&p, &r, CanvasDimensions::new(100.0, 100.0));
    assert_eq!(
        s.scale(COLOUR_SCALE).unwrap().range,
        ScaleRange::Values(vec!["red".into()])
    );
    assert!(s.mark(BASE_MARKS).unwrap().encode.update.tooltip.is_empty());
    // Missing x field: the derived tooltip is null.
    let seen = s.data_source(SOURCE_DATA).unwrap().materialize();
    assert_eq!(seen[0]["tooltip"], Value::Null);

    assert!(spec::build_checked(&p, &r, CanvasDimensions::new(100.0, 100.0)).is_err());
}
