use std::fs;

use datachart::ir::{kw_f64, kw_str, Axis, DrawCommand};
use datachart::layout::{get_subplot_layout, SubplotLayout};
use datachart::{
    bar_chart, hist_chart, line_chart, ChartAttrs, ChartData, ChartError, ChartSpec, Config, Diagnostic, Drawing,
    Orientation, OutputFormat, RenderOptions,
};
use serde_json::{json, Value};

/// Helper to load a chart attributes fixture
fn load_attrs(path: &str) -> ChartAttrs {
    let text = fs::read_to_string(path).expect("Failed to read fixture");
    let value: Value = serde_json::from_str(&text).expect("Fixture is not valid JSON");
    ChartAttrs::from_json(&value).expect("Fixture is not valid chart attributes")
}

fn attrs(value: Value) -> ChartAttrs {
    ChartAttrs::from_json(&value).unwrap()
}

/// Check if bytes are a valid PNG
fn is_valid_png(bytes: &[u8]) -> bool {
    bytes.len() > 8 && bytes[0..8] == [137, 80, 78, 71, 13, 10, 26, 10]
}

/// Colors given to the series of the first plot area, in drawing order.
fn series_colors(drawing: &Drawing) -> Vec<String> {
    drawing.figure.axes[0]
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Line { style, .. } | DrawCommand::Bar { style, .. } => {
                kw_str(style, "color").map(str::to_string)
            }
            _ => None,
        })
        .collect()
}

#[test]
fn test_end_to_end_line_chart() {
    let attrs = load_attrs("test/temperatures.json");
    let drawing = line_chart(&attrs, &Config::default()).unwrap();

    assert!(drawing.diagnostics.is_empty(), "{:?}", drawing.diagnostics);
    let ax = &drawing.figure.axes[0];
    // two error bands and two lines on the shared plot area
    assert_eq!(ax.commands.len(), 4);
    assert!(ax.legend.is_some());
    assert_eq!(ax.title.as_ref().unwrap().content, "Daily mean");
    assert_eq!(drawing.figure.suptitle.as_ref().unwrap().content, "Temperatures");

    let png_bytes = drawing.render(&RenderOptions::default()).unwrap();
    assert!(is_valid_png(&png_bytes), "Output is not a valid PNG");
}

#[test]
fn test_end_to_end_bar_chart_svg() {
    let attrs = load_attrs("test/sales.json");
    let drawing = bar_chart(&attrs, &Config::default()).unwrap();

    let options = RenderOptions {
        width: 640,
        height: 400,
        format: OutputFormat::Svg,
    };
    let svg = String::from_utf8(drawing.render(&options).unwrap()).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn test_end_to_end_hist_subplots() {
    let attrs = load_attrs("test/measurements.json");
    let drawing = hist_chart(&attrs, &Config::default()).unwrap();

    assert_eq!(drawing.figure.layout, SubplotLayout { rows: 1, columns: 2 });
    let png_bytes = drawing.render(&RenderOptions::default()).unwrap();
    assert!(is_valid_png(&png_bytes));
}

#[test]
fn test_render_options_deserialize() {
    let options: RenderOptions = serde_json::from_value(json!({ "type": "svg", "width": 300 })).unwrap();
    assert_eq!(options.format, OutputFormat::Svg);
    assert_eq!(options.width, 300);
    assert_eq!(options.height, 600);
}

#[test]
fn test_subplot_layout_properties() {
    for n in 1..12 {
        for m in 1..6 {
            assert_eq!(get_subplot_layout(false, n, m).unwrap(), SubplotLayout { rows: 1, columns: 1 });
        }
    }
    assert_eq!(get_subplot_layout(true, 10, 4).unwrap(), SubplotLayout { rows: 3, columns: 4 });
    assert_eq!(get_subplot_layout(true, 4, 4).unwrap(), SubplotLayout { rows: 1, columns: 4 });
    assert_eq!(get_subplot_layout(true, 3, 4).unwrap(), SubplotLayout { rows: 1, columns: 3 });
    assert!(matches!(get_subplot_layout(true, 3, 0), Err(ChartError::InvalidLayout { .. })));
}

#[test]
fn test_invalid_charts_shape() {
    let err = ChartAttrs::from_json(&json!({ "charts": 42 })).unwrap_err();
    assert!(matches!(err, ChartError::InvalidCharts));
    assert!(err.to_string().contains("not correctly structured"));
}

#[test]
fn test_color_assignment_is_deterministic() {
    let value = json!({
        "charts": [
            { "data": { "x": [1, 2, 3], "y": [3, 1, 2] } },
            { "data": { "x": [1, 2, 3], "y": [5, 4, 6] } }
        ]
    });
    let first = line_chart(&attrs(value.clone()), &Config::default()).unwrap();
    let second = line_chart(&attrs(value), &Config::default()).unwrap();

    assert_eq!(series_colors(&first), series_colors(&second));
    assert_eq!(series_colors(&first).len(), 2);
}

#[test]
fn test_color_ignores_key_order() {
    let forward: Value =
        serde_json::from_str(r#"{ "charts": [{ "name": "a", "data": { "y": [1, 2], "x": [0, 1] } }] }"#).unwrap();
    let reordered: Value =
        serde_json::from_str(r#"{ "charts": [{ "data": { "x": [0, 1], "y": [1, 2] }, "name": "a" }] }"#).unwrap();
    let config = Config::default().with("color.general.multiple", "tab10");

    let a = line_chart(&attrs(forward), &config).unwrap();
    let b = line_chart(&attrs(reordered), &config).unwrap();
    assert_eq!(series_colors(&a), series_colors(&b));
}

#[test]
fn test_grouped_bar_offsets() {
    let config = Config::default().with("plot.bar.width", 0.6);
    let drawing = bar_chart(&load_attrs("test/sales.json"), &config).unwrap();

    let bars: Vec<(f64, f64)> = drawing.figure.axes[0]
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Bar { positions, style, .. } => Some((positions[0], kw_f64(style, "width").unwrap())),
            _ => None,
        })
        .collect();

    assert_eq!(bars.len(), 3);
    for (i, (position, width)) in bars.into_iter().enumerate() {
        assert!((width - 0.2).abs() < 1e-9);
        assert!((position - i as f64 * 0.2).abs() < 1e-9);
    }
    assert_eq!(drawing.figure.axes[0].axis(Axis::Y).limits.0, Some(0.0));
}

#[test]
fn test_histogram_bins_shared_across_series() {
    let drawing = hist_chart(&load_attrs("test/measurements.json"), &Config::default()).unwrap();

    let bins: Vec<&Vec<f64>> = drawing
        .figure
        .axes
        .iter()
        .flat_map(|ax| &ax.commands)
        .filter_map(|c| match c {
            DrawCommand::Hist { bins, .. } => Some(bins),
            _ => None,
        })
        .collect();

    assert_eq!(bins.len(), 2);
    assert_eq!(bins[0], bins[1]);
    assert_eq!(bins[0].len(), 9);
    assert_eq!(bins[0][0], 2.0);
    assert_eq!(bins[0][8], 9.0);
}

#[test]
fn test_tick_policies_warn_and_continue() {
    let drawing = line_chart(
        &attrs(json!({
            "charts": [
                {
                    "data": { "y": [1, 2, 3] },
                    "xticks": [0, 1, 2],
                    "xticklabels": ["a", "b"],
                    "yticklabels": ["low"]
                }
            ]
        })),
        &Config::default(),
    )
    .unwrap();

    assert_eq!(
        drawing.diagnostics,
        vec![
            Diagnostic::TickLengthMismatch { axis: Axis::X, ticks: 3, labels: 2 },
            Diagnostic::TickLabelsWithoutTicks { axis: Axis::Y },
        ]
    );
    let ax = &drawing.figure.axes[0];
    assert_eq!(ax.xaxis.ticks, Some(vec![0.0, 1.0, 2.0]));
    assert_eq!(ax.xaxis.ticklabels, None);
    assert_eq!(ax.yaxis.ticks, None);
}

#[test]
fn test_missing_config_key_aborts() {
    let config = Config::empty();
    let result = line_chart(&attrs(json!({ "charts": { "data": { "y": [1] } } })), &config);
    assert!(matches!(result, Err(ChartError::MissingKey(_))));
}

#[test]
fn test_config_from_nested_json() {
    let config = Config::from_json(&json!({
        "plot": { "line": { "width": 3 } },
        "color.general.singular": "#000000"
    }))
    .unwrap();

    let drawing = line_chart(
        &attrs(json!({ "charts": [{ "data": { "y": [1, 2] } }], "as_subplots": true })),
        &config,
    )
    .unwrap();
    match &drawing.figure.axes[0].commands[0] {
        DrawCommand::Line { style, .. } => {
            assert_eq!(kw_f64(style, "linewidth"), Some(3.0));
            assert_eq!(kw_str(style, "color"), Some("#000000"));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_programmatic_horizontal_bars() {
    let mut columns = std::collections::BTreeMap::new();
    columns.insert("label".to_string(), vec![json!("apples"), json!("pears")]);
    columns.insert("y".to_string(), vec![json!(3), json!(5)]);
    let mut chart = ChartSpec::new(ChartData::Columns(columns));
    chart.xlabel = Some("Fruit".to_string());

    let mut attrs = ChartAttrs::new(vec![chart]);
    attrs.orientation = Some(Orientation::Horizontal);
    let drawing = bar_chart(&attrs, &Config::default()).unwrap();

    let ax = &drawing.figure.axes[0];
    assert_eq!(ax.yaxis.ticklabels, Some(vec!["apples".to_string(), "pears".to_string()]));
    assert_eq!(ax.yaxis.label.as_ref().unwrap().content, "Fruit");
    assert_eq!(ax.axis(Axis::X).limits.0, Some(0.0));
}
