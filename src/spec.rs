//! Declarative chart description.
//!
//! The shapes mirror the JSON a caller hands in: a list (or a single object)
//! of chart specifications plus figure-wide attributes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ChartError, Result};
use crate::ir::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Horizontal)
    }

    /// Axis carrying the data values (bar lengths, histogram counts).
    pub fn value_axis(self) -> Axis {
        match self {
            Orientation::Vertical => Axis::Y,
            Orientation::Horizontal => Axis::X,
        }
    }
}

/// Which grid lines to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridAxis {
    X,
    Y,
    Both,
}

impl GridAxis {
    pub fn includes(self, axis: Axis) -> bool {
        match self {
            GridAxis::Both => true,
            GridAxis::X => axis == Axis::X,
            GridAxis::Y => axis == Axis::Y,
        }
    }
}

/// Chart data: named columns, or a list of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartData {
    Columns(BTreeMap<String, Vec<Value>>),
    Records(Vec<Map<String, Value>>),
}

impl Default for ChartData {
    fn default() -> Self {
        ChartData::Columns(BTreeMap::new())
    }
}

/// One series: its data, style overrides and per-plot-area settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSpec {
    pub data: ChartData,
    /// Overrides keyed by configuration path, e.g. `plot.line.color`.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub style: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xlabel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ylabel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xticks: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xticklabels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yticks: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yticklabels: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cumulative: Option<bool>,

    /// Legend entry for this series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    // Column aliases: read `x` from `data[<x>]` instead of `data["x"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yerr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ChartSpec {
    pub fn new(data: ChartData) -> Self {
        ChartSpec {
            data,
            ..Default::default()
        }
    }

    /// Data column holding the series `attr`, honouring aliases.
    pub fn series_key<'a>(&'a self, attr: &'a str) -> &'a str {
        let alias = match attr {
            "x" => self.x.as_deref(),
            "y" => self.y.as_deref(),
            "yerr" => self.yerr.as_deref(),
            "label" => self.label.as_deref(),
            _ => None,
        };
        alias.unwrap_or(attr)
    }

    /// Raw values of a series, or `None` when the data does not provide it.
    pub fn series(&self, attr: &str) -> Option<Vec<&Value>> {
        let key = self.series_key(attr);
        match &self.data {
            ChartData::Columns(columns) => columns.get(key).map(|c| c.iter().collect()),
            ChartData::Records(records) => {
                let values: Vec<&Value> = records.iter().filter_map(|r| r.get(key)).collect();
                if values.is_empty() {
                    None
                } else {
                    Some(values)
                }
            }
        }
    }

    /// Numeric series; `null` entries become NaN.
    pub fn numeric(&self, attr: &str) -> Result<Option<Vec<f64>>> {
        let Some(values) = self.series(attr) else {
            return Ok(None);
        };
        values
            .into_iter()
            .map(|v| match v {
                Value::Null => Ok(f64::NAN),
                other => other.as_f64().ok_or_else(|| ChartError::InvalidValue {
                    key: self.series_key(attr).to_string(),
                    expected: "number",
                }),
            })
            .collect::<Result<Vec<f64>>>()
            .map(Some)
    }

    /// Textual series; numbers and booleans are formatted.
    pub fn text(&self, attr: &str) -> Option<Vec<String>> {
        self.series(attr).map(|values| {
            values
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
    }

    pub fn ticks(&self, axis: Axis) -> (Option<&Vec<f64>>, Option<&Vec<String>>) {
        match axis {
            Axis::X => (self.xticks.as_ref(), self.xticklabels.as_ref()),
            Axis::Y => (self.yticks.as_ref(), self.yticklabels.as_ref()),
        }
    }

    pub fn limits(&self, axis: Axis) -> (Option<f64>, Option<f64>) {
        match axis {
            Axis::X => (self.x_min, self.x_max),
            Axis::Y => (self.y_min, self.y_max),
        }
    }
}

/// The `charts` attribute: a single chart or a list of charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Charts {
    Many(Vec<ChartSpec>),
    One(Box<ChartSpec>),
}

impl Charts {
    pub fn as_slice(&self) -> &[ChartSpec] {
        match self {
            Charts::Many(charts) => charts,
            Charts::One(chart) => std::slice::from_ref(chart.as_ref()),
        }
    }
}

fn default_figsize() -> (f64, f64) {
    (10.0, 6.0)
}

fn default_max_cols() -> usize {
    4
}

fn default_true() -> bool {
    true
}

/// Figure-wide attributes of a draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAttrs {
    pub charts: Charts,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub xlabel: Option<String>,
    #[serde(default)]
    pub ylabel: Option<String>,
    /// Figure size in inches.
    #[serde(default = "default_figsize")]
    pub figsize: (f64, f64),
    #[serde(default)]
    pub sharex: bool,
    #[serde(default)]
    pub sharey: bool,
    #[serde(default = "default_max_cols")]
    pub max_cols: usize,
    #[serde(default)]
    pub show_grid: Option<GridAxis>,
    #[serde(default)]
    pub as_subplots: bool,
    #[serde(default = "default_true")]
    pub show_xaxis_labels: bool,
    #[serde(default = "default_true")]
    pub show_yaxis_labels: bool,
    #[serde(default)]
    pub show_legend: bool,

    // chart-type specific
    #[serde(default)]
    pub show_yerr: Option<bool>,
    #[serde(default)]
    pub show_area: Option<bool>,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub n_bins: Option<usize>,
}

impl ChartAttrs {
    pub fn new(charts: Vec<ChartSpec>) -> Self {
        ChartAttrs {
            charts: Charts::Many(charts),
            title: None,
            xlabel: None,
            ylabel: None,
            figsize: default_figsize(),
            sharex: false,
            sharey: false,
            max_cols: default_max_cols(),
            show_grid: None,
            as_subplots: false,
            show_xaxis_labels: true,
            show_yaxis_labels: true,
            show_legend: false,
            show_yerr: None,
            show_area: None,
            orientation: None,
            n_bins: None,
        }
    }

    /// Parse attributes from JSON, checking the shape of `charts` first.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value.get("charts") {
            Some(Value::Object(_)) | Some(Value::Array(_)) => {}
            _ => return Err(ChartError::InvalidCharts),
        }
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn draw_config(&self) -> DrawConfig {
        DrawConfig {
            as_subplots: self.as_subplots,
            grid: self.show_grid,
            yerr: self.show_yerr,
            area: self.show_area,
            orientation: self.orientation,
            n_bins: self.n_bins,
            legend: self.show_legend,
        }
    }
}

/// Options handed from the orchestrator to a chart drawer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawConfig {
    pub as_subplots: bool,
    pub grid: Option<GridAxis>,
    pub yerr: Option<bool>,
    pub area: Option<bool>,
    pub orientation: Option<Orientation>,
    pub n_bins: Option<usize>,
    pub legend: bool,
}

impl DrawConfig {
    /// Names of the options that are switched on.
    pub fn active_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.as_subplots {
            keys.push("as_subplots");
        }
        if self.grid.is_some() {
            keys.push("grid");
        }
        if self.yerr == Some(true) {
            keys.push("yerr");
        }
        if self.area == Some(true) {
            keys.push("area");
        }
        if self.orientation.is_some() {
            keys.push("orientation");
        }
        if self.n_bins.is_some_and(|n| n > 0) {
            keys.push("n_bins");
        }
        if self.legend {
            keys.push("legend");
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_columns_and_records_data() {
        let columns: ChartSpec = serde_json::from_value(json!({
            "data": { "x": [1, 2, 3], "y": [4, 5, 6] }
        }))
        .unwrap();
        assert_eq!(columns.numeric("y").unwrap(), Some(vec![4.0, 5.0, 6.0]));
        assert_eq!(columns.numeric("yerr").unwrap(), None);

        let records: ChartSpec = serde_json::from_value(json!({
            "data": [{ "x": 1, "y": 4 }, { "x": 2 }, { "x": 3, "y": 6 }]
        }))
        .unwrap();
        assert_eq!(records.numeric("x").unwrap(), Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(records.numeric("y").unwrap(), Some(vec![4.0, 6.0]));
        assert_eq!(records.numeric("yerr").unwrap(), None);
    }

    #[test]
    fn test_series_alias() {
        let chart: ChartSpec = serde_json::from_value(json!({
            "data": [{ "year": 2020, "gdp": 1.5 }],
            "x": "year",
            "y": "gdp"
        }))
        .unwrap();
        assert_eq!(chart.numeric("x").unwrap(), Some(vec![2020.0]));
        assert_eq!(chart.numeric("y").unwrap(), Some(vec![1.5]));
    }

    #[test]
    fn test_non_numeric_series_is_an_error() {
        let chart: ChartSpec = serde_json::from_value(json!({
            "data": { "y": ["a"] }
        }))
        .unwrap();
        assert!(matches!(
            chart.numeric("y"),
            Err(ChartError::InvalidValue { expected: "number", .. })
        ));
        assert_eq!(chart.text("y"), Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_attrs_single_chart_is_normalized() {
        let attrs = ChartAttrs::from_json(&json!({
            "charts": { "data": { "x": [1], "y": [2] } },
            "title": "One"
        }))
        .unwrap();
        assert_eq!(attrs.charts.as_slice().len(), 1);
        assert_eq!(attrs.max_cols, 4);
        assert!(attrs.show_xaxis_labels);
        assert_eq!(attrs.figsize, (10.0, 6.0));
    }

    #[test]
    fn test_attrs_invalid_charts_shape() {
        for bad in [json!({ "charts": 3 }), json!({ "charts": "x" }), json!({ "title": "t" })] {
            assert!(matches!(ChartAttrs::from_json(&bad), Err(ChartError::InvalidCharts)));
        }
    }

    #[test]
    fn test_attrs_enums_parse() {
        let attrs = ChartAttrs::from_json(&json!({
            "charts": [],
            "show_grid": "both",
            "orientation": "horizontal"
        }))
        .unwrap();
        assert_eq!(attrs.show_grid, Some(GridAxis::Both));
        assert_eq!(attrs.orientation, Some(Orientation::Horizontal));
    }

    #[test]
    fn test_active_keys_only_truthy() {
        let config = DrawConfig {
            as_subplots: false,
            yerr: Some(false),
            area: Some(true),
            n_bins: Some(10),
            ..Default::default()
        };
        assert_eq!(config.active_keys(), vec!["area", "n_bins"]);
    }
}
