//! Chart-type drawers.
//!
//! Every drawer receives the figure's plot areas, the index of the plot area
//! assigned to each chart (`slots`), the charts and the drawing options, and
//! records its plotting calls on the plot areas.

pub mod bar;
pub mod hist;
pub mod line;

use serde_json::{Map, Value};

use crate::attrs::grid_style;
use crate::config::Config;
use crate::diagnostics::Diagnostic;
use crate::error::{ChartError, Result};
use crate::ir::{Axes, Kwargs};
use crate::palette::ColorCycle;
use crate::spec::{ChartSpec, DrawConfig};

pub use bar::draw_bar_chart;
pub use hist::draw_hist_chart;
pub use line::draw_line_chart;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Hist,
}

impl ChartKind {
    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Hist => "histogram",
        }
    }

    /// Drawing options this kind of chart understands.
    pub fn supported_options(self) -> &'static [&'static str] {
        match self {
            ChartKind::Line => &["as_subplots", "grid", "yerr", "area", "legend"],
            ChartKind::Bar => &["as_subplots", "grid", "yerr", "orientation", "legend"],
            ChartKind::Hist => &["as_subplots", "grid", "n_bins", "orientation", "legend"],
        }
    }

    pub fn draw(
        self,
        axes: &mut [Axes],
        slots: &[usize],
        charts: &[ChartSpec],
        draw_config: &DrawConfig,
        config: &Config,
    ) -> Result<Vec<Diagnostic>> {
        match self {
            ChartKind::Line => draw_line_chart(axes, slots, charts, draw_config, config),
            ChartKind::Bar => draw_bar_chart(axes, slots, charts, draw_config, config),
            ChartKind::Hist => draw_hist_chart(axes, slots, charts, draw_config, config),
        }
    }
}

/// Warn about every switched-on option the chart kind does not support.
pub fn assert_chart_config(kind: ChartKind, draw_config: &DrawConfig) -> Vec<Diagnostic> {
    let supported = kind.supported_options();
    draw_config
        .active_keys()
        .into_iter()
        .filter(|key| !supported.contains(key))
        .map(|key| {
            Diagnostic::UnsupportedOption {
                kind: kind.name(),
                key,
            }
            .raise()
        })
        .collect()
}

/// One color per plot area: a single shared color when every chart has its
/// own subplot, a distinct color per chart when they share a plot area.
pub fn custom_color_cycle(as_subplots: bool, n_charts: usize, config: &Config) -> Result<ColorCycle> {
    let (path, size) = if as_subplots {
        ("color.general.singular", 1)
    } else {
        ("color.general.multiple", n_charts)
    };
    Ok(ColorCycle::new(config.str(path)?, size))
}

/// `base` overridden by `overrides`.
pub(crate) fn merged(mut base: Kwargs, overrides: Kwargs) -> Kwargs {
    base.extend(overrides);
    base
}

pub(crate) fn required_numeric(chart: &ChartSpec, attr: &str, index: usize) -> Result<Vec<f64>> {
    chart.numeric(attr)?.ok_or_else(|| ChartError::MissingSeries {
        attr: attr.to_string(),
        index,
    })
}

pub(crate) fn legend_entry(chart: &ChartSpec, draw_config: &DrawConfig) -> Option<String> {
    if draw_config.legend {
        chart.name.clone()
    } else {
        None
    }
}

pub(crate) fn draw_grid(
    ax: &mut Axes,
    draw_config: &DrawConfig,
    style: &Map<String, Value>,
    config: &Config,
) -> Result<()> {
    if let Some(axis) = draw_config.grid {
        ax.set_grid(axis, grid_style(style, config)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Orientation;

    #[test]
    fn test_assert_chart_config_flags_unsupported() {
        let draw_config = DrawConfig {
            area: Some(true),
            n_bins: Some(10),
            orientation: Some(Orientation::Horizontal),
            ..Default::default()
        };
        let diags = assert_chart_config(ChartKind::Line, &draw_config);
        assert_eq!(
            diags,
            vec![
                Diagnostic::UnsupportedOption { kind: "line", key: "orientation" },
                Diagnostic::UnsupportedOption { kind: "line", key: "n_bins" },
            ]
        );
        assert!(assert_chart_config(ChartKind::Hist, &DrawConfig {
            n_bins: Some(10),
            ..Default::default()
        })
        .is_empty());
    }

    #[test]
    fn test_falsy_options_are_not_flagged() {
        let draw_config = DrawConfig {
            yerr: Some(false),
            area: Some(false),
            ..Default::default()
        };
        assert!(assert_chart_config(ChartKind::Hist, &draw_config).is_empty());
    }

    #[test]
    fn test_custom_color_cycle_size_by_mode() {
        let config = Config::default()
            .with("color.general.singular", "#000000")
            .with("color.general.multiple", "tab10");
        let mut single = custom_color_cycle(true, 5, &config).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.color_for(3), "#000000");

        let shared = custom_color_cycle(false, 5, &config).unwrap();
        assert_eq!(shared.len(), 5);
    }

    #[test]
    fn test_merged_overrides_win() {
        let mut base = Kwargs::new();
        base.insert("color".into(), Value::from("blue"));
        let mut over = Kwargs::new();
        over.insert("color".into(), Value::from("red"));
        over.insert("alpha".into(), Value::from(0.5));
        let out = merged(base, over);
        assert_eq!(out["color"], Value::from("red"));
        assert_eq!(out.len(), 2);
    }
}
