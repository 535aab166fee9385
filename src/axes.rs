//! Plot-area configuration: spines, ticks, limits and labels.

use serde_json::Value;

use crate::attrs::text_style;
use crate::config::Config;
use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::ir::{Axes, Axis, Side, Spine, Text};
use crate::spec::ChartSpec;

/// Show the plot area and style its four spines from the configuration.
pub fn configure_axes_spines(ax: &mut Axes, config: &Config) -> Result<()> {
    ax.visible = true;

    let linewidth = config.f64("axes.spines.width")?;
    let zorder = config.f64("axes.spines.zorder")?;
    for side in Side::ALL {
        let visible = config.bool(&format!("axes.spines.{}.visible", side.name()))?;
        ax.spines.insert(
            side,
            Spine {
                linewidth,
                zorder,
                visible,
            },
        );
    }
    Ok(())
}

/// Major tick width, length and label size for one axis.
pub fn configure_axis_ticks_style(ax: &mut Axes, axis: Axis, config: &Config) -> Result<()> {
    let width = config.require("axes.spines.width")?.clone();
    let length = config.require("axes.ticks.length")?.clone();
    let labelsize = config.require("axes.ticks.label.size")?.clone();

    let params = &mut ax.axis_mut(axis).tick_params;
    params.insert("which".to_string(), Value::from("major"));
    params.insert("width".to_string(), width);
    params.insert("length".to_string(), length);
    params.insert("labelsize".to_string(), labelsize);
    Ok(())
}

/// Apply explicit tick positions (and labels) from the chart.
///
/// - positions only: ticks are drawn
/// - positions and labels of equal length: both are drawn
/// - lengths differ: ticks are drawn, labels discarded, warning raised
/// - labels only: the axis is skipped, warning raised
pub fn configure_axis_ticks_position(ax: &mut Axes, chart: &ChartSpec) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for axis in Axis::ALL {
        match chart.ticks(axis) {
            (None, None) => {}
            (None, Some(_)) => {
                diagnostics.push(Diagnostic::TickLabelsWithoutTicks { axis }.raise());
            }
            (Some(ticks), None) => ax.set_ticks(axis, ticks.clone(), None),
            (Some(ticks), Some(labels)) if ticks.len() != labels.len() => {
                diagnostics.push(
                    Diagnostic::TickLengthMismatch {
                        axis,
                        ticks: ticks.len(),
                        labels: labels.len(),
                    }
                    .raise(),
                );
                ax.set_ticks(axis, ticks.clone(), None);
            }
            (Some(ticks), Some(labels)) => ax.set_ticks(axis, ticks.clone(), Some(labels.clone())),
        }
    }

    diagnostics
}

/// Apply the chart's explicit bounds; an unset side keeps the current bound.
pub fn configure_axis_limits(ax: &mut Axes, chart: &ChartSpec) {
    for axis in Axis::ALL {
        let (min, max) = chart.limits(axis);
        if min.is_none() && max.is_none() {
            continue;
        }
        let (current_min, current_max) = ax.get_lim(axis);
        ax.set_lim(
            axis,
            Some(min.unwrap_or(current_min)),
            Some(max.unwrap_or(current_max)),
        );
    }
}

/// Text roles a chart can set on its plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    Subtitle,
    XLabel,
    YLabel,
}

impl LabelRole {
    /// Name of the role, also used as its `font.<role>` configuration group.
    pub fn name(self) -> &'static str {
        match self {
            LabelRole::Subtitle => "subtitle",
            LabelRole::XLabel => "xlabel",
            LabelRole::YLabel => "ylabel",
        }
    }

    fn text(self, chart: &ChartSpec) -> Option<&str> {
        match self {
            LabelRole::Subtitle => chart.subtitle.as_deref(),
            LabelRole::XLabel => chart.xlabel.as_deref(),
            LabelRole::YLabel => chart.ylabel.as_deref(),
        }
    }
}

pub type LabelSetter = fn(&mut Axes, Text);
pub type LabelAction = (LabelRole, LabelSetter);

/// Subtitle, x label and y label setters. `swap_xy` routes the chart's
/// `xlabel` to the vertical axis and `ylabel` to the horizontal one.
pub fn label_actions(swap_xy: bool) -> [LabelAction; 3] {
    let set_title: LabelSetter = Axes::set_title;
    let set_xlabel: LabelSetter = Axes::set_xlabel;
    let set_ylabel: LabelSetter = Axes::set_ylabel;
    let (set_x, set_y) = if swap_xy {
        (set_ylabel, set_xlabel)
    } else {
        (set_xlabel, set_ylabel)
    };
    [
        (LabelRole::Subtitle, set_title),
        (LabelRole::XLabel, set_x),
        (LabelRole::YLabel, set_y),
    ]
}

/// Run each action whose role has text on the chart, styled for that role.
pub fn configure_labels(ax: &mut Axes, chart: &ChartSpec, actions: &[LabelAction], config: &Config) {
    for &(role, action) in actions {
        if let Some(content) = role.text(chart) {
            action(ax, Text::new(content, text_style(role.name(), config)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{DrawCommand, Kwargs};
    use serde_json::json;

    fn chart(value: serde_json::Value) -> ChartSpec {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_spines_from_config() {
        let mut ax = Axes::default();
        ax.visible = false;
        let config = Config::default().with("axes.spines.width", 2.0);
        configure_axes_spines(&mut ax, &config).unwrap();

        assert!(ax.visible);
        assert!(!ax.spines[&Side::Top].visible);
        assert!(ax.spines[&Side::Left].visible);
        assert!(ax.spines.values().all(|s| s.linewidth == 2.0));
    }

    #[test]
    fn test_spines_missing_config_is_error() {
        let mut ax = Axes::default();
        assert!(configure_axes_spines(&mut ax, &Config::empty()).is_err());
    }

    #[test]
    fn test_tick_style() {
        let mut ax = Axes::default();
        configure_axis_ticks_style(&mut ax, Axis::Y, &Config::default()).unwrap();
        let params = &ax.yaxis.tick_params;
        assert_eq!(params.get("length"), Some(&json!(3.5)));
        assert_eq!(params.get("labelsize"), Some(&json!(9)));
        assert!(ax.xaxis.tick_params.is_empty());
    }

    #[test]
    fn test_ticks_only() {
        let mut ax = Axes::default();
        let diags = configure_axis_ticks_position(&mut ax, &chart(json!({ "data": {}, "xticks": [1, 2] })));
        assert!(diags.is_empty());
        assert_eq!(ax.xaxis.ticks, Some(vec![1.0, 2.0]));
        assert_eq!(ax.xaxis.ticklabels, None);
    }

    #[test]
    fn test_ticks_with_labels() {
        let mut ax = Axes::default();
        let c = chart(json!({ "data": {}, "yticks": [1, 2], "yticklabels": ["a", "b"] }));
        assert!(configure_axis_ticks_position(&mut ax, &c).is_empty());
        assert_eq!(ax.yaxis.ticklabels, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_ticks_length_mismatch_discards_labels() {
        let mut ax = Axes::default();
        let c = chart(json!({ "data": {}, "xticks": [1, 2, 3], "xticklabels": ["a", "b"] }));
        let diags = configure_axis_ticks_position(&mut ax, &c);
        assert_eq!(
            diags,
            vec![Diagnostic::TickLengthMismatch { axis: Axis::X, ticks: 3, labels: 2 }]
        );
        assert_eq!(ax.xaxis.ticks, Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(ax.xaxis.ticklabels, None);
    }

    #[test]
    fn test_labels_without_ticks_skips_axis() {
        let mut ax = Axes::default();
        let c = chart(json!({ "data": {}, "xticklabels": ["a"] }));
        let diags = configure_axis_ticks_position(&mut ax, &c);
        assert_eq!(diags, vec![Diagnostic::TickLabelsWithoutTicks { axis: Axis::X }]);
        assert_eq!(ax.xaxis, Default::default());
    }

    #[test]
    fn test_limits_fill_unset_side_from_current() {
        let mut ax = Axes::default();
        ax.draw(DrawCommand::Line {
            x: vec![0.0, 10.0],
            y: vec![0.0, 10.0],
            style: Kwargs::new(),
            legend: None,
        });
        configure_axis_limits(&mut ax, &chart(json!({ "data": {}, "y_min": 2.0 })));
        assert_eq!(ax.yaxis.limits, (Some(2.0), Some(10.5)));
        // x untouched
        assert_eq!(ax.xaxis.limits, (None, None));
    }

    #[test]
    fn test_configure_labels_styles_by_role() {
        let mut ax = Axes::default();
        let c = chart(json!({ "data": {}, "subtitle": "Sub", "xlabel": "X" }));
        configure_labels(&mut ax, &c, &label_actions(false), &Config::default());

        let title = ax.title.as_ref().unwrap();
        assert_eq!(title.content, "Sub");
        assert_eq!(title.style.get("fontsize"), Some(&json!(14)));
        assert_eq!(ax.xaxis.label.as_ref().unwrap().content, "X");
        assert!(ax.yaxis.label.is_none());
    }

    #[test]
    fn test_configure_labels_swapped() {
        let mut ax = Axes::default();
        let c = chart(json!({ "data": {}, "xlabel": "Category", "ylabel": "Value" }));
        configure_labels(&mut ax, &c, &label_actions(true), &Config::default());
        assert_eq!(ax.yaxis.label.as_ref().unwrap().content, "Category");
        assert_eq!(ax.xaxis.label.as_ref().unwrap().content, "Value");
    }
}
