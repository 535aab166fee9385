//! Chart orchestration: from attributes to a fully described figure.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::attrs::{legend_style, text_style};
use crate::axes::{
    configure_axes_spines, configure_axis_limits, configure_axis_ticks_position, configure_axis_ticks_style,
    configure_labels, label_actions,
};
use crate::config::Config;
use crate::diagnostics::Diagnostic;
use crate::draw::ChartKind;
use crate::error::Result;
use crate::ir::{Axis, DrawCommand, Figure, Text};
use crate::layout::get_subplot_layout;
use crate::spec::ChartAttrs;

/// Figure-coordinate offset of the outer axis labels, just outside the plot areas.
const OUTER_LABEL_OFFSET: f64 = -0.03;

/// A described figure and the warnings raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub figure: Figure,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn line_chart(attrs: &ChartAttrs, config: &Config) -> Result<Drawing> {
    chart_wrapper(ChartKind::Line, attrs, config)
}

pub fn bar_chart(attrs: &ChartAttrs, config: &Config) -> Result<Drawing> {
    chart_wrapper(ChartKind::Bar, attrs, config)
}

pub fn hist_chart(attrs: &ChartAttrs, config: &Config) -> Result<Drawing> {
    chart_wrapper(ChartKind::Hist, attrs, config)
}

/// Plot area index for each chart: all share the first one, or each gets its own.
fn assign_slots(as_subplots: bool, n_charts: usize) -> Vec<usize> {
    if as_subplots {
        (0..n_charts).collect()
    } else {
        vec![0; n_charts]
    }
}

fn has_legend_entries(commands: &[DrawCommand]) -> bool {
    commands.iter().any(|command| match command {
        DrawCommand::Line { legend, .. } | DrawCommand::Bar { legend, .. } => legend.is_some(),
        DrawCommand::Hist { legends, .. } => legends.iter().any(Option::is_some),
        DrawCommand::FillBetween { .. } => false,
    })
}

/// Build the figure for `attrs` with the drawer for `kind`.
///
/// Plot areas start hidden; each one that receives a chart is shown again
/// when its spines are configured, so unused grid cells stay blank.
pub fn chart_wrapper(kind: ChartKind, attrs: &ChartAttrs, config: &Config) -> Result<Drawing> {
    let charts = attrs.charts.as_slice();
    let layout = get_subplot_layout(attrs.as_subplots, charts.len(), attrs.max_cols)?;
    log::debug!(
        "drawing {} {} chart(s) on a {}x{} layout",
        charts.len(),
        kind.name(),
        layout.rows,
        layout.columns
    );

    let mut figure = Figure::new(layout, attrs.figsize, attrs.sharex, attrs.sharey);
    let slots = assign_slots(attrs.as_subplots, charts.len());
    let mut diagnostics = Vec::new();

    for ax in &mut figure.axes {
        ax.visible = false;
    }

    for (chart, &slot) in charts.iter().zip(&slots) {
        let ax = &mut figure.axes[slot];
        configure_axes_spines(ax, config)?;
        for (axis, show) in [(Axis::X, attrs.show_xaxis_labels), (Axis::Y, attrs.show_yaxis_labels)] {
            if show {
                configure_axis_ticks_style(ax, axis, config)?;
            } else {
                ax.axis_mut(axis).visible = false;
            }
        }
        diagnostics.extend(configure_axis_ticks_position(ax, chart));
        configure_labels(ax, chart, &label_actions(false), config);
    }

    diagnostics.extend(kind.draw(&mut figure.axes, &slots, charts, &attrs.draw_config(), config)?);

    for (chart, &slot) in charts.iter().zip(&slots) {
        configure_axis_limits(&mut figure.axes[slot], chart);
    }

    if attrs.show_legend {
        let style = legend_style(config)?;
        let used: BTreeSet<usize> = slots.iter().copied().collect();
        for slot in used {
            let ax = &mut figure.axes[slot];
            if has_legend_entries(&ax.commands) {
                ax.legend = Some(style.clone());
            }
        }
    }

    if let Some(title) = &attrs.title {
        figure.suptitle = Some(Text::new(title.as_str(), text_style("title", config)));
    }

    if let Some(xlabel) = &attrs.xlabel {
        let mut style = text_style("xlabel", config);
        style.insert("ha".to_string(), Value::from("center"));
        figure.text(0.5, OUTER_LABEL_OFFSET, 0.0, Text::new(xlabel.as_str(), style));
    }

    if let Some(ylabel) = &attrs.ylabel {
        let mut style = text_style("ylabel", config);
        style.insert("va".to_string(), Value::from("center"));
        figure.text(OUTER_LABEL_OFFSET, 0.5, 90.0, Text::new(ylabel.as_str(), style));
    }

    Ok(Drawing { figure, diagnostics })
}
