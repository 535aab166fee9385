//! Grouped and per-subplot bar charts.

use serde_json::Value;

use crate::attrs::bar_style;
use crate::axes::{configure_labels, label_actions};
use crate::config::Config;
use crate::diagnostics::Diagnostic;
use crate::error::{ChartError, Result};
use crate::ir::{Axes, Axis, DrawCommand};
use crate::palette::stable_hash;
use crate::spec::{ChartSpec, DrawConfig};

use super::{assert_chart_config, custom_color_cycle, draw_grid, legend_entry, merged, required_numeric, ChartKind};

/// Tick label rotation in degrees. Only subplots rotate, and more labels
/// rotate further.
pub fn bar_label_rotation(n_labels: usize, as_subplots: bool) -> f64 {
    if !as_subplots || n_labels < 4 {
        0.0
    } else if n_labels < 7 {
        45.0
    } else {
        90.0
    }
}

fn required_labels(chart: &ChartSpec, index: usize) -> Result<Vec<String>> {
    chart.text("label").ok_or_else(|| ChartError::MissingSeries {
        attr: "label".to_string(),
        index,
    })
}

pub fn draw_bar_chart(
    axes: &mut [Axes],
    slots: &[usize],
    charts: &[ChartSpec],
    draw_config: &DrawConfig,
    config: &Config,
) -> Result<Vec<Diagnostic>> {
    let mut diagnostics = assert_chart_config(ChartKind::Bar, draw_config);
    let Some(first) = charts.first() else {
        return Ok(diagnostics);
    };

    let as_subplots = draw_config.as_subplots;
    let orientation = draw_config.orientation.unwrap_or_default();
    let is_horizontal = orientation.is_horizontal();
    let thickness_key = if is_horizontal { "height" } else { "width" };
    let category_axis = if is_horizontal { Axis::Y } else { Axis::X };

    let n_series = charts.len() as f64;
    let n_groups = required_labels(first, 0)?.len();
    let bar_thickness = config.f64("plot.bar.width")? / n_series;

    let mut color_cycle = custom_color_cycle(as_subplots, charts.len(), config)?;

    for (index, (chart, &slot)) in charts.iter().zip(slots).enumerate() {
        let ax = &mut axes[slot];

        let labels = required_labels(chart, index)?;
        let values = required_numeric(chart, "y", index)?;
        let errors = match draw_config.yerr {
            Some(true) => chart.numeric("yerr")?,
            _ => None,
        };

        let color = color_cycle.kwargs_for(stable_hash(chart)?);
        let mut bar_config = merged(color, bar_style(&chart.style, is_horizontal, config)?);

        let offset = if as_subplots {
            0.0
        } else {
            bar_config.insert(thickness_key.to_string(), Value::from(bar_thickness));
            index as f64 * bar_thickness
        };

        let positions: Vec<f64> = (0..labels.len()).map(|i| i as f64 + offset).collect();
        ax.draw(DrawCommand::Bar {
            orientation,
            positions,
            values,
            errors,
            labels: labels.clone(),
            style: bar_config,
            legend: legend_entry(chart, draw_config),
        });

        draw_grid(ax, draw_config, &chart.style, config)?;

        // grouped ticks sit under the middle of each group
        let tick_count = if as_subplots { labels.len() } else { n_groups };
        let centre = if as_subplots {
            0.0
        } else {
            (n_series - 1.0) / 2.0 * bar_thickness
        };
        let ticks: Vec<f64> = (0..tick_count).map(|i| i as f64 + centre).collect();
        let tick_labels = if ticks.len() == labels.len() {
            Some(labels.clone())
        } else {
            diagnostics.push(
                Diagnostic::TickLengthMismatch {
                    axis: category_axis,
                    ticks: ticks.len(),
                    labels: labels.len(),
                }
                .raise(),
            );
            None
        };
        ax.set_ticks(category_axis, ticks, tick_labels);
        if category_axis == Axis::X {
            ax.xaxis.label_rotation = bar_label_rotation(labels.len(), as_subplots);
        }

        configure_labels(ax, chart, &label_actions(is_horizontal), config);
    }

    if !as_subplots {
        if let Some(&slot) = slots.first() {
            axes[slot].set_lim(orientation.value_axis(), Some(0.0), None);
        }
    }

    Ok(diagnostics)
}
