//! Histograms sharing one set of bin edges.

use crate::attrs::hist_style;
use crate::config::Config;
use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::ir::{kw_str, Axes, DrawCommand, Kwargs};
use crate::palette::{stable_hash, ColorCycle};
use crate::spec::{ChartSpec, DrawConfig};
use crate::stats;

use super::{assert_chart_config, custom_color_cycle, draw_grid, legend_entry, merged, ChartKind};

pub const DEFAULT_BINS: usize = 20;

/// Bin edges shared by every series, computed over all their values.
pub fn shared_bin_edges(datasets: &[Vec<f64>], n_bins: usize) -> Vec<f64> {
    stats::histogram_bin_edges(&datasets.concat(), n_bins)
}

fn series_style(chart: &ChartSpec, cycle: &mut ColorCycle, config: &Config) -> Result<Kwargs> {
    let color = cycle.kwargs_for(stable_hash(chart)?);
    Ok(merged(color, hist_style(&chart.style, config)?))
}

pub fn draw_hist_chart(
    axes: &mut [Axes],
    slots: &[usize],
    charts: &[ChartSpec],
    draw_config: &DrawConfig,
    config: &Config,
) -> Result<Vec<Diagnostic>> {
    let diagnostics = assert_chart_config(ChartKind::Hist, draw_config);

    let orientation = draw_config.orientation.unwrap_or_default();
    let n_bins = draw_config.n_bins.filter(|&n| n > 0).unwrap_or(DEFAULT_BINS);

    // charts without `x` contribute no values
    let datasets = charts
        .iter()
        .map(|chart| Ok(chart.numeric("x")?.unwrap_or_default()))
        .collect::<Result<Vec<Vec<f64>>>>()?;
    let bins = shared_bin_edges(&datasets, n_bins);
    log::debug!("histogram: {} series over {} bins", datasets.len(), n_bins);

    let mut color_cycle = custom_color_cycle(draw_config.as_subplots, charts.len(), config)?;

    if !draw_config.as_subplots {
        let (Some(first), Some(&slot)) = (charts.first(), slots.first()) else {
            return Ok(diagnostics);
        };

        let styles = charts
            .iter()
            .map(|chart| series_style(chart, &mut color_cycle, config))
            .collect::<Result<Vec<Kwargs>>>()?;
        // one unset color drops them all
        let colors: Option<Vec<String>> = styles
            .iter()
            .map(|s| kw_str(s, "color").map(str::to_string))
            .collect();

        let mut style = styles.into_iter().next().unwrap_or_default();
        style.remove("color");

        let ax = &mut axes[slot];
        ax.draw(DrawCommand::Hist {
            datasets,
            bins,
            colors,
            density: false,
            cumulative: false,
            orientation,
            stacked: true,
            style,
            legends: charts.iter().map(|c| legend_entry(c, draw_config)).collect(),
        });
        draw_grid(ax, draw_config, &first.style, config)?;
    } else {
        for ((chart, &slot), data) in charts.iter().zip(slots).zip(datasets) {
            let mut style = series_style(chart, &mut color_cycle, config)?;
            let colors = style
                .remove("color")
                .and_then(|c| c.as_str().map(|c| vec![c.to_string()]));

            let ax = &mut axes[slot];
            ax.draw(DrawCommand::Hist {
                datasets: vec![data],
                bins: bins.clone(),
                colors,
                density: chart.density.unwrap_or(false),
                cumulative: chart.cumulative.unwrap_or(false),
                orientation,
                stacked: false,
                style,
                legends: vec![legend_entry(chart, draw_config)],
            });
            draw_grid(ax, draw_config, &chart.style, config)?;
        }
    }

    Ok(diagnostics)
}
