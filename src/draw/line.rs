//! Line charts with optional error bands and filled areas.

use crate::attrs::{area_style, line_style};
use crate::config::Config;
use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::ir::{kw_str, Axes, Axis, DrawCommand, Step};
use crate::palette::stable_hash;
use crate::spec::{ChartSpec, DrawConfig};
use crate::stats;

use super::{assert_chart_config, custom_color_cycle, draw_grid, legend_entry, merged, required_numeric, ChartKind};

pub fn draw_line_chart(
    axes: &mut [Axes],
    slots: &[usize],
    charts: &[ChartSpec],
    draw_config: &DrawConfig,
    config: &Config,
) -> Result<Vec<Diagnostic>> {
    let mut diagnostics = assert_chart_config(ChartKind::Line, draw_config);
    let mut color_cycle = custom_color_cycle(draw_config.as_subplots, charts.len(), config)?;

    let show_yerr = draw_config.yerr == Some(true);
    let show_area = draw_config.area == Some(true);

    for (index, (chart, &slot)) in charts.iter().zip(slots).enumerate() {
        let ax = &mut axes[slot];

        let y = required_numeric(chart, "y", index)?;
        let x = match chart.numeric("x")? {
            Some(x) => x,
            None => (0..y.len()).map(|i| i as f64).collect(),
        };
        let yerr = chart
            .numeric("yerr")?
            .filter(|e| show_yerr && e.len() == y.len());

        if yerr.is_some() && show_area {
            diagnostics.push(Diagnostic::ErrorBandWithArea { index }.raise());
        }

        let color = color_cycle.kwargs_for(stable_hash(chart)?);
        let line_config = merged(color.clone(), line_style(&chart.style, config)?);
        let area_config = merged(color, area_style(&chart.style, config)?);

        if let Some(yerr) = &yerr {
            let lower = y.iter().zip(yerr).map(|(v, e)| v - e).collect();
            let upper = y.iter().zip(yerr).map(|(v, e)| v + e).collect();
            ax.draw(DrawCommand::FillBetween {
                x: x.clone(),
                lower,
                upper,
                step: None,
                style: area_config.clone(),
            });
        }

        if show_area {
            let step = kw_str(&line_config, "drawstyle").and_then(Step::from_drawstyle);
            ax.draw(DrawCommand::FillBetween {
                x: x.clone(),
                lower: vec![0.0; y.len()],
                upper: y.clone(),
                step,
                style: area_config,
            });
        }

        let x_range = stats::min_max(&x);
        ax.draw(DrawCommand::Line {
            x,
            y,
            style: line_config,
            legend: legend_entry(chart, draw_config),
        });

        draw_grid(ax, draw_config, &chart.style, config)?;

        if let Some((min, max)) = x_range {
            ax.set_lim(Axis::X, Some(min), Some(max));
        }
    }

    Ok(diagnostics)
}
