//! Rasterising a described figure with plotters.
//!
//! The figure is split into an even grid of panels, one per plot area. Hidden
//! plot areas leave their panel blank. Font sizes are in points and scale with
//! the output height, so the same figure renders alike at any resolution.

use anyhow::{Context, Result};
use image::ImageEncoder;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::ir::{self, kw_bool, kw_f64, kw_str, Axes, Axis, AxisState, DrawCommand, Figure, Kwargs, Side, Step};
use crate::palette::default_color;
use crate::spec::Orientation;
use crate::stats;
use crate::wrapper::Drawing;
use crate::{OutputFormat, RenderOptions};

const POINTS_PER_INCH: f64 = 72.0;
const DEFAULT_FONT_SIZE: f64 = 10.0;
const LEGEND_SAMPLE_WIDTH: i32 = 20;

impl Drawing {
    /// Encode the figure as PNG or SVG bytes.
    pub fn render(&self, options: &RenderOptions) -> Result<Vec<u8>> {
        match options.format {
            OutputFormat::Png => render_png(&self.figure, options.width, options.height),
            OutputFormat::Svg => render_svg(&self.figure, options.width, options.height),
        }
    }
}

pub fn render_png(figure: &Figure, width: u32, height: u32) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        anyhow::bail!("Cannot render a {}x{} image", width, height);
    }

    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_figure(&root, figure, height)?;
        root.present().context("Failed to present drawing")?;
    }

    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(&buffer, width, height, image::ColorType::Rgb8)
            .context("Failed to encode PNG")?;
    }
    Ok(png_bytes)
}

pub fn render_svg(figure: &Figure, width: u32, height: u32) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        anyhow::bail!("Cannot render a {}x{} image", width, height);
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        draw_figure(&root, figure, height)?;
        root.present().context("Failed to present drawing")?;
    }
    Ok(svg.into_bytes())
}

// =============================================================================
// Figure
// =============================================================================

/// Converts point sizes to pixels for a figure drawn `height` pixels tall.
#[derive(Debug, Clone, Copy)]
struct Scale {
    px_per_point: f64,
}

impl Scale {
    fn new(figure: &Figure, height: u32) -> Self {
        let inches = if figure.figsize.1 > 0.0 { figure.figsize.1 } else { 6.0 };
        Scale {
            px_per_point: height as f64 / (inches * POINTS_PER_INCH),
        }
    }

    fn px(&self, points: f64) -> f64 {
        points * self.px_per_point
    }

    fn px_i32(&self, points: f64) -> i32 {
        self.px(points).round() as i32
    }

    fn stroke(&self, points: f64) -> u32 {
        self.px(points).round().max(1.0) as u32
    }
}

fn draw_figure<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &Figure, height: u32) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).context("Failed to fill background")?;
    let scale = Scale::new(figure, height);
    let (width_px, height_px) = root.dim_in_pixel();

    let top = match &figure.suptitle {
        Some(title) => {
            let size = scale.px(font_size(&title.style));
            let style = text_style(&title.style, scale).pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new(title.content.clone(), (width_px as i32 / 2, size as i32), style))
                .context("Failed to draw figure title")?;
            (size * 2.0) as u32
        }
        None => 0,
    };

    // texts placed left of or below the plot areas get their own strip
    let strip = |text: &ir::Text| (scale.px(font_size(&text.style)) * 2.0) as u32;
    let bottom = figure
        .texts
        .iter()
        .filter(|t| t.y < 0.0)
        .map(|t| strip(&t.text))
        .max()
        .unwrap_or(0);
    let left = figure
        .texts
        .iter()
        .filter(|t| t.x < 0.0)
        .map(|t| strip(&t.text))
        .max()
        .unwrap_or(0);

    for placed in &figure.texts {
        let x = if placed.x < 0.0 {
            left as i32 / 2
        } else {
            (placed.x * width_px as f64) as i32
        };
        let y = if placed.y < 0.0 {
            height_px as i32 - bottom as i32 / 2
        } else {
            ((1.0 - placed.y) * height_px as f64) as i32
        };
        let mut style = text_style(&placed.text.style, scale).pos(Pos::new(HPos::Center, VPos::Center));
        if placed.rotation >= 45.0 {
            style = style.transform(FontTransform::Rotate270);
        }
        root.draw(&Text::new(placed.text.content.clone(), (x, y), style))
            .context("Failed to draw figure text")?;
    }

    let area = root.margin(top, bottom, left, 0);
    let panels = area.split_evenly((figure.layout.rows, figure.layout.columns));
    for (panel, ax) in panels.iter().zip(&figure.axes) {
        if ax.visible {
            draw_axes(panel, ax, scale)?;
        }
    }
    Ok(())
}

// =============================================================================
// Plot areas
// =============================================================================

fn draw_axes<DB: DrawingBackend>(panel: &DrawingArea<DB, Shift>, ax: &Axes, scale: Scale) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (x0, x1) = drawable_range(ax.get_lim(Axis::X));
    let (y0, y1) = drawable_range(ax.get_lim(Axis::Y));

    let mut builder = ChartBuilder::on(panel);
    builder.margin(scale.px_i32(8.0).max(2));
    if let Some(title) = &ax.title {
        builder.caption(&title.content, font_desc(&title.style, scale));
    }
    builder
        .x_label_area_size(label_area(&ax.xaxis, scale, 2.5))
        .y_label_area_size(label_area(&ax.yaxis, scale, 5.0));
    let mut chart = builder
        .build_cartesian_2d(x0..x1, y0..y1)
        .context("Failed to build chart")?;

    let x_format = |v: &f64| format_tick(*v);
    let y_format = |v: &f64| format_tick(*v);
    {
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(TRANSPARENT)
            .x_label_formatter(&x_format)
            .y_label_formatter(&y_format)
            .label_style(font_desc_sized(tick_label_size(&ax.xaxis), scale))
            .set_all_tick_mark_size(scale.px_i32(tick_length(&ax.xaxis)));

        match &ax.grid {
            Some(grid) => {
                mesh.bold_line_style(shape_style(&grid.style, GRID_GREY, scale));
                if !grid.axis.includes(Axis::X) || ax.xaxis.ticks.is_some() {
                    mesh.disable_x_mesh();
                }
                if !grid.axis.includes(Axis::Y) || ax.yaxis.ticks.is_some() {
                    mesh.disable_y_mesh();
                }
            }
            None => {
                mesh.disable_mesh();
            }
        }

        if !ax.xaxis.visible || ax.xaxis.ticks.is_some() {
            mesh.x_labels(0);
        }
        if !ax.yaxis.visible || ax.yaxis.ticks.is_some() {
            mesh.y_labels(0);
        }
        if !spine_visible(ax, Side::Bottom) {
            mesh.disable_x_axis();
        }
        if !spine_visible(ax, Side::Left) {
            mesh.disable_y_axis();
        }
        if let Some(spine) = ax.spines.get(&Side::Bottom) {
            mesh.axis_style(SPINE_GREY.stroke_width(scale.stroke(spine.linewidth)));
        }
        if let Some(label) = &ax.xaxis.label {
            mesh.x_desc(label.content.as_str()).axis_desc_style(font_desc(&label.style, scale));
        }
        if let Some(label) = &ax.yaxis.label {
            mesh.y_desc(label.content.as_str()).axis_desc_style(font_desc(&label.style, scale));
        }

        mesh.draw().context("Failed to draw mesh")?;
    }

    draw_explicit_ticks(panel, &chart, ax, Axis::X, (x0, x1), (y0, y1), scale)?;
    draw_explicit_ticks(panel, &chart, ax, Axis::Y, (x0, x1), (y0, y1), scale)?;

    let mut commands: Vec<&DrawCommand> = ax.commands.iter().collect();
    commands.sort_by(|a, b| zorder(a).total_cmp(&zorder(b)));
    let mut has_legend = false;
    for command in commands {
        has_legend |= draw_command(&mut chart, command, scale)?;
    }

    for side in [Side::Top, Side::Right] {
        if let Some(spine) = ax.spines.get(&side).filter(|s| s.visible) {
            let path = match side {
                Side::Top => vec![(x0, y1), (x1, y1)],
                _ => vec![(x1, y0), (x1, y1)],
            };
            chart
                .draw_series(std::iter::once(PathElement::new(
                    path,
                    SPINE_GREY.stroke_width(scale.stroke(spine.linewidth)),
                )))
                .context("Failed to draw spine")?;
        }
    }

    if let (Some(legend), true) = (&ax.legend, has_legend) {
        let frameon = kw_bool(legend, "frameon").unwrap_or(false);
        let size = kw_f64(legend, "fontsize").unwrap_or(DEFAULT_FONT_SIZE);
        let label_color = kw_str(legend, "labelcolor").and_then(parse_color).unwrap_or(BLACK);
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font(("sans-serif", scale.px(size)).into_font().color(&label_color))
            .background_style(WHITE.mix(if frameon { 0.8 } else { 0.0 }))
            .border_style(if frameon { BLACK.mix(1.0) } else { TRANSPARENT })
            .draw()
            .context("Failed to draw legend")?;
    }

    Ok(())
}

/// Tick marks, labels and grid lines at explicitly set positions.
fn draw_explicit_ticks<DB: DrawingBackend>(
    panel: &DrawingArea<DB, Shift>,
    chart: &ChartContext<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    ax: &Axes,
    axis: Axis,
    (x0, x1): (f64, f64),
    (y0, y1): (f64, f64),
    scale: Scale,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let state = ax.axis(axis);
    let Some(ticks) = state.ticks.as_ref().filter(|_| state.visible) else {
        return Ok(());
    };

    let (base_x, base_y) = panel.get_base_pixel();
    let length = scale.px_i32(tick_length(state));
    let mut font = font_desc_sized(tick_label_size(state), scale);
    if axis == Axis::X && state.label_rotation >= 45.0 {
        font = font.transform(FontTransform::Rotate90);
    }
    let grid = ax.grid.as_ref().filter(|g| g.axis.includes(axis));

    for (i, &tick) in ticks.iter().enumerate() {
        let label = match &state.ticklabels {
            Some(labels) => labels.get(i).cloned().unwrap_or_default(),
            None => format_tick(tick),
        };
        let (anchor, (dx, dy), pos) = match axis {
            Axis::X => (
                chart.backend_coord(&(tick, y0)),
                (0, length),
                Pos::new(HPos::Center, VPos::Top),
            ),
            Axis::Y => (
                chart.backend_coord(&(x0, tick)),
                (-length, 0),
                Pos::new(HPos::Right, VPos::Center),
            ),
        };
        let (px, py) = (anchor.0 - base_x, anchor.1 - base_y);

        panel
            .draw(&PathElement::new(vec![(px, py), (px + dx, py + dy)], SPINE_GREY))
            .context("Failed to draw tick")?;
        panel
            .draw(&Text::new(label, (px + dx * 2, py + dy * 2), font.clone().color(&TEXT_GREY).pos(pos)))
            .context("Failed to draw tick label")?;

        if let Some(grid) = grid {
            let (from, to) = match axis {
                Axis::X => ((tick, y0), (tick, y1)),
                Axis::Y => ((x0, tick), (x1, tick)),
            };
            let (a, b) = (chart.backend_coord(&from), chart.backend_coord(&to));
            panel
                .draw(&PathElement::new(
                    vec![(a.0 - base_x, a.1 - base_y), (b.0 - base_x, b.1 - base_y)],
                    shape_style(&grid.style, GRID_GREY, scale),
                ))
                .context("Failed to draw grid line")?;
        }
    }
    Ok(())
}

// =============================================================================
// Drawing commands
// =============================================================================

/// Draw one command; returns whether it added a legend entry.
fn draw_command<DB: DrawingBackend>(
    chart: &mut ChartContext<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    command: &DrawCommand,
    scale: Scale,
) -> Result<bool>
where
    DB::ErrorType: 'static,
{
    match command {
        DrawCommand::Line { x, y, style, legend } => {
            let points: Vec<(f64, f64)> = x
                .iter()
                .zip(y)
                .filter(|(a, b)| a.is_finite() && b.is_finite())
                .map(|(&a, &b)| (a, b))
                .collect();
            let points = match kw_str(style, "drawstyle").and_then(Step::from_drawstyle) {
                Some(step) => step_points(&points, step),
                None => points,
            };
            let line = shape_style(style, default_rgb(0), scale);

            let anno = match kw_str(style, "linestyle").unwrap_or("-") {
                "--" | "dashed" | "-." | "dashdot" => chart
                    .draw_series(DashedLineSeries::new(points.clone(), 6u32, 4u32, line))
                    .context("Failed to draw line series")?,
                ":" | "dotted" => chart
                    .draw_series(DashedLineSeries::new(points.clone(), 2u32, 3u32, line))
                    .context("Failed to draw line series")?,
                _ => chart
                    .draw_series(LineSeries::new(points.clone(), line))
                    .context("Failed to draw line series")?,
            };
            if let Some(name) = legend {
                anno.label(name.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + LEGEND_SAMPLE_WIDTH, y)], line)
                });
            }

            if kw_str(style, "marker").is_some() {
                let radius = scale.px_i32(3.0).max(1);
                chart
                    .draw_series(points.iter().map(|&p| Circle::new(p, radius, line.filled())))
                    .context("Failed to draw markers")?;
            }
            Ok(legend.is_some())
        }
        DrawCommand::FillBetween {
            x,
            lower,
            upper,
            step,
            style,
        } => {
            let top: Vec<(f64, f64)> = x.iter().copied().zip(upper.iter().copied()).collect();
            let bottom: Vec<(f64, f64)> = x.iter().copied().zip(lower.iter().copied()).collect();
            let (top, bottom) = match step {
                Some(step) => (step_points(&top, *step), step_points(&bottom, *step)),
                None => (top, bottom),
            };
            let polygon: Vec<(f64, f64)> = top.into_iter().chain(bottom.into_iter().rev()).collect();
            chart
                .draw_series(std::iter::once(Polygon::new(polygon, fill_style(style, default_rgb(0)))))
                .context("Failed to draw filled area")?;
            Ok(false)
        }
        DrawCommand::Bar {
            orientation,
            positions,
            values,
            errors,
            style,
            legend,
            ..
        } => {
            let thickness_key = match orientation {
                Orientation::Vertical => "width",
                Orientation::Horizontal => "height",
            };
            let half = kw_f64(style, thickness_key).unwrap_or(0.8) / 2.0;
            let fill = fill_style(style, default_rgb(0));
            let rects: Vec<[(f64, f64); 2]> = positions
                .iter()
                .zip(values)
                .map(|(&p, &v)| oriented(*orientation, [(p - half, 0.0), (p + half, v)]))
                .collect();

            let anno = chart
                .draw_series(rects.iter().map(|&r| Rectangle::new(r, fill)))
                .context("Failed to draw bars")?;
            if let Some(name) = legend {
                anno.label(name.as_str())
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + LEGEND_SAMPLE_WIDTH, y + 5)], fill));
            }

            if let Some(edge) = edge_style(style, scale) {
                chart
                    .draw_series(rects.iter().map(|&r| Rectangle::new(r, edge)))
                    .context("Failed to draw bar edges")?;
            }

            if let Some(errors) = errors {
                let ecolor = kw_str(style, "ecolor").and_then(parse_color).unwrap_or(BLACK);
                let whiskers = positions.iter().zip(values).zip(errors).map(|((&p, &v), &e)| {
                    let [from, to] = oriented(*orientation, [(p, v - e), (p, v + e)]);
                    PathElement::new(vec![from, to], ecolor.stroke_width(scale.stroke(1.0)))
                });
                chart.draw_series(whiskers).context("Failed to draw error bars")?;
            }
            Ok(legend.is_some())
        }
        DrawCommand::Hist {
            datasets,
            bins,
            colors,
            density,
            cumulative,
            orientation,
            stacked,
            style,
            legends,
        } => {
            let outline_only =
                !kw_bool(style, "fill").unwrap_or(true) || kw_str(style, "histtype") == Some("step");
            let mut baseline = vec![0.0; bins.len().saturating_sub(1)];
            let mut any_legend = false;

            for (i, data) in datasets.iter().enumerate() {
                let counts = stats::histogram_counts(data, bins, *density, *cumulative);
                let color = colors
                    .as_ref()
                    .and_then(|c| c.get(i))
                    .and_then(|c| parse_color(c))
                    .unwrap_or_else(|| default_rgb(i));
                let alpha = kw_f64(style, "alpha").unwrap_or(1.0);
                let shape = if outline_only {
                    color.mix(alpha).stroke_width(scale.stroke(kw_f64(style, "linewidth").unwrap_or(1.0)))
                } else {
                    color.mix(alpha).filled()
                };

                let rects: Vec<[(f64, f64); 2]> = bins
                    .windows(2)
                    .zip(&counts)
                    .enumerate()
                    .map(|(b, (edge, &count))| {
                        let bottom = if *stacked { baseline[b] } else { 0.0 };
                        oriented(*orientation, [(edge[0], bottom), (edge[1], bottom + count)])
                    })
                    .collect();
                if *stacked {
                    for (b, count) in counts.iter().enumerate() {
                        baseline[b] += count;
                    }
                }

                let anno = chart
                    .draw_series(rects.iter().map(|&r| Rectangle::new(r, shape)))
                    .context("Failed to draw histogram")?;
                if let Some(Some(name)) = legends.get(i) {
                    anno.label(name.as_str())
                        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + LEGEND_SAMPLE_WIDTH, y + 5)], shape));
                    any_legend = true;
                }

                if let Some(edge) = edge_style(style, scale) {
                    chart
                        .draw_series(rects.iter().map(|&r| Rectangle::new(r, edge)))
                        .context("Failed to draw histogram edges")?;
                }
            }
            Ok(any_legend)
        }
    }
}

/// Swap coordinates for horizontal bars.
fn oriented(orientation: Orientation, rect: [(f64, f64); 2]) -> [(f64, f64); 2] {
    match orientation {
        Orientation::Vertical => rect,
        Orientation::Horizontal => [(rect[0].1, rect[0].0), (rect[1].1, rect[1].0)],
    }
}

/// Expand a polyline into horizontal and vertical segments.
pub fn step_points(points: &[(f64, f64)], step: Step) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for (i, &(x, y)) in points.iter().enumerate() {
        if i == 0 {
            out.push((x, y));
            continue;
        }
        let (px, py) = points[i - 1];
        match step {
            Step::Pre => out.push((px, y)),
            Step::Post => out.push((x, py)),
            Step::Mid => {
                let mid = (px + x) / 2.0;
                out.push((mid, py));
                out.push((mid, y));
            }
        }
        out.push((x, y));
    }
    out
}

fn zorder(command: &DrawCommand) -> f64 {
    let style = match command {
        DrawCommand::Line { style, .. }
        | DrawCommand::FillBetween { style, .. }
        | DrawCommand::Bar { style, .. }
        | DrawCommand::Hist { style, .. } => style,
    };
    kw_f64(style, "zorder").unwrap_or(0.0)
}

// =============================================================================
// Styles
// =============================================================================

const GRID_GREY: RGBColor = RGBColor(207, 207, 207);
const SPINE_GREY: RGBColor = RGBColor(47, 47, 47);
const TEXT_GREY: RGBColor = RGBColor(47, 47, 47);

fn default_rgb(index: usize) -> RGBColor {
    parse_color(default_color(index)).unwrap_or(BLUE)
}

/// Stroke from `color`, `alpha` and `linewidth`.
fn shape_style(style: &Kwargs, fallback: RGBColor, scale: Scale) -> ShapeStyle {
    let color = kw_str(style, "color").and_then(parse_color).unwrap_or(fallback);
    let alpha = kw_f64(style, "alpha").unwrap_or(1.0);
    let width = kw_f64(style, "linewidth").unwrap_or(1.0);
    color.mix(alpha).stroke_width(scale.stroke(width))
}

fn fill_style(style: &Kwargs, fallback: RGBColor) -> ShapeStyle {
    let color = kw_str(style, "color").and_then(parse_color).unwrap_or(fallback);
    let alpha = kw_f64(style, "alpha").unwrap_or(1.0);
    color.mix(alpha).filled()
}

/// Outline for bars and histograms, when a positive edge width is set.
fn edge_style(style: &Kwargs, scale: Scale) -> Option<ShapeStyle> {
    let width = kw_f64(style, "linewidth").filter(|w| *w > 0.0)?;
    let color = kw_str(style, "edgecolor").and_then(parse_color).unwrap_or(BLACK);
    Some(color.stroke_width(scale.stroke(width)))
}

fn spine_visible(ax: &Axes, side: Side) -> bool {
    ax.spines.get(&side).map_or(true, |s| s.visible)
}

fn tick_length(state: &AxisState) -> f64 {
    kw_f64(&state.tick_params, "length").unwrap_or(3.5)
}

fn tick_label_size(state: &AxisState) -> f64 {
    kw_f64(&state.tick_params, "labelsize").unwrap_or(9.0)
}

/// Pixel size of the label area along one axis, or zero when hidden.
fn label_area(state: &AxisState, scale: Scale, factor: f64) -> u32 {
    if !state.visible {
        return 0;
    }
    let mut points = tick_label_size(state) * factor;
    if let Some(label) = &state.label {
        points += font_size(&label.style) * 1.5;
    }
    scale.px(points).round() as u32
}

fn font_size(style: &Kwargs) -> f64 {
    kw_f64(style, "fontsize").unwrap_or(DEFAULT_FONT_SIZE)
}

fn font_desc_sized<'a>(points: f64, scale: Scale) -> FontDesc<'a> {
    ("sans-serif", scale.px(points)).into_font()
}

fn font_desc<'a>(style: &'a Kwargs, scale: Scale) -> FontDesc<'a> {
    let family = kw_str(style, "family").unwrap_or("sans-serif");
    let font = (family, scale.px(font_size(style))).into_font();
    let bold = kw_str(style, "fontweight").is_some_and(|w| w == "bold");
    let italic = kw_str(style, "style").is_some_and(|s| s == "italic" || s == "oblique");
    match (bold, italic) {
        (true, _) => font.style(FontStyle::Bold),
        (false, true) => font.style(FontStyle::Italic),
        _ => font,
    }
}

fn text_style<'a>(style: &'a Kwargs, scale: Scale) -> TextStyle<'a> {
    let color = kw_str(style, "color").and_then(parse_color).unwrap_or(TEXT_GREY);
    font_desc(style, scale).color(&color)
}

/// Usable axis range: finite and non-empty.
fn drawable_range((min, max): (f64, f64)) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        (0.0, 1.0)
    } else if min < max {
        (min, max)
    } else if min > max {
        (max, min)
    } else {
        (min - 1.0, max + 1.0)
    }
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.3}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Parse a color: `#RRGGBB`, `#RGB`, single-letter codes or common names.
pub fn parse_color(color: &str) -> Option<RGBColor> {
    let color = color.trim();
    if let Some(hex) = color.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    match color.to_lowercase().as_str() {
        "w" | "white" => Some(RGBColor(255, 255, 255)),
        "k" | "black" => Some(RGBColor(0, 0, 0)),
        "r" | "red" => Some(RGBColor(255, 0, 0)),
        "g" | "green" => Some(RGBColor(0, 128, 0)),
        "b" | "blue" => Some(RGBColor(0, 0, 255)),
        "y" | "yellow" => Some(RGBColor(255, 255, 0)),
        "c" | "cyan" => Some(RGBColor(0, 255, 255)),
        "m" | "magenta" => Some(RGBColor(255, 0, 255)),
        "orange" => Some(RGBColor(255, 165, 0)),
        "purple" => Some(RGBColor(128, 0, 128)),
        "pink" => Some(RGBColor(255, 192, 203)),
        "brown" => Some(RGBColor(139, 69, 19)),
        "gray" | "grey" => Some(RGBColor(128, 128, 128)),
        "darkgray" | "darkgrey" => Some(RGBColor(64, 64, 64)),
        "lightgray" | "lightgrey" => Some(RGBColor(192, 192, 192)),
        _ => None,
    }
}

fn parse_hex_color(hex: &str) -> Option<RGBColor> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(RGBColor(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(RGBColor(r, g, b))
        }
        _ => None,
    }
}
