//! In-memory figure model: plot areas, their axis state and the drawing
//! commands recorded on them. Rendering turns this model into pixels.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::layout::SubplotLayout;
use crate::spec::{GridAxis, Orientation};
use crate::stats;

/// Resolved drawing arguments: argument name -> value.
pub type Kwargs = BTreeMap<String, Value>;

pub fn kw_f64(kwargs: &Kwargs, key: &str) -> Option<f64> {
    kwargs.get(key).and_then(Value::as_f64)
}

pub fn kw_str<'a>(kwargs: &'a Kwargs, key: &str) -> Option<&'a str> {
    kwargs.get(key).and_then(Value::as_str)
}

pub fn kw_bool(kwargs: &Kwargs, key: &str) -> Option<bool> {
    kwargs.get(key).and_then(Value::as_bool)
}

// =============================================================================
// Axes building blocks
// =============================================================================

/// Axis of a plot area. Selects which `AxisState` a setter operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub fn name(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spine {
    pub linewidth: f64,
    pub zorder: f64,
    pub visible: bool,
}

impl Default for Spine {
    fn default() -> Self {
        Spine {
            linewidth: 0.8,
            zorder: 0.0,
            visible: true,
        }
    }
}

/// A piece of text with its resolved text style.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub style: Kwargs,
}

impl Text {
    pub fn new(content: impl Into<String>, style: Kwargs) -> Self {
        Text {
            content: content.into(),
            style,
        }
    }
}

/// Step interpolation for filled areas, taken from a `steps-*` draw style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Pre,
    Mid,
    Post,
}

impl Step {
    pub fn from_drawstyle(drawstyle: &str) -> Option<Step> {
        match drawstyle.strip_prefix("steps-")? {
            "pre" => Some(Step::Pre),
            "mid" => Some(Step::Mid),
            "post" => Some(Step::Post),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisState {
    pub visible: bool,
    pub tick_params: Kwargs,
    pub ticks: Option<Vec<f64>>,
    pub ticklabels: Option<Vec<String>>,
    pub label_rotation: f64,
    /// Explicit (min, max) bounds; `None` sides are auto-computed.
    pub limits: (Option<f64>, Option<f64>),
    pub label: Option<Text>,
}

impl Default for AxisState {
    fn default() -> Self {
        AxisState {
            visible: true,
            tick_params: Kwargs::new(),
            ticks: None,
            ticklabels: None,
            label_rotation: 0.0,
            limits: (None, None),
            label: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub axis: GridAxis,
    pub style: Kwargs,
}

// =============================================================================
// Drawing commands
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        x: Vec<f64>,
        y: Vec<f64>,
        style: Kwargs,
        legend: Option<String>,
    },
    FillBetween {
        x: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        step: Option<Step>,
        style: Kwargs,
    },
    Bar {
        orientation: Orientation,
        positions: Vec<f64>,
        values: Vec<f64>,
        errors: Option<Vec<f64>>,
        labels: Vec<String>,
        style: Kwargs,
        legend: Option<String>,
    },
    Hist {
        datasets: Vec<Vec<f64>>,
        bins: Vec<f64>,
        /// One color per dataset, or `None` for the backend's default palette.
        colors: Option<Vec<String>>,
        density: bool,
        cumulative: bool,
        orientation: Orientation,
        stacked: bool,
        style: Kwargs,
        legends: Vec<Option<String>>,
    },
}

impl DrawCommand {
    /// Values this command occupies along `axis`, used for auto limits.
    fn extent(&self, axis: Axis) -> Vec<f64> {
        match self {
            DrawCommand::Line { x, y, .. } => match axis {
                Axis::X => x.clone(),
                Axis::Y => y.clone(),
            },
            DrawCommand::FillBetween { x, lower, upper, .. } => match axis {
                Axis::X => x.clone(),
                Axis::Y => lower.iter().chain(upper.iter()).copied().collect(),
            },
            DrawCommand::Bar {
                orientation,
                positions,
                values,
                errors,
                style,
                ..
            } => {
                let thickness_key = match orientation {
                    Orientation::Vertical => "width",
                    Orientation::Horizontal => "height",
                };
                let half = kw_f64(style, thickness_key).unwrap_or(0.8) / 2.0;
                if orientation.value_axis() == axis {
                    let mut out = vec![0.0];
                    for (i, &v) in values.iter().enumerate() {
                        let err = errors.as_ref().and_then(|e| e.get(i)).copied().unwrap_or(0.0);
                        out.push(v - err);
                        out.push(v + err);
                    }
                    out
                } else {
                    positions.iter().flat_map(|&p| [p - half, p + half]).collect()
                }
            }
            DrawCommand::Hist {
                datasets,
                bins,
                density,
                cumulative,
                orientation,
                stacked,
                ..
            } => {
                if orientation.value_axis() != axis {
                    return bins.clone();
                }
                let counts: Vec<Vec<f64>> = datasets
                    .iter()
                    .map(|d| stats::histogram_counts(d, bins, *density, *cumulative))
                    .collect();
                let mut top = 0.0f64;
                for bin in 0..bins.len().saturating_sub(1) {
                    let column = counts.iter().map(|c| c[bin]);
                    let height = if *stacked {
                        column.sum()
                    } else {
                        column.fold(0.0, f64::max)
                    };
                    top = top.max(height);
                }
                vec![0.0, top]
            }
        }
    }
}

// =============================================================================
// Axes & Figure
// =============================================================================

/// One plot area of a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub visible: bool,
    pub spines: BTreeMap<Side, Spine>,
    pub xaxis: AxisState,
    pub yaxis: AxisState,
    pub title: Option<Text>,
    pub grid: Option<Grid>,
    pub legend: Option<Kwargs>,
    pub commands: Vec<DrawCommand>,
}

impl Default for Axes {
    fn default() -> Self {
        Axes {
            visible: true,
            spines: Side::ALL.iter().map(|&s| (s, Spine::default())).collect(),
            xaxis: AxisState::default(),
            yaxis: AxisState::default(),
            title: None,
            grid: None,
            legend: None,
            commands: Vec::new(),
        }
    }
}

impl Axes {
    pub fn axis(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::X => &self.xaxis,
            Axis::Y => &self.yaxis,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisState {
        match axis {
            Axis::X => &mut self.xaxis,
            Axis::Y => &mut self.yaxis,
        }
    }

    pub fn set_title(&mut self, text: Text) {
        self.title = Some(text);
    }

    pub fn set_xlabel(&mut self, text: Text) {
        self.xaxis.label = Some(text);
    }

    pub fn set_ylabel(&mut self, text: Text) {
        self.yaxis.label = Some(text);
    }

    pub fn set_ticks(&mut self, axis: Axis, ticks: Vec<f64>, labels: Option<Vec<String>>) {
        let state = self.axis_mut(axis);
        state.ticks = Some(ticks);
        state.ticklabels = labels;
    }

    /// Set explicit bounds; a `None` side keeps its current setting.
    pub fn set_lim(&mut self, axis: Axis, min: Option<f64>, max: Option<f64>) {
        let limits = &mut self.axis_mut(axis).limits;
        if min.is_some() {
            limits.0 = min;
        }
        if max.is_some() {
            limits.1 = max;
        }
    }

    /// Current bounds: explicit sides as set, the rest derived from the drawn data.
    pub fn get_lim(&self, axis: Axis) -> (f64, f64) {
        let (auto_min, auto_max) = self.auto_lim(axis);
        let (min, max) = self.axis(axis).limits;
        (min.unwrap_or(auto_min), max.unwrap_or(auto_max))
    }

    fn auto_lim(&self, axis: Axis) -> (f64, f64) {
        let values: Vec<f64> = self
            .commands
            .iter()
            .flat_map(|c| c.extent(axis))
            .filter(|v| v.is_finite())
            .collect();
        match stats::min_max(&values) {
            Some((min, max)) => pad_range(min, max),
            None => (0.0, 1.0),
        }
    }

    pub fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn set_grid(&mut self, axis: GridAxis, style: Kwargs) {
        self.grid = Some(Grid { axis, style });
    }
}

/// Text placed in figure coordinates (0..1 on both axes).
#[derive(Debug, Clone, PartialEq)]
pub struct FigureText {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub text: Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub layout: SubplotLayout,
    /// Size in inches.
    pub figsize: (f64, f64),
    pub sharex: bool,
    pub sharey: bool,
    /// Row-major, `layout.rows * layout.columns` entries.
    pub axes: Vec<Axes>,
    pub suptitle: Option<Text>,
    pub texts: Vec<FigureText>,
}

impl Figure {
    pub fn new(layout: SubplotLayout, figsize: (f64, f64), sharex: bool, sharey: bool) -> Self {
        log::debug!(
            "creating figure with {}x{} plot areas",
            layout.rows,
            layout.columns
        );
        Figure {
            layout,
            figsize,
            sharex,
            sharey,
            axes: vec![Axes::default(); layout.cells()],
            suptitle: None,
            texts: Vec::new(),
        }
    }

    pub fn text(&mut self, x: f64, y: f64, rotation: f64, text: Text) {
        self.texts.push(FigureText { x, y, rotation, text });
    }
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        (min - 1.0, max + 1.0)
    } else {
        let padding = (max - min) * 0.05;
        (min - padding, max + padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x: Vec<f64>, y: Vec<f64>) -> DrawCommand {
        DrawCommand::Line {
            x,
            y,
            style: Kwargs::new(),
            legend: None,
        }
    }

    #[test]
    fn test_step_from_drawstyle() {
        assert_eq!(Step::from_drawstyle("steps-pre"), Some(Step::Pre));
        assert_eq!(Step::from_drawstyle("steps-post"), Some(Step::Post));
        assert_eq!(Step::from_drawstyle("default"), None);
        assert_eq!(Step::from_drawstyle("steps"), None);
    }

    #[test]
    fn test_get_lim_empty_axes() {
        let ax = Axes::default();
        assert_eq!(ax.get_lim(Axis::X), (0.0, 1.0));
    }

    #[test]
    fn test_get_lim_from_data_with_padding() {
        let mut ax = Axes::default();
        ax.draw(line(vec![0.0, 10.0], vec![5.0, 5.0]));
        assert_eq!(ax.get_lim(Axis::X), (-0.5, 10.5));
        assert_eq!(ax.get_lim(Axis::Y), (4.0, 6.0));
    }

    #[test]
    fn test_set_lim_keeps_other_side() {
        let mut ax = Axes::default();
        ax.draw(line(vec![0.0, 10.0], vec![1.0, 3.0]));
        ax.set_lim(Axis::Y, Some(0.0), None);
        ax.set_lim(Axis::Y, None, Some(8.0));
        assert_eq!(ax.axis(Axis::Y).limits, (Some(0.0), Some(8.0)));
        assert_eq!(ax.get_lim(Axis::Y), (0.0, 8.0));
    }

    #[test]
    fn test_bar_extent_includes_zero_and_errors() {
        let mut ax = Axes::default();
        let mut style = Kwargs::new();
        style.insert("width".to_string(), Value::from(0.5));
        ax.draw(DrawCommand::Bar {
            orientation: Orientation::Vertical,
            positions: vec![0.0, 1.0],
            values: vec![2.0, 4.0],
            errors: Some(vec![1.0, 1.0]),
            labels: vec!["a".into(), "b".into()],
            style,
            legend: None,
        });
        let (ymin, ymax) = ax.get_lim(Axis::Y);
        assert!(ymin < 0.0);
        assert!(ymax > 5.0);
        let (xmin, xmax) = ax.get_lim(Axis::X);
        assert!(xmin < -0.25 && xmax > 1.25);
    }

    #[test]
    fn test_figure_creates_grid_of_axes() {
        let fig = Figure::new(SubplotLayout { rows: 2, columns: 3 }, (10.0, 6.0), false, false);
        assert_eq!(fig.axes.len(), 6);
        assert!(fig.axes.iter().all(|a| a.visible));
    }
}
