//! Advisory diagnostics.
//!
//! Conditions that change what gets drawn without aborting the draw call are
//! returned as values and logged at `warn` level when they are raised.

use std::fmt;

use crate::ir::Axis;

/// A non-fatal condition detected while configuring or drawing a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A drawing option is set but the chart kind ignores it.
    UnsupportedOption { kind: &'static str, key: &'static str },
    /// Tick labels were given without tick positions; the axis is left untouched.
    TickLabelsWithoutTicks { axis: Axis },
    /// Tick positions and labels differ in length; labels are discarded.
    TickLengthMismatch { axis: Axis, ticks: usize, labels: usize },
    /// Both the error band and the area under the curve are drawn for a series.
    ErrorBandWithArea { index: usize },
}

impl Diagnostic {
    /// Log the diagnostic and hand it back, so call sites can `push(raise(..))`.
    pub fn raise(self) -> Self {
        log::warn!("{}", self);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedOption { kind, key } => write!(
                f,
                "draw option `{key}` is present but is not supported by {kind} charts; ignoring it"
            ),
            Diagnostic::TickLabelsWithoutTicks { axis } => write!(
                f,
                "`{ax}ticklabels` is specified but `{ax}ticks` is not; provide the `{ax}ticks` values",
                ax = axis.name()
            ),
            Diagnostic::TickLengthMismatch { axis, ticks, labels } => write!(
                f,
                "`{ax}ticks` ({ticks}) and `{ax}ticklabels` ({labels}) have different lengths; ignoring `{ax}ticklabels`",
                ax = axis.name()
            ),
            Diagnostic::ErrorBandWithArea { index } => write!(
                f,
                "chart {index}: both the error area and the area under the curve will be drawn; only one of `yerr` and `area` should be set"
            ),
        }
    }
}
