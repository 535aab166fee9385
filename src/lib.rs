// Library exports for datachart

pub mod attrs;
pub mod axes;
pub mod config;
pub mod diagnostics;
pub mod draw;
pub mod error;
pub mod ir;
pub mod layout;
pub mod palette;
pub mod render;
pub mod spec;
pub mod stats;
pub mod wrapper;

pub use config::Config;
pub use diagnostics::Diagnostic;
pub use draw::ChartKind;
pub use error::{ChartError, Result};
pub use spec::{ChartAttrs, ChartData, ChartSpec, Charts, GridAxis, Orientation};
pub use wrapper::{bar_chart, chart_wrapper, hist_chart, line_chart, Drawing};

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum OutputFormat {
    #[serde(rename = "png")]
    #[default]
    Png,
    #[serde(rename = "svg")]
    Svg,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default, rename = "type")]
    pub format: OutputFormat,
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    600
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            format: OutputFormat::Png,
        }
    }
}
