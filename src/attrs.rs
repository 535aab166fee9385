//! Style resolution.
//!
//! Each builder turns a series' style overrides into drawing arguments using a
//! fixed table of `(argument, configuration path)` pairs. Resolution order for
//! every pair:
//! 1. The series style, keyed by the configuration path
//! 2. The configuration
//!
//! Pairs that resolve to `null` are left out, so the backend falls back to its
//! own default for them.

use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::{ChartError, Result};
use crate::ir::Kwargs;

/// Where `get_attr_value` looks when the style does not define an attribute.
#[derive(Debug, Clone)]
pub enum Fallback<'a> {
    /// Look the same key up in the configuration.
    Config(&'a Config),
    /// Look the same key up in another mapping.
    Map(&'a Map<String, Value>),
    /// Use this value as is.
    Value(Value),
}

/// Value of `attr` in `style`, or the fallback's value for it.
///
/// A key missing from both the style and a mapping-like fallback is an error.
pub fn get_attr_value(attr: &str, style: &Map<String, Value>, default: Fallback<'_>) -> Result<Value> {
    if let Some(value) = style.get(attr) {
        return Ok(value.clone());
    }
    match default {
        Fallback::Config(config) => config.require(attr).cloned(),
        Fallback::Map(map) => map
            .get(attr)
            .cloned()
            .ok_or_else(|| ChartError::MissingKey(attr.to_string())),
        Fallback::Value(value) => Ok(value),
    }
}

/// Resolve every `(argument, path)` pair, dropping `null` results.
pub fn create_config_dict(
    style: &Map<String, Value>,
    attrs: &[(&str, &str)],
    config: &Config,
) -> Result<Kwargs> {
    let mut kwargs = Kwargs::new();
    for &(key, path) in attrs {
        let value = get_attr_value(path, style, Fallback::Config(config))?;
        if !value.is_null() {
            kwargs.insert(key.to_string(), value);
        }
    }
    Ok(kwargs)
}

pub fn line_style(style: &Map<String, Value>, config: &Config) -> Result<Kwargs> {
    const ATTRS: [(&str, &str); 7] = [
        ("color", "plot.line.color"),
        ("alpha", "plot.line.alpha"),
        ("linewidth", "plot.line.width"),
        ("linestyle", "plot.line.style"),
        ("marker", "plot.line.marker"),
        ("drawstyle", "plot.line.drawstyle"),
        ("zorder", "plot.line.zorder"),
    ];
    create_config_dict(style, &ATTRS, config)
}

/// Bar arguments; horizontal bars take their thickness as `height`.
pub fn bar_style(style: &Map<String, Value>, is_horizontal: bool, config: &Config) -> Result<Kwargs> {
    let attrs = [
        ("color", "plot.bar.color"),
        ("alpha", "plot.bar.alpha"),
        (if is_horizontal { "height" } else { "width" }, "plot.bar.width"),
        ("hatch", "plot.bar.hatch"),
        ("linewidth", "plot.bar.edge.width"),
        ("edgecolor", "plot.bar.edge.color"),
        ("ecolor", "plot.bar.error.color"),
        ("zorder", "plot.bar.zorder"),
    ];
    create_config_dict(style, &attrs, config)
}

pub fn hist_style(style: &Map<String, Value>, config: &Config) -> Result<Kwargs> {
    const ATTRS: [(&str, &str); 9] = [
        ("color", "plot.hist.color"),
        ("alpha", "plot.hist.alpha"),
        ("fill", "plot.hist.fill"),
        ("hatch", "plot.hist.hatch"),
        ("zorder", "plot.hist.zorder"),
        ("histtype", "plot.hist.type"),
        ("align", "plot.hist.align"),
        ("linewidth", "plot.hist.edge.width"),
        ("edgecolor", "plot.hist.edge.color"),
    ];
    create_config_dict(style, &ATTRS, config)
}

pub fn area_style(style: &Map<String, Value>, config: &Config) -> Result<Kwargs> {
    const ATTRS: [(&str, &str); 5] = [
        ("alpha", "plot.area.alpha"),
        ("color", "plot.area.color"),
        ("linewidth", "plot.area.linewidth"),
        ("hatch", "plot.area.hatch"),
        ("zorder", "plot.area.zorder"),
    ];
    create_config_dict(style, &ATTRS, config)
}

pub fn grid_style(style: &Map<String, Value>, config: &Config) -> Result<Kwargs> {
    const ATTRS: [(&str, &str); 5] = [
        ("alpha", "plot.grid.alpha"),
        ("color", "plot.grid.color"),
        ("linewidth", "plot.grid.line.width"),
        ("linestyle", "plot.grid.line.style"),
        ("zorder", "plot.grid.zorder"),
    ];
    create_config_dict(style, &ATTRS, config)
}

/// Legend arguments. The legend belongs to the plot area, not to a series.
pub fn legend_style(config: &Config) -> Result<Kwargs> {
    const ATTRS: [(&str, &str); 6] = [
        ("shadow", "plot.legend.shadow"),
        ("frameon", "plot.legend.frameon"),
        ("fontsize", "plot.legend.fontsize"),
        ("alignment", "plot.legend.alignment"),
        ("title_fontsize", "plot.legend.title.fontsize"),
        ("labelcolor", "plot.legend.label.color"),
    ];
    create_config_dict(&Map::new(), &ATTRS, config)
}

/// Text arguments for a role (`title`, `subtitle`, `xlabel`, ...).
///
/// Each attribute is read from `font.<role>.*`, then from `font.general.*`.
pub fn text_style(text_type: &str, config: &Config) -> Kwargs {
    const ATTRS: [(&str, &str); 5] = [
        ("fontsize", "size"),
        ("fontweight", "weight"),
        ("color", "color"),
        ("style", "style"),
        ("family", "family"),
    ];

    let mut kwargs = Kwargs::new();
    for (key, attr) in ATTRS {
        let value = [text_type, "general"]
            .iter()
            .filter_map(|role| config.get(&format!("font.{role}.{attr}")))
            .find(|v| !v.is_null());
        if let Some(value) = value {
            kwargs.insert(key.to_string(), value.clone());
        }
    }
    kwargs
}
