//! Style configuration.
//!
//! A read-only store keyed by dotted paths such as `plot.line.color`. Every
//! component that needs a default receives a `&Config` explicitly; drawing
//! never mutates it.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::error::{ChartError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    values: BTreeMap<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        let mut values = BTreeMap::new();
        flatten_into(&mut values, "", &default_values());
        Config { values }
    }
}

impl Config {
    /// An empty store, without the built-in defaults.
    pub fn empty() -> Self {
        Config {
            values: BTreeMap::new(),
        }
    }

    /// Build a configuration from a JSON object merged over the defaults.
    ///
    /// Nested objects are flattened, so `{"plot": {"bar": {"width": 0.5}}}` and
    /// `{"plot.bar.width": 0.5}` are equivalent.
    pub fn from_json(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ChartError::InvalidValue {
                key: "config".to_string(),
                expected: "object",
            });
        }
        let mut config = Config::default();
        flatten_into(&mut config.values, "", value);
        Ok(config)
    }

    /// Copy of this configuration with one path overridden.
    pub fn with(&self, path: &str, value: impl Into<Value>) -> Self {
        let mut config = self.clone();
        config.values.insert(path.to_string(), value.into());
        config
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.values.get(path)
    }

    /// Like `get`, but a missing path is an error.
    pub fn require(&self, path: &str) -> Result<&Value> {
        self.get(path)
            .ok_or_else(|| ChartError::MissingKey(path.to_string()))
    }

    pub fn f64(&self, path: &str) -> Result<f64> {
        self.require(path)?
            .as_f64()
            .ok_or_else(|| ChartError::InvalidValue {
                key: path.to_string(),
                expected: "number",
            })
    }

    pub fn bool(&self, path: &str) -> Result<bool> {
        self.require(path)?
            .as_bool()
            .ok_or_else(|| ChartError::InvalidValue {
                key: path.to_string(),
                expected: "boolean",
            })
    }

    pub fn str(&self, path: &str) -> Result<&str> {
        self.require(path)?
            .as_str()
            .ok_or_else(|| ChartError::InvalidValue {
                key: path.to_string(),
                expected: "string",
            })
    }
}

fn flatten_into(out: &mut BTreeMap<String, Value>, prefix: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(out, &path, child);
            }
        }
        leaf => {
            out.insert(prefix.to_string(), leaf.clone());
        }
    }
}

fn default_values() -> Value {
    json!({
        "font": {
            "general": {
                "size": 10,
                "weight": "normal",
                "color": "#2f2f2f",
                "style": "normal",
                "family": "sans-serif"
            },
            "title": { "size": 18, "weight": "bold" },
            "subtitle": { "size": 14 },
            "xlabel": { "size": 12 },
            "ylabel": { "size": 12 }
        },
        "axes": {
            "spines": {
                "width": 0.8,
                "zorder": 0,
                "top": { "visible": false },
                "right": { "visible": false },
                "bottom": { "visible": true },
                "left": { "visible": true }
            },
            "ticks": {
                "length": 3.5,
                "label": { "size": 9 }
            }
        },
        "color": {
            "general": {
                "singular": "tab10",
                "multiple": "tab10"
            }
        },
        "plot": {
            "line": {
                "color": null,
                "alpha": 1.0,
                "width": 1.5,
                "style": "-",
                "marker": null,
                "drawstyle": "default",
                "zorder": 3
            },
            "area": {
                "alpha": 0.2,
                "color": null,
                "linewidth": 0,
                "hatch": null,
                "zorder": 2
            },
            "bar": {
                "color": null,
                "alpha": 1.0,
                "width": 0.8,
                "hatch": null,
                "zorder": 3,
                "edge": { "width": 0, "color": null },
                "error": { "color": "#3f3f3f" }
            },
            "hist": {
                "color": null,
                "alpha": 0.9,
                "fill": true,
                "hatch": null,
                "zorder": 3,
                "type": "bar",
                "align": "mid",
                "edge": { "width": 0, "color": null }
            },
            "grid": {
                "alpha": 0.5,
                "color": "#cfcfcf",
                "zorder": 0,
                "line": { "width": 0.5, "style": ":" }
            },
            "legend": {
                "shadow": false,
                "frameon": false,
                "fontsize": 10,
                "alignment": "left",
                "title": { "fontsize": 11 },
                "label": { "color": "#2f2f2f" }
            }
        }
    })
}
