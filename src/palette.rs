//! Color cycles and stable series hashing.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::ir::Kwargs;

const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

const PASTEL: [&str; 10] = [
    "#a1c9f4", "#ffb482", "#8de5a1", "#ff9f9b", "#d0bbff",
    "#debb9b", "#fab0e4", "#cfcfcf", "#fffea3", "#b9f2f0",
];

const DARK: [&str; 10] = [
    "#001c7f", "#b1400d", "#12711c", "#8c0800", "#591e71",
    "#592f0d", "#a23582", "#3c3c3c", "#b8850a", "#006374",
];

const GREYS: [&str; 6] = ["#252525", "#525252", "#737373", "#969696", "#bdbdbd", "#d9d9d9"];

fn named_palette(name: &str) -> Option<&'static [&'static str]> {
    match name.to_lowercase().as_str() {
        "tab10" | "default" => Some(&TAB10),
        "pastel" => Some(&PASTEL),
        "dark" => Some(&DARK),
        "greys" | "grays" => Some(&GREYS),
        _ => None,
    }
}

/// Color `index` of the default palette, for series drawn without a color.
pub fn default_color(index: usize) -> &'static str {
    TAB10[index % TAB10.len()]
}

/// A fixed-size set of colors handed out to series.
///
/// Distinct keys receive colors round-robin in the order they are first seen;
/// a key seen again gets the color it was given before.
#[derive(Debug, Clone)]
pub struct ColorCycle {
    colors: Vec<String>,
    assigned: HashMap<u64, usize>,
}

impl ColorCycle {
    /// `size` colors taken from the palette `name`, repeating it if needed.
    /// A name that is not a known palette is used as a single color.
    pub fn new(name: &str, size: usize) -> Self {
        let size = size.max(1);
        let colors = match named_palette(name) {
            Some(palette) => palette.iter().cycle().take(size).map(|c| c.to_string()).collect(),
            None => vec![name.to_string(); size],
        };
        ColorCycle {
            colors,
            assigned: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color_for(&mut self, key: u64) -> &str {
        let next = self.assigned.len() % self.colors.len();
        let idx = *self.assigned.entry(key).or_insert(next);
        &self.colors[idx]
    }

    /// The color as drawing arguments, ready to be merged under a series style.
    pub fn kwargs_for(&mut self, key: u64) -> Kwargs {
        let mut kwargs = Kwargs::new();
        kwargs.insert("color".to_string(), Value::from(self.color_for(key)));
        kwargs
    }
}

/// Order-independent hash of a value's serialized content.
///
/// Map keys are serialized sorted, so two values differing only in key order
/// hash the same. The digest does not depend on the process or platform.
pub fn stable_hash<T: Serialize>(value: &T) -> Result<u64> {
    let canonical = serde_json::to_string(&serde_json::to_value(value)?)?;
    let digest = Sha256::digest(canonical.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    Ok(u64::from_be_bytes(bytes))
}
