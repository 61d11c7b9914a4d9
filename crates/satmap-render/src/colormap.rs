//! Colormaps for normalised raster values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Viridis sampled at nine evenly spaced stops.
const VIRIDIS: [Color; 9] = [
    Color::opaque(68, 1, 84),
    Color::opaque(71, 44, 122),
    Color::opaque(59, 81, 139),
    Color::opaque(44, 113, 142),
    Color::opaque(33, 144, 141),
    Color::opaque(39, 173, 129),
    Color::opaque(92, 200, 99),
    Color::opaque(170, 220, 50),
    Color::opaque(253, 231, 37),
];

/// Maps a value in `[0, 1]` to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    Grayscale,
    #[default]
    Viridis,
}

impl Colormap {
    /// Color for `t`, clamped to `[0, 1]`.
    pub fn color(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        match self {
            Colormap::Grayscale => {
                let v = (t * 255.0).round() as u8;
                Color::opaque(v, v, v)
            }
            Colormap::Viridis => {
                let scaled = t * (VIRIDIS.len() - 1) as f64;
                let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
                interpolate_color(VIRIDIS[i], VIRIDIS[i + 1], scaled - i as f64)
            }
        }
    }
}

impl FromStr for Colormap {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(Colormap::Grayscale),
            "viridis" => Ok(Colormap::Viridis),
            _ => Err(RenderError::UnknownColormap(s.to_string())),
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colormap::Grayscale => f.write_str("grayscale"),
            Colormap::Viridis => f.write_str("viridis"),
        }
    }
}

/// Linear color interpolation
fn interpolate_color(color1: Color, color2: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}
