//! Colour primitives for the scheme generator
//!
//! Colours are normalized RGB triples. Hue is measured in turns (0..1).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized RGB colour, every channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// HSL representation; hue in turns, saturation and lightness in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// Text format used for swatch labels and clipboard output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Hex,
    Rgb,
    Hsl,
}

/// Wrap a value into [0, 1), handling negative input
pub fn wrap_unit(value: f64) -> f64 {
    let wrapped = value.rem_euclid(1.0);
    // rem_euclid of a tiny negative value rounds up to exactly 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Clamp into [0, 1]
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Build from 8-bit channels
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::new(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Round to 8-bit channels
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |v: f64| (clamp_unit(v) * 255.0).round() as u8;
        [q(self.red), q(self.green), q(self.blue)]
    }

    /// Linear interpolation between two colours
    pub fn lerp(self, other: Color, t: f64) -> Color {
        Color::new(
            self.red + (other.red - self.red) * t,
            self.green + (other.green - self.green) * t,
            self.blue + (other.blue - self.blue) * t,
        )
    }

    pub fn to_hsl(self) -> Hsl {
        let max = self.red.max(self.green).max(self.blue);
        let min = self.red.min(self.green).min(self.blue);
        let lightness = (max + min) / 2.0;
        let delta = max - min;

        if delta <= f64::EPSILON {
            return Hsl {
                hue: 0.0,
                saturation: 0.0,
                lightness,
            };
        }

        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let hue = if max == self.red {
            (self.green - self.blue) / delta
        } else if max == self.green {
            (self.blue - self.red) / delta + 2.0
        } else {
            (self.red - self.green) / delta + 4.0
        };

        Hsl {
            hue: wrap_unit(hue / 6.0),
            saturation,
            lightness,
        }
    }

    /// Relative luminance (WCAG 2.1)
    pub fn relative_luminance(self) -> f64 {
        let linear = |c: f64| {
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * linear(self.red) + 0.7152 * linear(self.green) + 0.0722 * linear(self.blue)
    }

    /// Black or white, whichever reads better on top of this colour
    pub fn contrasting(self) -> Color {
        if self.relative_luminance() > 0.179 {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Format as text in the requested notation
    pub fn format(self, format: ColorFormat) -> String {
        match format {
            ColorFormat::Hex => self.to_hex(),
            ColorFormat::Rgb => {
                let [r, g, b] = self.to_rgb8();
                format!("rgb({}, {}, {})", r, g, b)
            }
            ColorFormat::Hsl => {
                let hsl = self.to_hsl();
                format!(
                    "hsl({:.0}, {:.0}%, {:.0}%)",
                    hsl.hue * 360.0,
                    hsl.saturation * 100.0,
                    hsl.lightness * 100.0
                )
            }
        }
    }

    /// Parse `#rgb`, `#rrggbb` (hash optional), `rgb(r, g, b)` or `hsl(h, s%, l%)`
    pub fn parse(text: &str) -> Option<Color> {
        let text = text.trim();
        let lower = text.to_ascii_lowercase();

        if let Some(args) = function_args(&lower, "rgb") {
            let [r, g, b] = parse_triple(args)?;
            if [r, g, b].iter().any(|v| !(0.0..=255.0).contains(v)) {
                return None;
            }
            return Some(Color::new(r / 255.0, g / 255.0, b / 255.0));
        }

        if let Some(args) = function_args(&lower, "hsl") {
            let [h, s, l] = parse_triple(args)?;
            if !(0.0..=100.0).contains(&s) || !(0.0..=100.0).contains(&l) {
                return None;
            }
            return Some(
                Hsl {
                    hue: wrap_unit(h / 360.0),
                    saturation: s / 100.0,
                    lightness: l / 100.0,
                }
                .to_rgb(),
            );
        }

        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Color::from_rgb8(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Color::from_rgb8(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for ratatui::style::Color {
    fn from(color: Color) -> Self {
        let [r, g, b] = color.to_rgb8();
        ratatui::style::Color::Rgb(r, g, b)
    }
}

impl Hsl {
    pub fn to_rgb(self) -> Color {
        if self.saturation <= 0.0 {
            return Color::new(self.lightness, self.lightness, self.lightness);
        }

        let q = if self.lightness < 0.5 {
            self.lightness * (1.0 + self.saturation)
        } else {
            self.lightness + self.saturation - self.lightness * self.saturation
        };
        let p = 2.0 * self.lightness - q;

        Color::new(
            hue_channel(p, q, self.hue + 1.0 / 3.0),
            hue_channel(p, q, self.hue),
            hue_channel(p, q, self.hue - 1.0 / 3.0),
        )
    }
}

fn hue_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = wrap_unit(t);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn function_args<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    text.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_triple(args: &str) -> Option<[f64; 3]> {
    let mut values = args
        .split(',')
        .map(|part| part.trim().trim_end_matches('%').trim().parse::<f64>());
    let triple = [
        values.next()?.ok()?,
        values.next()?.ok()?,
        values.next()?.ok()?,
    ];
    if values.next().is_some() {
        return None;
    }
    Some(triple)
}
