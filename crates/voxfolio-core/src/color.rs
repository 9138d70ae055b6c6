use serde::{Deserialize, Serialize};

use crate::constants::{LIGHTNESS_LIFT, LIGHTNESS_SCALE, SATURATION_SCALE};
use crate::error::CoreError;

/// Linear RGB color, one f32 per channel, nominally in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Hue, saturation, lightness triple. All components in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// True when every channel is exactly zero.
    pub fn is_black(self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    /// Component-wise multiply by a scalar.
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to HSL.
    pub fn to_hsl(self) -> Hsl {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let lightness = (min + max) / 2.0;

        if min == max {
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: lightness,
            };
        }

        let delta = max - min;
        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let hue = if max == self.r {
            (self.g - self.b) / delta + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };

        Hsl {
            h: hue / 6.0,
            s: saturation,
            l: lightness,
        }
    }

    /// Build from HSL. Hue wraps, saturation and lightness clamp to [0, 1].
    pub fn from_hsl(hsl: Hsl) -> Self {
        let h = hsl.h.rem_euclid(1.0);
        let s = hsl.s.clamp(0.0, 1.0);
        let l = hsl.l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l);
        }

        let high = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let low = 2.0 * l - high;

        Self::new(
            hue_to_channel(low, high, h + 1.0 / 3.0),
            hue_to_channel(low, high, h),
            hue_to_channel(low, high, h - 1.0 / 3.0),
        )
    }

    /// Pack into 0xRRGGBB. Channels are clamped to [0, 1] and rounded.
    pub fn to_packed(self) -> u32 {
        let r = quantize(self.r);
        let g = quantize(self.g);
        let b = quantize(self.b);
        (r << 16) | (g << 8) | b
    }

    /// Unpack from 0xRRGGBB. Bits above 24 are ignored.
    pub fn from_packed(packed: u32) -> Self {
        let r = ((packed >> 16) & 0xFF) as f32 / 255.0;
        let g = ((packed >> 8) & 0xFF) as f32 / 255.0;
        let b = (packed & 0xFF) as f32 / 255.0;
        Self::new(r, g, b)
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.to_packed())
    }

    /// Parse `#rrggbb`, `0xrrggbb`, or bare `rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self, CoreError> {
        let trimmed = hex.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 6 {
            return Err(CoreError::InvalidHexColor(hex.to_string()));
        }
        let packed = u32::from_str_radix(digits, 16)
            .map_err(|_| CoreError::InvalidHexColor(hex.to_string()))?;
        Ok(Self::from_packed(packed))
    }
}

/// Remap a non-emissive base color before occlusion darkening:
/// saturation × 0.8, lightness × 0.8 + 0.2.
pub fn shade_base_color(base: Rgb) -> Rgb {
    let mut hsl = base.to_hsl();
    hsl.s *= SATURATION_SCALE;
    hsl.l = hsl.l * LIGHTNESS_SCALE + LIGHTNESS_LIFT;
    Rgb::from_hsl(hsl)
}

fn quantize(channel: f32) -> u32 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u32
}

fn hue_to_channel(low: f32, high: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return low + (high - low) * 6.0 * t;
    }
    if t < 0.5 {
        return high;
    }
    if t < 2.0 / 3.0 {
        return low + (high - low) * 6.0 * (2.0 / 3.0 - t);
    }
    low
}
