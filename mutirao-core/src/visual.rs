//! Pure mapping from collected weight to marker presentation attributes.
//!
//! The map layer draws one circle per filtered action; radius and color are
//! derived here and nowhere else, so every renderer agrees on them.

use crate::model::{ActionId, ActionRecord};

/// Smallest marker radius in pixels.
pub const MIN_RADIUS: f64 = 8.0;
/// Largest marker radius in pixels.
pub const MAX_RADIUS: f64 = 30.0;

// Weight domain the radius interpolates over; weights outside clamp.
const MIN_WEIGHT_KG: f64 = 0.12;
const MAX_WEIGHT_KG: f64 = 6.62;

// Color ramp: single hue, lightness falls as weight rises.
const RAMP_HUE_DEGREES: f64 = 195.0;
const RAMP_SATURATION: f64 = 0.70;
const RAMP_SCALE_KG: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// An sRGB color with 8-bit channels.
pub struct Rgb {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

#[derive(Debug, Clone)]
/// Presentation attributes for one action on the map.
pub struct Marker {
    /// Action this marker belongs to.
    pub id: ActionId,
    /// Marker latitude in decimal degrees.
    pub latitude: f64,
    /// Marker longitude in decimal degrees.
    pub longitude: f64,
    /// Circle radius in pixels.
    pub radius: f64,
    /// Fill color.
    pub color: Rgb,
}

/// Marker radius for a total weight: linear between [`MIN_RADIUS`] and
/// [`MAX_RADIUS`] over the fixed weight domain, clamped at both ends.
/// Monotonic non-decreasing for all non-negative weights.
#[must_use]
pub fn marker_radius(weight_kg: f64) -> f64 {
    if weight_kg <= MIN_WEIGHT_KG {
        return MIN_RADIUS;
    }
    if weight_kg >= MAX_WEIGHT_KG {
        return MAX_RADIUS;
    }
    let position = (weight_kg - MIN_WEIGHT_KG) / (MAX_WEIGHT_KG - MIN_WEIGHT_KG);
    MIN_RADIUS + position * (MAX_RADIUS - MIN_RADIUS)
}

/// Marker fill color for a total weight. Heavier actions get a darker shade
/// of the same hue; the intensity saturates at [`RAMP_SCALE_KG`], so every
/// non-negative weight, including zero and values far beyond the domain,
/// maps to a valid color.
#[must_use]
pub fn marker_color(weight_kg: f64) -> Rgb {
    let intensity = (weight_kg / RAMP_SCALE_KG).clamp(0.0, 1.0);
    // Lightness runs from 72% (near-zero weight) down to 32% (saturated)
    let lightness = (180.0 - intensity * 100.0) / 2.5 / 100.0;
    hsl_to_rgb(RAMP_HUE_DEGREES, RAMP_SATURATION, lightness)
}

/// Bundle the visual attributes for one record.
#[must_use]
pub fn marker_for(record: &ActionRecord) -> Marker {
    Marker {
        id: record.id.clone(),
        latitude: record.latitude,
        longitude: record.longitude,
        radius: marker_radius(record.total_weight_kg),
        color: marker_color(record.total_weight_kg),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "channels are clamped to [0, 1] before scaling to u8"
)]
fn hsl_to_rgb(hue_degrees: f64, saturation: f64, lightness: f64) -> Rgb {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let hue_prime = hue_degrees.rem_euclid(360.0) / 60.0;
    let secondary = chroma * (1.0 - (hue_prime.rem_euclid(2.0) - 1.0).abs());
    let (red_base, green_base, blue_base) = if hue_prime < 1.0 {
        (chroma, secondary, 0.0)
    } else if hue_prime < 2.0 {
        (secondary, chroma, 0.0)
    } else if hue_prime < 3.0 {
        (0.0, chroma, secondary)
    } else if hue_prime < 4.0 {
        (0.0, secondary, chroma)
    } else if hue_prime < 5.0 {
        (secondary, 0.0, chroma)
    } else {
        (chroma, 0.0, secondary)
    };
    let offset = lightness - chroma / 2.0;
    let to_channel = |base: f64| ((base + offset).clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgb {
        red: to_channel(red_base),
        green: to_channel(green_base),
        blue: to_channel(blue_base),
    }
}
