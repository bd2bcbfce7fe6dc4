use serde::{Deserialize, Serialize};

use crate::{Color, Geometry, Point, Result};

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// A stateless transformation rule. Steps carry no duration; the owning
/// [`crate::Timeline`] decides how far into a step the current instant is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Moves every vertex by `(dx, dy)`.
    Translate { dx: f64, dy: f64 },
    /// Rotates around the centroid of the incoming geometry.
    Rotate { degrees: f64 },
    /// Scales radially from the centroid of the incoming geometry.
    Scale { factor: f64 },
    /// Fades toward a gray level.
    Recolor { brightness: u8 },
}

impl Step {
    /// Short label used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Translate { .. } => "translate",
            Self::Rotate { .. } => "rotate",
            Self::Scale { .. } => "scale",
            Self::Recolor { .. } => "recolor",
        }
    }

    /// Applies the step at `progress` (clamped to `[0, 1]`) and returns a new
    /// geometry/color pair. The inputs are never modified.
    pub fn apply(&self, geometry: &Geometry, color: Color, progress: f64) -> Result<(Geometry, Color)> {
        let t = progress.clamp(0.0, 1.0);

        match *self {
            Self::Translate { dx, dy } => {
                let (ox, oy) = (dx * t, dy * t);
                Ok((geometry.map(|p| Point::new(p.x + ox, p.y + oy)), color))
            }
            Self::Rotate { degrees } => {
                let pivot = geometry.centroid()?;
                let (sin, cos) = (degrees * t).to_radians().sin_cos();
                let rotated = geometry.map(|p| {
                    let (rx, ry) = (p.x - pivot.x, p.y - pivot.y);
                    Point::new(pivot.x + rx * cos - ry * sin, pivot.y + rx * sin + ry * cos)
                });
                Ok((rotated, color))
            }
            Self::Scale { factor } => {
                let pivot = geometry.centroid()?;
                let s = lerp(1.0, factor, t);
                let scaled = geometry.map(|p| {
                    Point::new(pivot.x + (p.x - pivot.x) * s, pivot.y + (p.y - pivot.y) * s)
                });
                Ok((scaled, color))
            }
            Self::Recolor { brightness } => {
                let current = f64::from(color.brightness());
                let level = lerp(current, f64::from(brightness), t).round().clamp(0.0, 255.0) as u8;
                Ok((geometry.clone(), Color::gray(level)))
            }
        }
    }
}
