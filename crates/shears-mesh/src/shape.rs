//! Cloth outlines.
//!
//! A shape is a pure function from a grid coordinate to a [`Region`].
//! The rectangular, circular and arbitrary-polygon cloths are all the
//! same grid builder driven by a different classifier.

use serde::{Deserialize, Serialize};
use shears_types::{ShearsError, ShearsResult};

use crate::particle::Region;

/// Classifies a grid point against a cloth outline.
///
/// Must be deterministic: the same inputs always give the same region.
pub trait ShapeClassifier {
    /// `col`/`row` are grid coordinates; `x`/`y` the particle's planar
    /// position before noise.
    fn classify(&self, col: usize, row: usize, x: f32, y: f32) -> Region;
}

impl<F> ShapeClassifier for F
where
    F: Fn(usize, usize, f32, f32) -> Region,
{
    fn classify(&self, col: usize, row: usize, x: f32, y: f32) -> Region {
        self(col, row, x, y)
    }
}

/// Serializable outline descriptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    /// Plain rectangular cloth; every particle is interior.
    #[default]
    Rectangle,

    /// A circle drawn on a rectangular cloth. Particles within `band` of
    /// the circle are outline particles; the rest stay interior.
    Circle {
        center: [f32; 2],
        radius: f32,
        band: f32,
    },

    /// An arbitrary closed polygon. Particles within `band` of an edge are
    /// outline particles, particles inside are interior, particles outside
    /// are exterior (left unconstrained).
    Polygon { vertices: Vec<[f32; 2]>, band: f32 },
}

impl ShapeSpec {
    /// Checks the outline parameters.
    pub fn validate(&self) -> ShearsResult<()> {
        match self {
            ShapeSpec::Rectangle => Ok(()),
            ShapeSpec::Circle {
                center,
                radius,
                band,
            } => {
                if !(center[0].is_finite() && center[1].is_finite()) {
                    return Err(ShearsError::InvalidConfig(
                        "circle center must be finite".into(),
                    ));
                }
                if !(*radius > 0.0 && radius.is_finite()) {
                    return Err(ShearsError::InvalidConfig(format!(
                        "circle radius must be positive, got {}",
                        radius
                    )));
                }
                check_band(*band)
            }
            ShapeSpec::Polygon { vertices, band } => {
                if vertices.len() < 3 {
                    return Err(ShearsError::InvalidConfig(format!(
                        "polygon needs at least 3 vertices, got {}",
                        vertices.len()
                    )));
                }
                if vertices
                    .iter()
                    .any(|v| !(v[0].is_finite() && v[1].is_finite()))
                {
                    return Err(ShearsError::InvalidConfig(
                        "polygon vertices must be finite".into(),
                    ));
                }
                check_band(*band)
            }
        }
    }
}

fn check_band(band: f32) -> ShearsResult<()> {
    if band >= 0.0 && band.is_finite() {
        Ok(())
    } else {
        Err(ShearsError::InvalidConfig(format!(
            "outline band must be non-negative, got {}",
            band
        )))
    }
}

impl ShapeClassifier for ShapeSpec {
    fn classify(&self, _col: usize, _row: usize, x: f32, y: f32) -> Region {
        match self {
            ShapeSpec::Rectangle => Region::Interior,
            ShapeSpec::Circle {
                center,
                radius,
                band,
            } => {
                let d = ((x - center[0]).powi(2) + (y - center[1]).powi(2)).sqrt();
                if (d - radius).abs() <= *band {
                    Region::Boundary
                } else {
                    Region::Interior
                }
            }
            ShapeSpec::Polygon { vertices, band } => {
                if distance_to_outline(vertices, x, y) <= *band {
                    Region::Boundary
                } else if contains(vertices, x, y) {
                    Region::Interior
                } else {
                    Region::Exterior
                }
            }
        }
    }
}

/// Even-odd ray casting point-in-polygon test.
pub fn contains(vertices: &[[f32; 2]], x: f32, y: f32) -> bool {
    let n = vertices.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let [xi, yi] = vertices[i];
        let [xj, yj] = vertices[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Distance from (x, y) to the closest edge of a closed polygon.
pub fn distance_to_outline(vertices: &[[f32; 2]], x: f32, y: f32) -> f32 {
    let n = vertices.len();
    (0..n)
        .map(|i| distance_to_segment(vertices[i], vertices[(i + 1) % n], x, y))
        .fold(f32::INFINITY, f32::min)
}

fn distance_to_segment(a: [f32; 2], b: [f32; 2], x: f32, y: f32) -> f32 {
    let (abx, aby) = (b[0] - a[0], b[1] - a[1]);
    let (apx, apy) = (x - a[0], y - a[1]);
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 {
        ((apx * abx + apy * aby) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a[0] + t * abx - x, a[1] + t * aby - y);
    (cx * cx + cy * cy).sqrt()
}
