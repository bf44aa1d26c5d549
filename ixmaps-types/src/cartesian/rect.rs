use serde::{Deserialize, Serialize};

use crate::geometry::Position;

/// Axis-aligned rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum x (or longitude).
    pub x_min: f64,
    /// Minimum y (or latitude).
    pub y_min: f64,
    /// Maximum x (or longitude).
    pub x_max: f64,
    /// Maximum y (or latitude).
    pub y_max: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Center point of the rectangle as `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Bounding rectangle of the positions. Returns `None` for an empty iterator.
    pub fn from_positions<'a>(mut positions: impl Iterator<Item = &'a Position>) -> Option<Self> {
        let first = positions.next()?;
        let mut rect = Self::new(first.x, first.y, first.x, first.y);

        for p in positions {
            if rect.x_min > p.x {
                rect.x_min = p.x;
            }
            if rect.y_min > p.y {
                rect.y_min = p.y;
            }
            if rect.x_max < p.x {
                rect.x_max = p.x;
            }
            if rect.y_max < p.y {
                rect.y_max = p.y;
            }
        }

        Some(rect)
    }

    /// Returns the rectangle as `[x_min, y_min, x_max, y_max]`, the GeoJSON `bbox` order.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }
}
