//! Document model: shapes and the ordered drawing state that owns them.
//!
//! `DrawingState` is the single source of truth for what is on the canvas.
//! Input handlers append to it, the clear control empties it, and the renderer
//! reads it every frame. Callers outside the engine only ever see clones
//! produced by [`DrawingState::snapshot`].

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::consts::{SHAPE_PALETTE, SHAPE_RADII};
use crate::mapper::Point;

/// Tolerance used when comparing shape coordinates for equality.
const FLOAT_COMPARISON_EPSILON: f64 = 1e-9;

/// A filled circle placed by a click.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    /// Center x in engine space (logical canvas pixels).
    pub x: f64,
    /// Center y in engine space (logical canvas pixels).
    pub y: f64,
    /// Radius in logical pixels.
    pub radius: f64,
    /// CSS fill color.
    pub color: String,
}

impl Shape {
    /// Build the shape that lands at `index` in the drawing, styled from the palette.
    #[must_use]
    pub fn styled_for_index(at: Point, index: usize) -> Self {
        Self {
            x: at.x,
            y: at.y,
            radius: SHAPE_RADII[index % SHAPE_RADII.len()],
            color: SHAPE_PALETTE[index % SHAPE_PALETTE.len()].to_owned(),
        }
    }

    /// Center of the shape.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < FLOAT_COMPARISON_EPSILON
            && (self.y - other.y).abs() < FLOAT_COMPARISON_EPSILON
            && (self.radius - other.radius).abs() < FLOAT_COMPARISON_EPSILON
            && self.color == other.color
    }
}

/// Ordered collection of shapes. Insertion order is draw order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingState {
    pub shapes: Vec<Shape>,
}

impl DrawingState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape at `at` and return a reference to it.
    pub fn add_shape(&mut self, at: Point) -> &Shape {
        let index = self.shapes.len();
        self.shapes.push(Shape::styled_for_index(at, index));
        &self.shapes[index]
    }

    /// Remove every shape. Returns how many were removed.
    pub fn clear_shapes(&mut self) -> usize {
        let removed = self.shapes.len();
        self.shapes.clear();
        removed
    }

    /// Number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the drawing has no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Detached copy for callers outside the engine.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Serialize to the JSON wire shape `{ "shapes": [...] }`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
