//! Reader for the `getDrawingState()` wire format.

use serde::Deserialize;

use crate::error::HarnessError;

/// Shape position as seen from the page. Render attributes are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ShapePoint {
    pub x: f64,
    pub y: f64,
}

impl ShapePoint {
    /// Whether both coordinates are strictly within `tolerance` of `(x, y)`.
    #[must_use]
    pub fn is_near(&self, x: f64, y: f64, tolerance: f64) -> bool {
        (self.x - x).abs() < tolerance && (self.y - y).abs() < tolerance
    }
}

/// `{ shapes: [...] }` as returned by the handle.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct StateSnapshot {
    pub shapes: Vec<ShapePoint>,
}

impl StateSnapshot {
    /// Parse a handle result.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Snapshot`] if `shapes` is missing or malformed.
    pub fn from_value(value: serde_json::Value) -> Result<Self, HarnessError> {
        Ok(serde_json::from_value(value)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
