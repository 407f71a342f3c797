//! Client-space to engine-space coordinate mapping.
//!
//! Pointer events arrive in client (CSS) pixels relative to the viewport. The
//! engine stores shapes on the canvas's logical pixel grid: the backing store
//! size divided by the device pixel ratio. When the backing store is in sync
//! with the CSS box the two grids coincide; when the canvas is CSS-scaled they
//! differ by a constant factor per axis, and the mapping compensates for it.

#[cfg(test)]
#[path = "mapper_test.rs"]
mod mapper_test;

/// A point in either client or engine space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Border plus padding around the canvas content box, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Parse a computed CSS length like `"4.5px"`. Anything else reads as zero.
#[must_use]
pub fn parse_css_px(value: &str) -> f64 {
    match value.trim().strip_suffix("px").map(|n| n.trim().parse::<f64>()) {
        Some(Ok(px)) if px.is_finite() && px > 0.0 => px,
        _ => 0.0,
    }
}

/// Layout snapshot of the canvas element taken when an event is handled.
///
/// `left`/`top`/`css_width`/`css_height` describe the content box in CSS
/// pixels (`getBoundingClientRect` shrunk by [`Insets`]). `buffer_width`/`buffer_height` are the canvas `width` and
/// `height` attributes (device pixels). `dpr` is the window's device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    pub left: f64,
    pub top: f64,
    pub css_width: f64,
    pub css_height: f64,
    pub buffer_width: f64,
    pub buffer_height: f64,
    pub dpr: f64,
}

impl CanvasGeometry {
    /// Geometry of a canvas whose backing store exactly matches its CSS box at `dpr`.
    #[must_use]
    pub fn synced(left: f64, top: f64, css_width: f64, css_height: f64, dpr: f64) -> Self {
        let (buffer_width, buffer_height) = backing_store_size(css_width, css_height, dpr);
        Self {
            left,
            top,
            css_width,
            css_height,
            buffer_width: f64::from(buffer_width),
            buffer_height: f64::from(buffer_height),
            dpr,
        }
    }

    /// Shrink a border-box geometry to its content box.
    #[must_use]
    pub fn inset(self, insets: Insets) -> Self {
        Self {
            left: self.left + insets.left,
            top: self.top + insets.top,
            css_width: (self.css_width - insets.left - insets.right).max(0.0),
            css_height: (self.css_height - insets.top - insets.bottom).max(0.0),
            ..self
        }
    }

    /// Width of the logical pixel grid shapes live on.
    #[must_use]
    pub fn logical_width(&self) -> f64 {
        self.buffer_width / self.dpr
    }

    /// Height of the logical pixel grid shapes live on.
    #[must_use]
    pub fn logical_height(&self) -> f64 {
        self.buffer_height / self.dpr
    }

    /// Whether the geometry can be mapped at all (non-empty box, positive ratio).
    #[must_use]
    pub fn is_mappable(&self) -> bool {
        self.css_width > 0.0 && self.css_height > 0.0 && self.dpr > 0.0
    }

    /// Whether `client` falls inside the canvas box. Edges count as inside.
    #[must_use]
    pub fn contains(&self, client: Point) -> bool {
        client.x >= self.left
            && client.x <= self.left + self.css_width
            && client.y >= self.top
            && client.y <= self.top + self.css_height
    }

    /// Map a client-space point to engine space.
    ///
    /// Returns `None` when the geometry is degenerate or the point lies outside
    /// the canvas box.
    #[must_use]
    pub fn client_to_engine(&self, client: Point) -> Option<Point> {
        if !self.is_mappable() || !self.contains(client) {
            return None;
        }
        let scale_x = self.logical_width() / self.css_width;
        let scale_y = self.logical_height() / self.css_height;
        Some(Point { x: (client.x - self.left) * scale_x, y: (client.y - self.top) * scale_y })
    }
}

/// Backing-store size (device pixels) for a CSS box at the given pixel ratio.
///
/// Rounds to the nearest device pixel and never returns zero, so a canvas that
/// is momentarily collapsed keeps a drawable buffer.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn backing_store_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let ratio = if dpr > 0.0 { dpr } else { 1.0 };
    let w = (css_width * ratio).round().max(1.0);
    let h = (css_height * ratio).round().max(1.0);
    (w as u32, h as u32)
}
