#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are points on a touchscreen surface: `f32`, origin at the
//! top-left of the scrollable content, `y` growing downwards.

/// A rectangle describing a field frame or a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in points.
    pub width: f32,
    /// Height in points.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Top edge. Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Vertical midpoint.
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Return a copy with the height reduced by `amount` from the bottom edge.
    ///
    /// The height never goes below zero.
    #[must_use]
    pub fn shrink_bottom(&self, amount: f32) -> Rect {
        Rect {
            height: (self.height - amount).max(0.0),
            ..*self
        }
    }

    /// Check whether the vertical span of `other` lies fully inside this one.
    pub fn contains_vertically(&self, other: &Rect) -> bool {
        other.y >= self.y && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center_y(), 40.0);
    }

    #[test]
    fn empty_rect() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(0.0, 0.0, 10.0, 0.0).is_empty());
        assert!(!Rect::from_size(1.0, 1.0).is_empty());
    }

    #[test]
    fn shrink_bottom_saturates() {
        let r = Rect::from_size(320.0, 480.0);
        assert_eq!(r.shrink_bottom(216.0).height, 264.0);
        assert_eq!(r.shrink_bottom(1000.0).height, 0.0);
        assert_eq!(r.shrink_bottom(216.0).y, 0.0);
    }

    #[test]
    fn vertical_containment() {
        let viewport = Rect::new(0.0, 100.0, 320.0, 200.0);
        assert!(viewport.contains_vertically(&Rect::new(0.0, 120.0, 320.0, 40.0)));
        assert!(!viewport.contains_vertically(&Rect::new(0.0, 280.0, 320.0, 40.0)));
    }
}
