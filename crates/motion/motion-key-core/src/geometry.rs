//! Axis-aligned boxes and the container-size query used by screen-relative positions.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl FloatRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box of the given size whose center is `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(
            cx - width / 2.0,
            cy - height / 2.0,
            cx + width / 2.0,
            cy + height / 2.0,
        )
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) * 0.5
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) * 0.5
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Parent container of the animated target, queried for its pixel size.
pub trait LayoutContainer {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: i32,
    pub height: i32,
}

impl ContainerSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl LayoutContainer for ContainerSize {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_and_extents() {
        let r = FloatRect::new(10.0, 20.0, 30.0, 60.0);
        assert_eq!(r.center_x(), 20.0);
        assert_eq!(r.center_y(), 40.0);
        assert_eq!(r.width(), 20.0);
        assert_eq!(r.height(), 40.0);
        assert_eq!(FloatRect::centered(20.0, 40.0, 20.0, 40.0), r);
    }
}
