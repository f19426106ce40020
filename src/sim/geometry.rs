//! Axis-aligned rectangle geometry in percentage-of-board units.

use glam::Vec2;

/// An axis-aligned rectangle positioned by its top-left corner.
///
/// Coordinates are percentages of the board (0..100 on both axes), with y
/// growing downward. Bodies may transiently leave the 0..100 range; player
/// physics treats `top > 100` as falling off the map.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// The four corner points of a [`Rect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Extract the four corner points.
    pub fn corners(&self) -> Corners {
        let right = self.right();
        let bottom = self.bottom();
        Corners {
            top_left: Vec2::new(self.left, self.top),
            top_right: Vec2::new(right, self.top),
            bottom_left: Vec2::new(self.left, bottom),
            bottom_right: Vec2::new(right, bottom),
        }
    }

    /// Shrink or grow the rectangle about its own center.
    pub fn scale_about_center(&mut self, factor: f32) {
        let width = self.width * factor;
        let height = self.height * factor;
        self.top += (self.height - height) / 2.0;
        self.left += (self.width - width) / 2.0;
        self.width = width;
        self.height = height;
    }
}

impl Corners {
    /// Shift all four corners by the same offset.
    pub fn translate(&mut self, offset: Vec2) {
        self.top_left += offset;
        self.top_right += offset;
        self.bottom_left += offset;
        self.bottom_right += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_derive_right_and_bottom() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        let corners = rect.corners();
        assert_eq!(corners.top_left, Vec2::new(10.0, 20.0));
        assert_eq!(corners.top_right, Vec2::new(40.0, 20.0));
        assert_eq!(corners.bottom_left, Vec2::new(10.0, 60.0));
        assert_eq!(corners.bottom_right, Vec2::new(40.0, 60.0));
    }

    #[test]
    fn scale_about_center_keeps_center() {
        let mut rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        let cx = rect.left + rect.width / 2.0;
        let cy = rect.top + rect.height / 2.0;

        rect.scale_about_center(0.5);

        assert_eq!(rect.width, 15.0);
        assert_eq!(rect.height, 20.0);
        assert_eq!(rect.left + rect.width / 2.0, cx);
        assert_eq!(rect.top + rect.height / 2.0, cy);
    }

    #[test]
    fn translate_moves_all_corners() {
        let mut corners = Rect::new(0.0, 0.0, 10.0, 10.0).corners();
        corners.translate(Vec2::new(2.0, -3.0));
        assert_eq!(corners.top_left, Vec2::new(2.0, -3.0));
        assert_eq!(corners.bottom_right, Vec2::new(12.0, 7.0));
    }
}
