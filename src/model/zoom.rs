//! ZoomWindow - magnifier overlay mapping
//!
//! A square scope of the grid (`scope_size` cells at `scope_position`) is
//! drawn magnified `factor` times at `window_position`. Pointer positions
//! that fall inside the magnified window refer to cells inside the scope.

use crate::spatial::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoomWindow {
    pub enabled: bool,
    pub scope_position: Point,
    pub scope_size: i32,
    pub factor: i32,
    pub window_position: Point,
}

impl ZoomWindow {
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            scope_position: Point::new(0, 0),
            scope_size: 32,
            factor: 8,
            window_position: Point::new(0, 0),
        }
    }

    pub fn new(scope_position: Point, scope_size: i32, factor: i32, window_position: Point) -> Self {
        Self {
            enabled: true,
            scope_position,
            scope_size: scope_size.max(1),
            factor: factor.max(1),
            window_position,
        }
    }

    /// On-screen side length of the magnified window
    pub fn window_size(&self) -> i32 {
        self.scope_size * self.factor
    }

    /// Map a screen position to grid coordinates
    pub fn adjust(&self, position: Point) -> Point {
        if !self.enabled {
            return position;
        }
        let size = self.window_size();
        let wx = self.window_position.x;
        let wy = self.window_position.y;
        if position.x >= wx && position.x < wx + size && position.y >= wy && position.y < wy + size {
            Point::new(
                (position.x - wx) / self.factor + self.scope_position.x,
                (position.y - wy) / self.factor + self.scope_position.y,
            )
        } else {
            position
        }
    }
}

impl Default for ZoomWindow {
    fn default() -> Self {
        Self::disabled()
    }
}
