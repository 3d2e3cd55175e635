//! Viewport pan/zoom state and the screen/world transform.
//!
//! A single owned struct mutated only through these methods; both the
//! renderer and cursor hit-testing go through the same `screen_to_world`,
//! so what the inspector reports is always the cell that was drawn.

use eframe::egui::Vec2;

/// Lower zoom bound. Keeps `1.0 / zoom` finite at extreme zoom-out.
pub const ZOOM_MIN: f32 = 1e-4;

/// Upper zoom bound. Keeps world coordinates from collapsing at extreme
/// zoom-in.
pub const ZOOM_MAX: f32 = 1e3;

/// Viewport state for pan and zoom.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    /// Zoom level (1.0 = one world unit per pixel).
    pub zoom: f32,
    /// Pan offset in world coordinates.
    pub offset: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl Viewport {
    /// Convert a screen-space point to world coordinates.
    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen / self.zoom + self.offset
    }

    /// Pan by a screen-space delta. Dividing by zoom keeps dragging
    /// screen-proportional at every zoom level.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset -= delta / self.zoom;
    }

    /// Zoom by `factor` while keeping the world point under `screen_point`
    /// fixed on screen.
    pub fn zoom_at(&mut self, screen_point: Vec2, factor: f32) {
        let new_zoom = (self.zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
        self.offset += screen_point * (1.0 / self.zoom - 1.0 / new_zoom);
        self.zoom = new_zoom;
    }

    /// Reset to the identity view.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.offset = Vec2::ZERO;
    }

    /// Fit a `world_dim`-sized square world into the view, centered, with a
    /// small margin.
    pub fn fit_to_view(&mut self, view_size: Vec2, world_dim: f32) {
        let padding = 0.95;
        let zoom_x = (view_size.x * padding) / world_dim;
        let zoom_y = (view_size.y * padding) / world_dim;
        self.zoom = zoom_x.min(zoom_y).clamp(ZOOM_MIN, ZOOM_MAX);

        let visible_world = view_size / self.zoom;
        self.offset = Vec2::new(
            -(visible_world.x - world_dim) / 2.0,
            -(visible_world.y - world_dim) / 2.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2, tol: f32) -> bool {
        (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol
    }

    #[test]
    fn test_screen_to_world_identity() {
        let vp = Viewport::default();
        let w = vp.screen_to_world(Vec2::new(10.0, 20.0));
        assert_eq!(w, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_pan_is_screen_proportional() {
        let mut vp = Viewport {
            zoom: 2.0,
            offset: Vec2::new(100.0, 100.0),
        };
        vp.pan(Vec2::new(10.0, -4.0));
        assert_eq!(vp.offset, Vec2::new(95.0, 102.0));
    }

    #[test]
    fn test_zoom_at_keeps_cursor_fixed() {
        // The world coordinate under the cursor must survive the zoom.
        let cases = [
            (1.0f32, Vec2::ZERO, Vec2::new(400.0, 300.0), 1.5f32),
            (0.25, Vec2::new(-37.0, 512.0), Vec2::new(13.0, 7.0), 0.5),
            (8.0, Vec2::new(2048.0, 2048.0), Vec2::new(640.0, 360.0), 1.1),
            (0.001, Vec2::new(1e5, -3.0), Vec2::new(0.0, 719.0), 4.0),
        ];
        for (zoom, offset, point, factor) in cases {
            let mut vp = Viewport { zoom, offset };
            let before = vp.screen_to_world(point);
            vp.zoom_at(point, factor);
            let after = vp.screen_to_world(point);
            let tol = (before.x.abs() + before.y.abs()).max(1.0) * 1e-4;
            assert!(
                approx(before, after, tol),
                "fixed point drifted: {before:?} -> {after:?} (zoom {zoom}, factor {factor})"
            );
        }
    }

    #[test]
    fn test_zoom_at_clamps_and_still_holds_fixed_point() {
        let mut vp = Viewport {
            zoom: 1e-4,
            offset: Vec2::ZERO,
        };
        let point = Vec2::new(100.0, 100.0);
        let before = vp.screen_to_world(point);
        vp.zoom_at(point, 0.5);
        assert_eq!(vp.zoom, ZOOM_MIN);
        let after = vp.screen_to_world(point);
        assert!(approx(before, after, before.x.abs() * 1e-4));

        vp.zoom = 1e3;
        vp.zoom_at(point, 10.0);
        assert_eq!(vp.zoom, ZOOM_MAX);
    }

    #[test]
    fn test_reset() {
        let mut vp = Viewport {
            zoom: 42.0,
            offset: Vec2::new(-5.0, 9.0),
        };
        vp.reset();
        assert_eq!(vp.zoom, 1.0);
        assert_eq!(vp.offset, Vec2::ZERO);
    }

    #[test]
    fn test_fit_to_view_centers_world() {
        let mut vp = Viewport::default();
        vp.fit_to_view(Vec2::new(1000.0, 800.0), 4096.0);
        // Zoom chosen from the tighter axis.
        assert!((vp.zoom - 800.0 * 0.95 / 4096.0).abs() < 1e-6);
        // World center ends up at view center.
        let center = vp.screen_to_world(Vec2::new(500.0, 400.0));
        assert!(approx(center, Vec2::new(2048.0, 2048.0), 0.5));
    }
}
