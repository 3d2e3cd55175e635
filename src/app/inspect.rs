//! Cursor-to-offset resolution and inspection data.
//!
//! Runs once per pointer event. Resolves a screen point through the
//! viewport transform and the Hilbert mapping to a byte offset, then
//! derives the inspector readout (exact Shannon entropy, hex dump, string
//! preview) for the surrounding window.

use eframe::egui::Vec2;

use super::viewport::Viewport;
use crate::analysis::{calculate_entropy, extract_ascii, ANALYSIS_WINDOW};
use crate::hilbert::xy2d;
use crate::util::format::hex_dump;

/// Inspection data for the byte window under (or last near) the cursor.
///
/// `offset` and `hovering` are deliberately separate: when the cursor is
/// over an out-of-range cell the target falls back to offset 0 so the
/// inspector always has something to show, but `hovering` stays false so
/// consumers can tell that apart from genuinely inspecting offset 0.
#[derive(Clone, Debug, Default)]
pub struct InspectionResult {
    /// Resolved byte offset, if the pointer mapped to anything at all.
    pub offset: Option<u64>,
    /// Exact Shannon entropy of the inspected window, in bits.
    pub entropy: f64,
    /// Formatted hex dump of the inspected window.
    pub hex_dump: String,
    /// First printable run longer than 4 characters, if any.
    pub ascii_preview: Option<String>,
    /// True only when the cursor is over a real byte of the file.
    pub hovering: bool,
}

impl InspectionResult {
    /// Result for a pointer position that maps to nothing (off-world or
    /// degenerate coordinates).
    fn cleared() -> Self {
        Self::default()
    }
}

/// Resolve a screen point to a byte offset and its inspection window.
///
/// Degenerate world coordinates (NaN/infinite from zoom pathologies, or
/// negative) clear the result. In-grid cells past the end of the file fall
/// back to offset 0 with `hovering == false`.
pub fn inspect(screen: Vec2, viewport: &Viewport, data: &[u8], dimension: u64) -> InspectionResult {
    let world = viewport.screen_to_world(screen);

    if !world.x.is_finite() || !world.y.is_finite() || world.x < 0.0 || world.y < 0.0 {
        return InspectionResult::cleared();
    }

    let x = world.x as u64;
    let y = world.y as u64;
    let file_size = data.len() as u64;

    let (target, hovering) = if x < dimension && y < dimension {
        let d = xy2d(dimension, x, y);
        if d < file_size {
            (d, true)
        } else {
            (0, false)
        }
    } else {
        (0, false)
    };

    let mut result = InspectionResult {
        offset: Some(target),
        hovering,
        ..InspectionResult::cleared()
    };

    if target < file_size {
        let start = target as usize;
        let end = (start + ANALYSIS_WINDOW).min(data.len());
        let window = &data[start..end];
        result.entropy = calculate_entropy(window);
        result.hex_dump = hex_dump(window, start);
        result.ascii_preview = extract_ascii(window);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hilbert::calculate_dimension;

    fn sample_file() -> Vec<u8> {
        let mut data = b"A sample header string".to_vec();
        data.resize(512, 0x90);
        data
    }

    #[test]
    fn test_negative_screen_position_clears_result() {
        let data = sample_file();
        let vp = Viewport::default();
        let result = inspect(Vec2::new(-5.0, 10.0), &vp, &data, 4096);
        assert!(!result.hovering);
        assert_eq!(result.offset, None);
        assert!(result.hex_dump.is_empty());
    }

    #[test]
    fn test_nan_world_coordinate_clears_result() {
        let data = sample_file();
        let vp = Viewport::default();
        let result = inspect(Vec2::new(f32::NAN, 0.0), &vp, &data, 4096);
        assert!(!result.hovering);
        assert_eq!(result.offset, None);
    }

    #[test]
    fn test_valid_hover_resolves_curve_offset() {
        let data = sample_file();
        let dimension = calculate_dimension(data.len() as u64);
        let vp = Viewport::default();
        // Pixel (0, 0) is curve distance 0 at any dimension.
        let result = inspect(Vec2::new(0.2, 0.7), &vp, &data, dimension);
        assert!(result.hovering);
        assert_eq!(result.offset, Some(0));
        assert!(result.entropy > 0.0);
        assert!(result.hex_dump.starts_with("00000000"));
        assert_eq!(result.ascii_preview.as_deref(), Some("A sample header string"));
    }

    #[test]
    fn test_out_of_range_cell_defaults_to_offset_zero() {
        let data = sample_file();
        let dimension = calculate_dimension(data.len() as u64);
        let vp = Viewport::default();
        // Far corner of the grid: valid cell, distance way past 512 bytes.
        let result = inspect(Vec2::new(4000.0, 4000.0), &vp, &data, dimension);
        assert!(!result.hovering);
        assert_eq!(result.offset, Some(0));
        // Fallback still populates the window at offset 0.
        assert!(!result.hex_dump.is_empty());
    }

    #[test]
    fn test_beyond_grid_defaults_to_offset_zero() {
        let data = sample_file();
        let vp = Viewport::default();
        let result = inspect(Vec2::new(5000.0, 10.0), &vp, &data, 4096);
        assert!(!result.hovering);
        assert_eq!(result.offset, Some(0));
    }

    #[test]
    fn test_empty_file_has_no_window() {
        let vp = Viewport::default();
        let result = inspect(Vec2::new(1.0, 1.0), &vp, &[], 4096);
        assert!(!result.hovering);
        assert_eq!(result.offset, Some(0));
        assert_eq!(result.entropy, 0.0);
        assert!(result.hex_dump.is_empty());
        assert_eq!(result.ascii_preview, None);
    }

    #[test]
    fn test_hover_agrees_with_mapper() {
        let data = sample_file();
        let dimension = calculate_dimension(data.len() as u64);
        let mut vp = Viewport::default();
        vp.zoom_at(Vec2::new(3.0, 5.0), 2.0);
        let screen = Vec2::new(9.0, 6.0);
        let world = vp.screen_to_world(screen);
        let expected = xy2d(dimension, world.x as u64, world.y as u64);
        let result = inspect(screen, &vp, &data, dimension);
        if expected < data.len() as u64 {
            assert_eq!(result.offset, Some(expected));
            assert!(result.hovering);
        } else {
            assert_eq!(result.offset, Some(0));
            assert!(!result.hovering);
        }
    }
}
