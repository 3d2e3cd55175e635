//! Per-pixel cell evaluation for the Hilbert visualization.
//!
//! Every pixel is evaluated independently from the same immutable frame
//! snapshot: screen -> world -> grid cell -> curve distance -> window
//! classification. No pixel reads another pixel's result, so the grid can
//! be carved up across any number of workers.

use eframe::egui::{Color32, Vec2};
use rayon::prelude::*;

use crate::analysis::classify_window;
use crate::hilbert::xy2d;

/// Dim neutral tone for cells outside the file (and outside the grid).
/// Distinct from all four classification colors.
pub const OUT_OF_RANGE: Color32 = Color32::from_rgb(13, 13, 13);

/// Immutable per-frame snapshot consumed by the evaluators. One instance
/// per rendered frame; the GPU path mirrors this layout in its uniforms.
#[derive(Clone, Copy, Debug)]
pub struct FrameUniforms {
    /// Output grid width in pixels.
    pub view_width: usize,
    /// Output grid height in pixels.
    pub view_height: usize,
    /// Viewport pan offset in world coordinates.
    pub offset: Vec2,
    /// Viewport zoom.
    pub zoom: f32,
    /// File size in bytes.
    pub file_size: u64,
    /// Hilbert curve dimension (power of 2).
    pub dimension: u64,
}

/// Evaluate the color of a single pixel.
///
/// Pure function of the buffer and the frame snapshot; shared between the
/// parallel generator below and any caller that wants a single cell.
#[inline]
fn evaluate_cell(data: &[u8], frame: &FrameUniforms, px: usize, py: usize) -> Color32 {
    let world_x = px as f32 / frame.zoom + frame.offset.x;
    let world_y = py as f32 / frame.zoom + frame.offset.y;

    if world_x < 0.0 || world_y < 0.0 {
        return OUT_OF_RANGE;
    }

    let x = world_x as u64;
    let y = world_y as u64;

    if x >= frame.dimension || y >= frame.dimension {
        return OUT_OF_RANGE;
    }

    let d = xy2d(frame.dimension, x, y);
    if d >= frame.file_size {
        return OUT_OF_RANGE;
    }

    match classify_window(data, d) {
        Some(analysis) => {
            let [r, g, b] = analysis.to_color();
            Color32::from_rgb(r, g, b)
        }
        None => OUT_OF_RANGE,
    }
}

/// Generate the full pixel grid for one frame, in parallel.
pub fn generate_hilbert_pixels(data: &[u8], frame: &FrameUniforms) -> Vec<Color32> {
    (0..frame.view_width * frame.view_height)
        .into_par_iter()
        .map(|idx| {
            let py = idx / frame.view_width;
            let px = idx % frame.view_width;
            evaluate_cell(data, frame, px, py)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::WindowAnalysis;
    use crate::hilbert::MIN_DIMENSION;

    fn frame(view: usize, offset: Vec2, zoom: f32, file_size: u64) -> FrameUniforms {
        FrameUniforms {
            view_width: view,
            view_height: view,
            offset,
            zoom,
            file_size,
            dimension: MIN_DIMENSION,
        }
    }

    #[test]
    fn test_negative_world_is_out_of_range() {
        let data = vec![0xAAu8; 64];
        let f = frame(4, Vec2::new(-10.0, -10.0), 1.0, data.len() as u64);
        let pixels = generate_hilbert_pixels(&data, &f);
        assert_eq!(pixels.len(), 16);
        assert!(pixels.iter().all(|&p| p == OUT_OF_RANGE));
    }

    #[test]
    fn test_origin_pixel_matches_classifier() {
        let mut data = vec![0u8; 512];
        data[..64].copy_from_slice(&[0x41; 64]);
        let f = frame(8, Vec2::ZERO, 1.0, data.len() as u64);
        let pixels = generate_hilbert_pixels(&data, &f);

        let expected = WindowAnalysis::analyze(&data[..64]).to_color();
        assert_eq!(
            pixels[0],
            Color32::from_rgb(expected[0], expected[1], expected[2])
        );
    }

    #[test]
    fn test_cells_past_file_end_are_out_of_range() {
        // 4 bytes cover exactly curve distances 0..3; every other cell in
        // the view is past the file end.
        let data = vec![0x55u8; 4];
        let f = frame(8, Vec2::ZERO, 1.0, data.len() as u64);
        let pixels = generate_hilbert_pixels(&data, &f);

        let in_range = pixels.iter().filter(|&&p| p != OUT_OF_RANGE).count();
        assert_eq!(in_range, 4);
        // The far corner of the view is certainly not among the first bytes.
        assert_eq!(pixels[8 * 7 + 7], OUT_OF_RANGE);
    }

    #[test]
    fn test_empty_file_renders_fully_out_of_range() {
        let f = frame(8, Vec2::ZERO, 1.0, 0);
        let pixels = generate_hilbert_pixels(&[], &f);
        assert!(pixels.iter().all(|&p| p == OUT_OF_RANGE));
    }

    #[test]
    fn test_zoom_out_reaches_grid_edge() {
        // Zoomed far out, most of an 8x8 view lies beyond the 4096 grid.
        let data = vec![0x41u8; 64];
        let f = frame(8, Vec2::ZERO, 1e-3, data.len() as u64);
        let pixels = generate_hilbert_pixels(&data, &f);
        // Pixel 5 is at world x = 5000 > 4096.
        assert_eq!(pixels[5], OUT_OF_RANGE);
    }
}
