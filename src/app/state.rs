//! Main application state.

use std::path::PathBuf;

use eframe::egui::{TextureHandle, Vec2};

use super::inspect::InspectionResult;
use super::types::{FileData, TextureParams};
use super::viewport::Viewport;
use crate::gpu::GpuRenderer;

/// Main application state: one loaded file, one view.
pub struct PanoptesApp {
    /// Loaded file data.
    pub file: Option<FileData>,
    /// Viewport state for pan/zoom.
    pub viewport: Viewport,
    /// Inspection data for the cursor position.
    pub inspection: InspectionResult,
    /// Whether the inspection is pinned by a click (hover stops updating it).
    pub pinned: bool,
    /// Cached texture for the current frame.
    pub texture: Option<TextureHandle>,
    /// Frame parameters the cached texture was generated with.
    pub texture_params: Option<TextureParams>,
    /// GPU renderer for accelerated evaluation, if available.
    pub gpu: Option<GpuRenderer>,
    /// Initial file to load (from command-line argument).
    pub initial_file: Option<PathBuf>,
    /// Whether a file is being dragged over the window.
    pub is_drop_target: bool,
    /// Whether the viewport should be fitted to the view (after load).
    pub needs_fit_to_view: bool,
    /// View size used for the last fit, to detect significant resizes.
    pub last_fit_view_size: Option<Vec2>,
}

impl Default for PanoptesApp {
    fn default() -> Self {
        Self {
            file: None,
            viewport: Viewport::default(),
            inspection: InspectionResult::default(),
            pinned: false,
            texture: None,
            texture_params: None,
            gpu: None,
            initial_file: None,
            is_drop_target: false,
            needs_fit_to_view: false,
            last_fit_view_size: None,
        }
    }
}

impl PanoptesApp {
    /// Create a new application instance with an optional initial file.
    pub fn new_with_file(_cc: &eframe::CreationContext<'_>, initial_file: Option<PathBuf>) -> Self {
        let gpu = GpuRenderer::new();
        if gpu.is_some() {
            println!("GPU acceleration enabled");
        } else {
            println!("GPU acceleration unavailable, using CPU fallback");
        }
        Self {
            gpu,
            initial_file,
            ..Self::default()
        }
    }

    /// Drop the cached texture so the next frame regenerates it.
    pub fn invalidate_texture(&mut self) {
        self.texture = None;
        self.texture_params = None;
    }

    /// Check if the view size has changed significantly since the last fit.
    pub fn should_refit(&self, current_view_size: Vec2) -> bool {
        if let Some(last_size) = self.last_fit_view_size {
            let delta_x = (current_view_size.x - last_size.x).abs() / last_size.x.max(1.0);
            let delta_y = (current_view_size.y - last_size.y).abs() / last_size.y.max(1.0);
            delta_x > 0.05 || delta_y > 0.05
        } else {
            false
        }
    }
}
