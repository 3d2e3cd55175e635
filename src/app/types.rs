//! Core state types for the loaded file and frame caching.

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui::Vec2;
use memmap2::Mmap;

/// Loaded file information and data.
///
/// The mapped buffer is immutable for the lifetime of the load and shared
/// by reference count; loading a new file replaces the whole struct, and
/// the old mapping is released once the last in-flight frame drops its
/// clone.
pub struct FileData {
    /// Memory-mapped file data (efficient for large files).
    pub data: Arc<Mmap>,
    /// File size in bytes.
    pub size: u64,
    /// Hilbert curve dimension (power of 2), fixed at load time.
    pub dimension: u64,
    /// Detected file type.
    pub file_type: &'static str,
    /// Original file path.
    pub path: PathBuf,
}

/// Frame snapshot used to generate the cached texture. A new frame is only
/// evaluated when these differ from the cached ones.
#[derive(Clone, Copy, PartialEq)]
pub struct TextureParams {
    /// Viewport offset at generation time.
    pub offset: Vec2,
    /// Viewport zoom at generation time.
    pub zoom: f32,
    /// View size in pixels at generation time.
    pub view_size: Vec2,
}
