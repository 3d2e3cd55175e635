//! Panoptes - Hilbert-curve binary forensic visualizer.
//!
//! This library maps byte offsets of an arbitrary file onto a Hilbert
//! space-filling curve and classifies a sliding window around each offset
//! into a forensic verdict (padding, high entropy, ASCII text, code-like),
//! providing:
//! - The integer Hilbert transform shared by rendering and hit-testing
//! - The dimension policy that sizes the curve for a file
//! - The byte-window classifier and magic-byte file typing
//! - The viewport transform (pan, zoom-to-cursor) and hover inspection
//! - Parallel per-pixel evaluators (rayon CPU path, wgpu compute path)

pub mod analysis;
pub mod app;
pub mod gpu;
pub mod hilbert;
pub mod util;
pub mod viz;
