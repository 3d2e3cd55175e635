//! CPU pixel generation for the Hilbert visualization.
//!
//! The parallel fallback path when no GPU is available (or the file
//! exceeds the GPU storage-binding limit). Produces the same colors as
//! the compute shader, pixel for pixel.

mod generators;

pub use generators::{generate_hilbert_pixels, FrameUniforms, OUT_OF_RANGE};
