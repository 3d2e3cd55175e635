//! Analysis primitives for binary data inspection.
//!
//! This module provides:
//! - Byte-window forensic classification (padding / entropy / text / code)
//! - Magic-byte file type detection
//! - Exact Shannon entropy and printable string extraction

pub mod byte;
pub mod entropy;

// Re-export commonly used items
pub use byte::{
    classify_window, identify_file_type, Classification, WindowAnalysis, ANALYSIS_WINDOW,
};
pub use entropy::{calculate_entropy, extract_ascii};
