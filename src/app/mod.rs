//! Application state and interaction logic.
//!
//! This module contains:
//! - `PanoptesApp` - Main application state
//! - `FileData` - Loaded file information (the byte source)
//! - `Viewport` - Pan/zoom state and the screen/world transform
//! - `inspect` - Cursor-to-offset resolution and inspection data

pub mod inspect;
pub mod state;
pub mod types;
pub mod viewport;

pub use inspect::{inspect, InspectionResult};
pub use state::PanoptesApp;
pub use types::{FileData, TextureParams};
pub use viewport::Viewport;
