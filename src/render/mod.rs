//! Rendering module for brickify.
//!
//! This module turns packed panels back into raster images.

mod panel;
mod png;

pub use panel::{render_panel, MAX_SCALE};
pub use png::write_png;
