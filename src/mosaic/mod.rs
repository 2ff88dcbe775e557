//! Mosaic construction.
//!
//! The packer turns a quantized grid into a `Panel`: a set of anchored
//! pieces that covers every cell exactly once.

mod packer;
mod panel;

pub use packer::{pack, TilePacker};
pub use panel::{Anchor, Panel, Placement};
