//! Slot geometry for square puzzle boards
//!
//! This module maps linear slot indices to grid coordinates, locates each
//! tile's region in the source image and lays a tile set out as a grid.

/// Slot coordinates, source regions and board layout
pub mod grid;

pub use grid::{BoardLayout, SlotCoord, SourceRegion};
