//! Tile sets and the permutation engine
//!
//! This module contains the puzzle core:
//! - Tile set generation with a guaranteed-unsolved shuffle
//! - Swap, undo and restyle operations
//! - The move log used for undo

/// Move records and the undo stack
pub mod moves;
/// Swap, undo and solved detection over tile sets
pub mod permutation;
/// Tile and tile set construction
pub mod tiles;

pub use moves::{MoveLog, MoveRecord};
pub use tiles::{ImageHandle, Tile, TileSet};
