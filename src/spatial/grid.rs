//! Slot geometry and board layout for square puzzle grids
//!
//! Slots are numbered row-major: slot `k` sits at `(k / dim, k % dim)`.
//! The layout view inverts a tile set so presentation code can ask
//! "which tile is in this slot" without scanning every tile.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::puzzle::tiles::TileSet;

/// Row and column of a slot within the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotCoord {
    /// Zero-based row, top to bottom
    pub row: usize,
    /// Zero-based column, left to right
    pub col: usize,
}

/// Converts a linear slot index to grid coordinates
///
/// Returns `None` for a zero dimension.
pub const fn slot_to_coord(slot: usize, dim: usize) -> Option<SlotCoord> {
    if dim == 0 {
        return None;
    }
    Some(SlotCoord {
        row: slot / dim,
        col: slot % dim,
    })
}

/// Converts grid coordinates to a linear slot index
pub const fn coord_to_slot(coord: SlotCoord, dim: usize) -> usize {
    coord.row * dim + coord.col
}

/// Normalized offset into the source image for one tile
///
/// Percentages follow background-position semantics: 0% aligns the tile with
/// the left/top edge of the image, 100% with the right/bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceRegion {
    /// Horizontal offset in percent
    pub x_percent: f64,
    /// Vertical offset in percent
    pub y_percent: f64,
}

impl SourceRegion {
    /// Region sampled by the tile that belongs at `slot`
    ///
    /// A single-tile grid maps to `(0, 0)` instead of dividing by zero.
    pub fn for_slot(slot: usize, dim: usize) -> Self {
        if dim <= 1 {
            return Self::default();
        }
        let row = slot / dim;
        let col = slot % dim;
        let span = (dim - 1) as f64;
        Self {
            x_percent: col as f64 / span * 100.0,
            y_percent: row as f64 / span * 100.0,
        }
    }

    /// Pixel origin of this region for an image of the given size
    ///
    /// `tile_width`/`tile_height` are the pixel dimensions of one tile.
    pub fn pixel_origin(
        &self,
        image_width: u32,
        image_height: u32,
        tile_width: u32,
        tile_height: u32,
    ) -> (u32, u32) {
        let free_x = f64::from(image_width.saturating_sub(tile_width));
        let free_y = f64::from(image_height.saturating_sub(tile_height));
        (
            (free_x * self.x_percent / 100.0).round() as u32,
            (free_y * self.y_percent / 100.0).round() as u32,
        )
    }
}

/// Slot-indexed view of a tile set
///
/// Each cell holds the id of the tile currently occupying that slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    cells: Array2<usize>,
}

impl BoardLayout {
    /// Build the layout for the current arrangement of a tile set
    pub fn from_tiles(tiles: &TileSet) -> Self {
        let dim = tiles.dim();
        let mut cells = Array2::zeros((dim, dim));
        for tile in tiles.tiles() {
            if let Some(coord) = slot_to_coord(tile.current_pos(), dim)
                && let Some(cell) = cells.get_mut((coord.row, coord.col))
            {
                *cell = tile.id();
            }
        }
        Self { cells }
    }

    /// Grid side length
    pub fn dim(&self) -> usize {
        self.cells.nrows()
    }

    /// Tile id occupying the given cell
    pub fn tile_at(&self, coord: SlotCoord) -> Option<usize> {
        self.cells.get((coord.row, coord.col)).copied()
    }

    /// Tile ids in slot order
    pub fn slots(&self) -> Vec<usize> {
        self.cells.iter().copied().collect()
    }
}

impl fmt::Display for BoardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.cells.len().saturating_sub(1).to_string().len();
        for row in self.cells.rows() {
            let mut first = true;
            for &id in row {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{id:>width$}")?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
