//! Swap, undo and restyle operations over a tile set
//!
//! All operations are pure: they take a tile set by reference and return a
//! new one. A swap only ever exchanges two `current_pos` values, so every
//! result is still a permutation of slot indices.

use crate::puzzle::moves::MoveRecord;
use crate::puzzle::tiles::{ImageHandle, TileSet};

/// Exchange the slots of tiles `a` and `b`
///
/// Returns the new tile set and whether it is solved. An unknown id leaves
/// the set unchanged. Swapping a tile with itself is tolerated and changes
/// nothing.
pub fn swap(tiles: &TileSet, a: usize, b: usize) -> (TileSet, bool) {
    let (Some(tile_a), Some(tile_b)) = (tiles.tile(a), tiles.tile(b)) else {
        tracing::debug!(a, b, "swap references an unknown tile; ignored");
        return (tiles.clone(), is_solved(tiles));
    };
    let pos_a = tile_a.current_pos();
    let pos_b = tile_b.current_pos();

    let mut next = tiles.clone();
    if let Some(tile) = next.tile_mut(a) {
        tile.set_current_pos(pos_b);
    }
    if let Some(tile) = next.tile_mut(b) {
        tile.set_current_pos(pos_a);
    }

    let solved = is_solved(&next);
    (next, solved)
}

/// Reverse a recorded swap
///
/// A swap is its own inverse, so this re-applies it.
pub fn undo(tiles: &TileSet, record: MoveRecord) -> TileSet {
    swap(tiles, record.a, record.b).0
}

/// Whether every tile occupies its correct slot
///
/// An empty set is never solved.
pub fn is_solved(tiles: &TileSet) -> bool {
    !tiles.is_empty() && tiles.tiles().iter().all(|tile| tile.current_pos() == tile.id())
}

/// Number of tiles sitting in their correct slot
pub fn correct_count(tiles: &TileSet) -> usize {
    tiles.tiles().iter().filter(|tile| tile.is_placed()).count()
}

/// Point every tile at a new source image
///
/// Positions, ids and source regions are untouched, so progress and
/// solved-ness carry over unchanged.
pub fn restyle(tiles: &TileSet, image: &ImageHandle) -> TileSet {
    let mut next = tiles.clone();
    for tile in next.tiles_mut() {
        tile.set_image(image.clone());
    }
    next
}
