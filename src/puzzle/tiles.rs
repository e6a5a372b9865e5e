//! Tile set generation from a source image and a grid dimension
//!
//! Every tile is created with `id == correct_pos` and a fixed source region.
//! Only `current_pos` is randomized, so the arrangement is a permutation of
//! slot indices and the puzzle is solved exactly when that permutation is
//! the identity.

use bitvec::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::io::configuration::MAX_DIMENSION;
use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::spatial::grid::SourceRegion;

/// Opaque reference to a full source image
///
/// Shared by every tile of a puzzle; cloning is a reference-count bump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(Arc<str>);

impl ImageHandle {
    /// Wrap a path or URI
    pub fn new(reference: impl Into<Arc<str>>) -> Self {
        Self(reference.into())
    }

    /// The underlying path or URI
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One piece of the puzzle grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    id: usize,
    correct_pos: usize,
    current_pos: usize,
    image: ImageHandle,
    source_region: SourceRegion,
}

impl Tile {
    /// Stable identity, assigned at creation
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Slot this tile occupies when the puzzle is solved
    pub const fn correct_pos(&self) -> usize {
        self.correct_pos
    }

    /// Slot this tile currently occupies
    pub const fn current_pos(&self) -> usize {
        self.current_pos
    }

    /// Source image shared by the whole puzzle
    pub const fn image(&self) -> &ImageHandle {
        &self.image
    }

    /// Offset into the source image this tile displays
    pub const fn source_region(&self) -> SourceRegion {
        self.source_region
    }

    /// Whether the tile sits in its correct slot
    pub const fn is_placed(&self) -> bool {
        self.current_pos == self.correct_pos
    }

    pub(crate) const fn set_current_pos(&mut self, slot: usize) {
        self.current_pos = slot;
    }

    pub(crate) fn set_image(&mut self, image: ImageHandle) {
        self.image = image;
    }
}

/// The complete set of `dim²` tiles for one puzzle, ordered by id
///
/// Serializes as its arrangement; deserializing rebuilds the tiles through
/// [`TileSet::from_positions`] so an invalid arrangement is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Arrangement", try_from = "Arrangement")]
pub struct TileSet {
    dim: usize,
    tiles: Vec<Tile>,
}

impl TileSet {
    /// Slice an image into a shuffled, unsolved tile set
    ///
    /// The arrangement is a uniform Fisher–Yates permutation of slot indices.
    /// When the draw happens to be the identity on a grid with more than one
    /// tile, the first two tiles are exchanged so a new puzzle never starts
    /// solved.
    ///
    /// # Errors
    ///
    /// Returns an error if `dim` is zero or exceeds [`MAX_DIMENSION`]
    pub fn generate<R: Rng + ?Sized>(image: ImageHandle, dim: usize, rng: &mut R) -> Result<Self> {
        validate_dimension(dim)?;
        let count = dim * dim;

        let mut positions: Vec<usize> = (0..count).collect();
        for i in (1..count).rev() {
            let j = rng.random_range(0..=i);
            positions.swap(i, j);
        }

        let is_identity = positions.iter().enumerate().all(|(id, &pos)| id == pos);
        if is_identity && count > 1 {
            positions.swap(0, 1);
        }

        Ok(Self::build(image, dim, &positions))
    }

    /// Build a tile set from an explicit arrangement
    ///
    /// `positions[id]` is the slot tile `id` occupies.
    ///
    /// # Errors
    ///
    /// Returns an error if `dim` is invalid or `positions` is not a
    /// permutation of `0..dim²`
    pub fn from_positions(image: ImageHandle, dim: usize, positions: &[usize]) -> Result<Self> {
        validate_dimension(dim)?;
        if !is_permutation(positions, dim * dim) {
            return Err(invalid_parameter(
                "positions",
                &format!("{positions:?}"),
                &format!("must be a permutation of 0..{}", dim * dim),
            ));
        }
        Ok(Self::build(image, dim, positions))
    }

    fn build(image: ImageHandle, dim: usize, positions: &[usize]) -> Self {
        let tiles = positions
            .iter()
            .enumerate()
            .map(|(id, &current_pos)| Tile {
                id,
                correct_pos: id,
                current_pos,
                image: image.clone(),
                source_region: SourceRegion::for_slot(id, dim),
            })
            .collect();
        Self { dim, tiles }
    }

    /// Grid side length
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Number of tiles (`dim²`)
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the set holds no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in id order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Look up a tile by id
    pub fn tile(&self, id: usize) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// Tile currently occupying a slot
    pub fn tile_at(&self, slot: usize) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.current_pos == slot)
    }

    /// Source image of the puzzle
    pub fn image(&self) -> Option<&ImageHandle> {
        self.tiles.first().map(Tile::image)
    }

    /// Current slot of every tile, in id order
    pub fn positions(&self) -> Vec<usize> {
        self.tiles.iter().map(Tile::current_pos).collect()
    }

    /// Whether current positions form a bijection on `0..dim²`
    pub fn is_permutation(&self) -> bool {
        is_permutation(&self.positions(), self.dim * self.dim)
    }

    pub(crate) fn tile_mut(&mut self, id: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(id)
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }
}

#[derive(Serialize, Deserialize)]
struct Arrangement {
    image: Option<ImageHandle>,
    dim: usize,
    positions: Vec<usize>,
}

impl From<TileSet> for Arrangement {
    fn from(tiles: TileSet) -> Self {
        Self {
            image: tiles.image().cloned(),
            dim: tiles.dim,
            positions: tiles.positions(),
        }
    }
}

impl TryFrom<Arrangement> for TileSet {
    type Error = PuzzleError;

    fn try_from(arrangement: Arrangement) -> Result<Self> {
        let Some(image) = arrangement.image else {
            return Err(invalid_parameter("image", &"none", &"a tile set needs an image"));
        };
        Self::from_positions(image, arrangement.dim, &arrangement.positions)
    }
}

fn validate_dimension(dim: usize) -> Result<()> {
    if dim == 0 {
        return Err(invalid_parameter(
            "dim",
            &dim,
            &"grid dimension must be at least 1",
        ));
    }
    if dim > MAX_DIMENSION {
        return Err(invalid_parameter(
            "dim",
            &dim,
            &format!("grid dimension must not exceed {MAX_DIMENSION}"),
        ));
    }
    Ok(())
}

/// Check that `positions` holds every value in `0..count` exactly once
pub fn is_permutation(positions: &[usize], count: usize) -> bool {
    if positions.len() != count {
        return false;
    }
    let mut seen = bitvec![0; count];
    for &pos in positions {
        let already_seen = match seen.get(pos) {
            Some(bit) => *bit,
            None => return false,
        };
        if already_seen {
            return false;
        }
        seen.set(pos, true);
    }
    true
}
