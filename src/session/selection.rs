//! Two-click swap selection

/// Transient cursor holding the tile armed for a swap
///
/// The first click arms a tile and the second click on a different tile
/// yields the pair to swap. Clicking the armed tile again disarms it, so a
/// tile is never paired with itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    armed: Option<usize>,
}

impl Selection {
    /// Cursor with nothing armed
    pub const fn new() -> Self {
        Self { armed: None }
    }

    /// Tile currently armed, if any
    pub const fn armed(&self) -> Option<usize> {
        self.armed
    }

    /// Register a click on tile `id`
    ///
    /// Returns the `(armed, id)` pair once two different tiles were clicked.
    pub const fn click(&mut self, id: usize) -> Option<(usize, usize)> {
        match self.armed {
            None => {
                self.armed = Some(id);
                None
            }
            Some(armed) => {
                self.armed = None;
                if armed == id { None } else { Some((armed, id)) }
            }
        }
    }

    /// Disarm the cursor
    pub const fn clear(&mut self) {
        self.armed = None;
    }
}
