//! Picture puzzle game: a prompt becomes an image, the image becomes a shuffled grid
//!
//! The player swaps tiles until the picture is restored. Solved runs are kept
//! in a bounded, persisted vault, and a short quiz about the subject can
//! follow each solve.

#![forbid(unsafe_code)]

/// Completed-run vault and its storage
pub mod history;
/// Input/output operations and error handling
pub mod io;
/// Tile sets and the permutation engine
pub mod puzzle;
/// Image, quiz and file-intake collaborators
pub mod services;
/// Session state machine and controller
pub mod session;
/// Slot coordinates and board layout
pub mod spatial;

pub use io::error::{PuzzleError, Result};
