//! Session state and its pure transition function
//!
//! Every user action and timer tick is an [`Event`]. Applying an event never
//! mutates the current state; it returns the next one. Pairs of state and
//! event with no defined transition return an unchanged copy.

use std::fmt;

use crate::io::configuration::DEFAULT_DIMENSION;
use crate::puzzle::moves::{MoveLog, MoveRecord};
use crate::puzzle::permutation;
use crate::puzzle::tiles::{ImageHandle, Tile, TileSet};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// No active puzzle
    #[default]
    Idle,
    /// Puzzle active, timer running, swaps accepted
    Playing,
    /// Puzzle restored; swaps no longer accepted
    Solved,
    /// Subject quiz shown over a solved puzzle
    Quiz,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Solved => "solved",
            Self::Quiz => "quiz",
        };
        f.write_str(name)
    }
}

/// Inputs driving the session state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Begin a fresh puzzle with an already generated tile set
    Start {
        /// Source image
        image: ImageHandle,
        /// Prompt or subject text
        prompt: String,
        /// Shuffled tiles
        tiles: TileSet,
    },
    /// Exchange two tiles by id
    Swap {
        /// First tile id
        a: usize,
        /// Second tile id
        b: usize,
    },
    /// Reverse the most recent swap
    Undo,
    /// One second of play elapsed
    Tick,
    /// Replace the source image without moving any tile
    Restyle {
        /// New source image
        image: ImageHandle,
    },
    /// Choose the grid size for the next puzzle
    SetDifficulty(usize),
    /// Open the subject quiz over a solved puzzle
    EnterQuiz,
    /// Close the quiz and return to the solved board
    FinishQuiz,
    /// Discard the puzzle and return to idle
    Reset,
}

/// Complete state of the single active session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Lifecycle status
    pub status: Status,
    /// Source image of the active puzzle
    pub image: Option<ImageHandle>,
    /// Prompt or subject text of the active puzzle
    pub prompt: String,
    /// Active tile set, absent when idle
    pub tiles: Option<TileSet>,
    /// Elapsed seconds of play
    pub timer: u64,
    /// Grid dimension
    pub difficulty: usize,
    /// Swaps performed, less any undone
    pub moves: u32,
    /// Swaps available for undo
    pub move_history: MoveLog,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            status: Status::Idle,
            image: None,
            prompt: String::new(),
            tiles: None,
            timer: 0,
            difficulty: DEFAULT_DIMENSION,
            moves: 0,
            move_history: MoveLog::new(),
        }
    }
}

impl SessionState {
    /// Fresh idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiles of the active puzzle; empty when idle
    pub fn tiles(&self) -> &[Tile] {
        self.tiles.as_ref().map(TileSet::tiles).unwrap_or_default()
    }

    /// Whether the board is currently in its solved arrangement
    pub fn is_solved(&self) -> bool {
        self.tiles.as_ref().is_some_and(permutation::is_solved)
    }

    /// Whether undo would do anything
    pub fn can_undo(&self) -> bool {
        self.status == Status::Playing && !self.move_history.is_empty()
    }

    /// Compute the state that follows `event`
    #[must_use]
    pub fn apply(&self, event: Event) -> Self {
        match (self.status, event) {
            (_, Event::Start { image, prompt, tiles }) => Self {
                status: Status::Playing,
                image: Some(image),
                prompt,
                difficulty: tiles.dim(),
                tiles: Some(tiles),
                timer: 0,
                moves: 0,
                move_history: MoveLog::new(),
            },
            (Status::Playing, Event::Swap { a, b }) => self.swapped(a, b),
            (Status::Playing, Event::Undo) => self.undone(),
            (Status::Playing, Event::Tick) => Self {
                timer: self.timer.saturating_add(1),
                ..self.clone()
            },
            (Status::Playing, Event::Restyle { image }) => {
                let Some(tiles) = &self.tiles else {
                    return self.clone();
                };
                Self {
                    tiles: Some(permutation::restyle(tiles, &image)),
                    image: Some(image),
                    ..self.clone()
                }
            }
            (Status::Idle, Event::SetDifficulty(difficulty)) => Self {
                difficulty,
                ..self.clone()
            },
            (Status::Solved, Event::EnterQuiz) => Self {
                status: Status::Quiz,
                ..self.clone()
            },
            (Status::Quiz, Event::FinishQuiz) => Self {
                status: Status::Solved,
                ..self.clone()
            },
            (_, Event::Reset) => Self::default(),
            (status, event) => {
                tracing::debug!(%status, ?event, "event ignored");
                self.clone()
            }
        }
    }

    fn swapped(&self, a: usize, b: usize) -> Self {
        let Some(tiles) = &self.tiles else {
            return self.clone();
        };
        if tiles.tile(a).is_none() || tiles.tile(b).is_none() {
            tracing::debug!(a, b, "swap with unknown tile ignored");
            return self.clone();
        }

        let (tiles, solved) = permutation::swap(tiles, a, b);
        let mut move_history = self.move_history.clone();
        move_history.push(MoveRecord::new(a, b));

        Self {
            status: if solved {
                Status::Solved
            } else {
                Status::Playing
            },
            tiles: Some(tiles),
            moves: self.moves.saturating_add(1),
            move_history,
            ..self.clone()
        }
    }

    fn undone(&self) -> Self {
        let Some(tiles) = &self.tiles else {
            return self.clone();
        };
        let mut move_history = self.move_history.clone();
        let Some(record) = move_history.pop() else {
            return self.clone();
        };

        Self {
            tiles: Some(permutation::undo(tiles, record)),
            moves: self.moves.saturating_sub(1),
            move_history,
            ..self.clone()
        }
    }
}
