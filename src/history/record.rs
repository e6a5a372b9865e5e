//! Snapshot of one completed puzzle run

use serde::{Deserialize, Serialize};

use crate::io::configuration::FALLBACK_PROMPT;
use crate::puzzle::tiles::ImageHandle;
use crate::session::state::SessionState;

/// Immutable record of a solved puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    /// Unique record id (solve time in milliseconds)
    pub id: String,
    /// Source image of the solved puzzle
    pub image: ImageHandle,
    /// Prompt or subject text
    pub prompt: String,
    /// Grid dimension
    pub difficulty: usize,
    /// Elapsed seconds at the moment of solving
    pub time: u64,
    /// Move count including the solving swap
    pub moves: u32,
    /// Solve time in milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl HistoryItem {
    /// Snapshot a session at the instant it was solved
    ///
    /// Returns `None` when the session has no image, which only happens for
    /// an idle session.
    pub fn from_session(state: &SessionState, timestamp: u64) -> Option<Self> {
        let image = state.image.clone()?;
        let prompt = if state.prompt.trim().is_empty() {
            FALLBACK_PROMPT.to_string()
        } else {
            state.prompt.clone()
        };
        Some(Self {
            id: timestamp.to_string(),
            image,
            prompt,
            difficulty: state.difficulty,
            time: state.timer,
            moves: state.moves,
            timestamp,
        })
    }
}
