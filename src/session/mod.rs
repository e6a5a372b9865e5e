//! The single active puzzle session
//!
//! This module contains the session layer:
//! - The pure state machine over [`state::Event`]s
//! - The controller that drives collaborators, the timer and the vault
//! - The selection cursor, play timer and quiz round it coordinates

/// Session orchestration and the request ticket protocol
pub mod controller;
/// Quiz round progress and scoring
pub mod quiz;
/// Two-click swap selection
pub mod selection;
/// Session state and transitions
pub mod state;
/// Play timer
pub mod timer;

pub use controller::{RequestKind, RequestTicket, SessionController};
pub use state::{Event, SessionState, Status};
