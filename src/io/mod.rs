//! Input/output, configuration and error handling
//!
//! This module contains everything between the puzzle core and the terminal:
//! - The crate error type and game constants
//! - Logging setup, the command-line interface and line commands
//! - Board progress display and PNG export

/// Command-line interface and game loop
pub mod cli;
/// Interactive line commands
pub mod commands;
/// Game constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG export of the board
pub mod image;
/// Diagnostic logging setup
pub mod logging;
/// Terminal progress display
pub mod progress;
