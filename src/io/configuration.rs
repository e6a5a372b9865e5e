//! Game constants and runtime configuration defaults

use std::time::Duration;

/// Grid sizes offered to the player (3x3 easy, 4x4 normal, 5x5 hard)
pub const SUPPORTED_DIMENSIONS: [usize; 3] = [3, 4, 5];

/// Grid size selected when no difficulty has been chosen
pub const DEFAULT_DIMENSION: usize = 3;

// Guards tile generation against runaway allocations
/// Largest grid dimension the generator accepts
pub const MAX_DIMENSION: usize = 64;

/// Number of completed runs kept in the vault
pub const HISTORY_CAPACITY: usize = 20;

/// Storage key for the serialized vault
pub const HISTORY_STORAGE_KEY: &str = "puzzle_history";

/// Interval between timer ticks while a puzzle is being played
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Questions in one quiz round
pub const QUIZ_QUESTION_COUNT: usize = 3;

/// Answer options per quiz question
pub const QUIZ_OPTION_COUNT: usize = 4;

/// Subject recorded for puzzles built from an uploaded file
pub const UPLOADED_IMAGE_PROMPT: &str = "Uploaded Image";

/// Subject recorded when a solved puzzle has no prompt
pub const FALLBACK_PROMPT: &str = "Custom Image";

/// Directory (under the home directory) holding the vault and generated images
pub const DATA_DIR_NAME: &str = ".puzzleme";

/// Subdirectory of the data directory for generated and restyled images
pub const IMAGE_DIR_NAME: &str = "images";

/// Edge length in pixels of procedurally generated images
pub const GENERATED_IMAGE_SIZE: u32 = 512;

/// Width of the board progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "PUZZLEME_LOG";

/// Log filter used when neither the environment nor flags specify one
pub const DEFAULT_LOG_FILTER: &str = "warn";
