//! External collaborators the session depends on
//!
//! Image synthesis, quiz generation and file intake live behind these
//! interfaces so the session controller never talks to a remote model or
//! the filesystem directly.

/// Image generation and restyling
pub mod image;
/// Upload validation
pub mod intake;
/// Quiz generation
pub mod quiz;
/// Named restyle presets
pub mod style;

pub use self::image::{ImageService, ProceduralImageService};
pub use quiz::{FileQuizService, NoQuiz, QuizQuestion, QuizService};
pub use style::StylePreset;
