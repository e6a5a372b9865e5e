//! Command-line interface and the interactive terminal game loop

use crate::history::recorder::RunRecorder;
use crate::history::store::{FileRecordStore, RecordStore};
use crate::io::commands::{Command, HELP};
use crate::io::configuration::{DATA_DIR_NAME, IMAGE_DIR_NAME};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_board_as_png;
use crate::io::progress::BoardProgress;
use crate::services::image::{ImageService, ProceduralImageService};
use crate::services::quiz::{FileQuizService, NoQuiz, QuizService};
use crate::services::style::StylePreset;
use crate::session::controller::SessionController;
use crate::session::quiz::{QuizProgress, QuizRound};
use crate::session::state::Status;
use crate::session::timer::format_time;
use crate::spatial::grid::BoardLayout;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "puzzleme")]
#[command(
    author,
    version,
    about = "Solve sliding-swap picture puzzles generated from a prompt"
)]
/// Command-line arguments for the puzzle game
pub struct Cli {
    /// Directory holding the vault and generated images
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Random seed for reproducible shuffles
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Suppress the progress bar and most logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// What to do; defaults to an interactive game
    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// Top-level subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Play interactively
    Play(PlayArgs),
    /// Inspect or clear completed runs
    Vault {
        /// Vault operation
        #[command(subcommand)]
        action: VaultAction,
    },
}

/// Options for an interactive game
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayArgs {
    /// Grid size for the first puzzle (3, 4 or 5)
    #[arg(short, long)]
    pub dim: Option<usize>,

    /// Start immediately with an image generated for this prompt
    #[arg(short, long, conflicts_with = "image")]
    pub prompt: Option<String>,

    /// Start immediately from this image file
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// JSON question bank enabling the post-solve quiz
    #[arg(long, value_name = "FILE")]
    pub quiz: Option<PathBuf>,
}

/// Vault subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultAction {
    /// List completed runs, newest first
    List,
    /// Delete every completed run
    Clear,
}

impl Cli {
    /// Directory for persistent data
    ///
    /// Uses `--data-dir` when given, otherwise a directory under the user's home
    /// (or the working directory when no home is known).
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .or_else(|| std::env::var_os("USERPROFILE"))
                .map_or_else(PathBuf::new, PathBuf::from)
                .join(DATA_DIR_NAME)
        })
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Run the selected mode against the given terminal streams
    ///
    /// # Errors
    ///
    /// Returns an error if the initial setup fails or the terminal cannot be written
    pub fn execute<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> Result<()> {
        let data_dir = self.data_dir();
        let recorder = RunRecorder::load(FileRecordStore::new(&data_dir));

        match &self.mode {
            Some(Mode::Vault { action }) => run_vault(*action, recorder, output),
            Some(Mode::Play(args)) => self.play(args, recorder, input, output),
            None => self.play(&PlayArgs::default(), recorder, input, output),
        }
    }

    fn play<R: BufRead, W: Write>(
        &self,
        args: &PlayArgs,
        recorder: RunRecorder<FileRecordStore>,
        input: R,
        output: &mut W,
    ) -> Result<()> {
        let images = ProceduralImageService::new(self.data_dir().join(IMAGE_DIR_NAME));
        let quizzes: Box<dyn QuizService> = match &args.quiz {
            Some(path) => Box::new(FileQuizService::new(path)),
            None => Box::new(NoQuiz),
        };

        let mut controller = SessionController::new(images, quizzes, recorder);
        if let Some(seed) = self.seed {
            controller = controller.with_seed(seed);
        }
        if let Some(dim) = args.dim {
            controller.set_difficulty(dim)?;
        }

        let mut game = GameLoop::new(controller, BoardProgress::for_quiet(self.quiet));
        let opening = match (&args.image, &args.prompt) {
            (Some(path), _) => Some(Command::Upload(path.clone())),
            (None, Some(prompt)) => Some(Command::New(prompt.clone())),
            (None, None) => None,
        };
        if let Some(command) = opening {
            game.execute_reporting(command, output)?;
        }
        game.run(input, output)
    }
}

/// Carry out a vault subcommand
///
/// # Errors
///
/// Returns an error if clearing cannot be persisted or the output cannot be written
pub fn run_vault<S: RecordStore, W: Write>(
    action: VaultAction,
    mut recorder: RunRecorder<S>,
    output: &mut W,
) -> Result<()> {
    match action {
        VaultAction::List => write_vault(&recorder, output),
        VaultAction::Clear => {
            let removed = recorder.len();
            recorder.clear()?;
            writeln!(output, "Removed {removed} completed runs")?;
            Ok(())
        }
    }
}

/// Write the vault listing, newest first
///
/// # Errors
///
/// Returns an error if the output cannot be written
pub fn write_vault<S: RecordStore, W: Write>(recorder: &RunRecorder<S>, output: &mut W) -> Result<()> {
    if recorder.is_empty() {
        writeln!(output, "The vault is empty")?;
        return Ok(());
    }
    for item in recorder.items() {
        writeln!(
            output,
            "{}  {}x{}  {:>3} moves  {}  {}",
            item.id,
            item.difficulty,
            item.difficulty,
            item.moves,
            format_time(item.time),
            item.prompt
        )?;
    }
    Ok(())
}

/// Line-driven game loop over one session controller
pub struct GameLoop<I: ImageService, Q: QuizService, S: RecordStore> {
    controller: SessionController<I, Q, S>,
    progress: BoardProgress,
}

impl<I: ImageService, Q: QuizService, S: RecordStore> GameLoop<I, Q, S> {
    /// Create a game loop around a controller
    pub const fn new(controller: SessionController<I, Q, S>, progress: BoardProgress) -> Self {
        Self {
            controller,
            progress,
        }
    }

    /// The driven controller
    pub const fn controller(&self) -> &SessionController<I, Q, S> {
        &self.controller
    }

    /// Read commands until `quit` or end of input
    ///
    /// Failed commands are reported as notices and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read or output cannot be written
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        writeln!(output, "{HELP}")?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            self.controller.advance_clock(Instant::now())?;

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute_reporting(command, output)?,
                Err(e) => writeln!(output, "{e}")?,
            }
            self.progress.update(self.controller.state());
        }

        self.progress.finish();
        Ok(())
    }

    /// Carry out one command, printing a failure as a notice instead of returning it
    ///
    /// # Errors
    ///
    /// Returns an error only if the notice cannot be written
    pub fn execute_reporting<W: Write>(&mut self, command: Command, output: &mut W) -> Result<()> {
        if let Err(e) = self.execute(command, output) {
            tracing::debug!(error = ?e, "command failed");
            if e.is_user_visible() {
                writeln!(output, "{e}")?;
            }
        }
        Ok(())
    }

    /// Carry out one command
    ///
    /// # Errors
    ///
    /// Returns the controller's error for the command, or an output error
    pub fn execute<W: Write>(&mut self, command: Command, output: &mut W) -> Result<()> {
        match command {
            Command::New(prompt) => {
                self.controller.generate_puzzle(&prompt)?;
                self.write_board(output)
            }
            Command::Upload(path) => {
                self.controller.upload_image(&path)?;
                self.write_board(output)
            }
            Command::Difficulty(dim) => {
                self.controller.set_difficulty(dim)?;
                writeln!(output, "Difficulty set to {dim}x{dim}")?;
                Ok(())
            }
            Command::Click(id) => {
                if self.controller.click_tile(id)? {
                    self.write_board(output)
                } else if let Some(armed) = self.controller.selection().armed() {
                    writeln!(output, "Tile {armed} selected")?;
                    Ok(())
                } else {
                    writeln!(output, "Selection cleared")?;
                    Ok(())
                }
            }
            Command::Swap(a, b) => {
                self.controller.swap(a, b)?;
                self.write_board(output)
            }
            Command::Undo => {
                self.controller.undo()?;
                self.write_board(output)
            }
            Command::Style(text) => {
                let instruction = text
                    .parse::<StylePreset>()
                    .map_or(text, |preset| preset.instruction().to_string());
                if self.controller.restyle(&instruction)? {
                    writeln!(output, "Image restyled")?;
                } else {
                    writeln!(output, "Restyle discarded")?;
                }
                Ok(())
            }
            Command::Quiz => {
                let count = self.controller.start_quiz()?;
                writeln!(output, "Quiz: {count} questions about {}", self.controller.state().prompt)?;
                self.write_question(output)
            }
            Command::Answer(option) => {
                match self.controller.answer_quiz(option) {
                    Some(feedback) if feedback.correct => {
                        writeln!(output, "Correct! {}", feedback.explanation)?;
                    }
                    Some(feedback) => writeln!(
                        output,
                        "Not quite; the answer was {}. {}",
                        feedback.correct_index + 1,
                        feedback.explanation
                    )?,
                    None => writeln!(output, "No answer taken")?,
                }
                Ok(())
            }
            Command::Next => {
                let total = self.controller.quiz().map_or(0, QuizRound::len);
                match self.controller.next_quiz_question()? {
                    Some(QuizProgress::Next { .. }) => self.write_question(output),
                    Some(QuizProgress::Complete { score }) => {
                        writeln!(output, "Quiz complete: {score}/{total}")?;
                        Ok(())
                    }
                    None => {
                        writeln!(output, "Answer the current question first")?;
                        Ok(())
                    }
                }
            }
            Command::Board => self.write_board(output),
            Command::Export(path) => {
                let tiles = self.controller.state().tiles.as_ref().ok_or_else(|| {
                    invalid_parameter("board", &"empty", &"no puzzle to export")
                })?;
                export_board_as_png(tiles, &path)?;
                writeln!(output, "Saved board to {}", path.display())?;
                Ok(())
            }
            Command::Vault => write_vault(self.controller.recorder(), output),
            Command::Replay(id) => {
                self.controller.replay(&id)?;
                self.write_board(output)
            }
            Command::ClearVault => {
                self.controller.clear_history()?;
                writeln!(output, "Vault cleared")?;
                Ok(())
            }
            Command::Reset => {
                self.controller.reset()?;
                writeln!(output, "Puzzle abandoned")?;
                Ok(())
            }
            Command::Help => {
                writeln!(output, "{HELP}")?;
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    fn write_board<W: Write>(&self, output: &mut W) -> Result<()> {
        let state = self.controller.state();
        let Some(tiles) = &state.tiles else {
            writeln!(output, "No puzzle in progress")?;
            return Ok(());
        };

        write!(output, "{}", BoardLayout::from_tiles(tiles))?;
        writeln!(
            output,
            "{}  moves {}  time {}",
            state.status,
            state.moves,
            format_time(state.timer)
        )?;
        if state.status == Status::Solved {
            writeln!(
                output,
                "Solved \"{}\" in {} moves and {}",
                state.prompt,
                state.moves,
                format_time(state.timer)
            )?;
        }
        Ok(())
    }

    fn write_question<W: Write>(&self, output: &mut W) -> Result<()> {
        let Some(question) = self.controller.quiz().and_then(QuizRound::current_question) else {
            return Ok(());
        };
        writeln!(output, "{}", question.question)?;
        for (index, option) in question.options.iter().enumerate() {
            writeln!(output, "  {}. {option}", index + 1)?;
        }
        Ok(())
    }
}
