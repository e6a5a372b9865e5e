//! Session orchestration: state transitions, timer, requests and the vault
//!
//! The controller owns the one active session. User actions become
//! [`Event`]s applied through [`SessionState::apply`]. The controller then
//! reacts to the resulting edge: it starts or stops the ticker, clears the
//! selection and records a run on the transition into `Solved`.
//!
//! Calls to the image collaborator are split into a `begin_*` step that
//! issues a [`RequestTicket`] and a `complete_*` step that applies the result.
//! Only the latest generation request may apply, and at most one restyle can
//! be outstanding. Results that arrive after the puzzle they targeted was
//! replaced are discarded. A failed call leaves the session untouched.

use rand::{SeedableRng, rngs::StdRng};
use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::history::record::HistoryItem;
use crate::history::recorder::RunRecorder;
use crate::history::store::RecordStore;
use crate::io::configuration::{SUPPORTED_DIMENSIONS, UPLOADED_IMAGE_PROMPT};
use crate::io::error::{PuzzleError, Result, generation_error, invalid_parameter};
use crate::puzzle::tiles::{ImageHandle, TileSet};
use crate::services::image::ImageService;
use crate::services::intake::intake_image_file;
use crate::services::quiz::QuizService;
use crate::services::style::StylePreset;
use crate::session::quiz::{AnswerFeedback, QuizProgress, QuizRound};
use crate::session::selection::Selection;
use crate::session::state::{Event, SessionState, Status};
use crate::session::timer::Ticker;

/// Kind of collaborator request a ticket belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Image generation for a new puzzle
    Generate,
    /// Restyle of the active puzzle's image
    Restyle,
}

/// Handle for an outstanding collaborator request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    kind: RequestKind,
    id: u64,
    epoch: u64,
    text: String,
    difficulty: usize,
    source: Option<ImageHandle>,
}

impl RequestTicket {
    /// Kind of request
    pub const fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Prompt (generation) or instruction (restyle) to send
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Image being restyled; `None` for generation requests
    pub const fn source(&self) -> Option<&ImageHandle> {
        self.source.as_ref()
    }
}

/// Orchestrates one puzzle session over its collaborators
pub struct SessionController<I: ImageService, Q: QuizService, S: RecordStore> {
    state: SessionState,
    recorder: RunRecorder<S>,
    images: I,
    quizzes: Q,
    rng: StdRng,
    selection: Selection,
    ticker: Ticker,
    quiz: Option<QuizRound>,
    epoch: u64,
    next_request_id: u64,
    latest_generation: Option<u64>,
    pending_restyle: Option<u64>,
}

impl<I: ImageService, Q: QuizService, S: RecordStore> SessionController<I, Q, S> {
    /// Create an idle controller with an entropy-seeded shuffle
    pub fn new(images: I, quizzes: Q, recorder: RunRecorder<S>) -> Self {
        Self {
            state: SessionState::new(),
            recorder,
            images,
            quizzes,
            rng: StdRng::from_os_rng(),
            selection: Selection::new(),
            ticker: Ticker::new(),
            quiz: None,
            epoch: 0,
            next_request_id: 0,
            latest_generation: None,
            pending_restyle: None,
        }
    }

    /// Use a fixed seed so shuffles are reproducible
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Current session state
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Completed runs, newest first
    pub fn history(&self) -> &[HistoryItem] {
        self.recorder.items()
    }

    /// The run recorder
    pub const fn recorder(&self) -> &RunRecorder<S> {
        &self.recorder
    }

    /// Swap selection cursor
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Active quiz round, if any
    pub const fn quiz(&self) -> Option<&QuizRound> {
        self.quiz.as_ref()
    }

    /// Whether the timer is currently scheduled
    pub const fn is_timer_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Whether a request of `kind` is outstanding
    pub const fn is_pending(&self, kind: RequestKind) -> bool {
        match kind {
            RequestKind::Generate => self.latest_generation.is_some(),
            RequestKind::Restyle => self.pending_restyle.is_some(),
        }
    }

    /// Choose the grid size for the next puzzle
    ///
    /// # Errors
    ///
    /// Returns an error if the size is unsupported or a puzzle is active
    pub fn set_difficulty(&mut self, dim: usize) -> Result<()> {
        validate_difficulty(dim)?;
        if self.state.status != Status::Idle {
            return Err(invalid_parameter(
                "difficulty",
                &dim,
                &"difficulty can only change before a puzzle starts",
            ));
        }
        self.dispatch(Event::SetDifficulty(dim))
    }

    /// Generate an image for `prompt` and start a puzzle from it
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt is empty or generation fails; the
    /// session is unchanged in either case
    pub fn generate_puzzle(&mut self, prompt: &str) -> Result<()> {
        let ticket = self.begin_generate(prompt)?;
        let result = self.images.generate_image(ticket.text());
        self.complete_generate(ticket, result).map(|_| ())
    }

    /// Register a generation request for `prompt`
    ///
    /// A newer request supersedes any outstanding one.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt is empty
    pub fn begin_generate(&mut self, prompt: &str) -> Result<RequestTicket> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(invalid_parameter("prompt", &prompt, &"prompt is empty"));
        }
        let ticket = self.issue(RequestKind::Generate, prompt.to_string(), None);
        if self.latest_generation.replace(ticket.id).is_some() {
            tracing::debug!(id = ticket.id, "generation request supersedes an outstanding one");
        }
        Ok(ticket)
    }

    /// Apply the outcome of a generation request
    ///
    /// Returns `Ok(false)` when the ticket was superseded and its result discarded.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's error, or a tile generation error; the
    /// session is unchanged in either case
    pub fn complete_generate(
        &mut self,
        ticket: RequestTicket,
        result: Result<ImageHandle>,
    ) -> Result<bool> {
        if ticket.kind != RequestKind::Generate || self.latest_generation != Some(ticket.id) {
            tracing::debug!(id = ticket.id, "discarding stale generation result");
            return Ok(false);
        }
        self.latest_generation = None;

        let image = result.inspect_err(|e| tracing::warn!(error = %e, "image generation failed"))?;
        let tiles = TileSet::generate(image.clone(), ticket.difficulty, &mut self.rng)?;
        self.start(image, ticket.text, tiles)?;
        Ok(true)
    }

    /// Start a puzzle from a user-supplied image file
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::InvalidFile`] for non-image files; the session is
    /// unchanged
    pub fn upload_image(&mut self, path: &Path) -> Result<()> {
        let image = intake_image_file(path)?;
        let tiles = TileSet::generate(image.clone(), self.state.difficulty, &mut self.rng)?;
        self.start(image, UPLOADED_IMAGE_PROMPT.to_string(), tiles)
    }

    /// Replay a vault entry with a fresh shuffle at its original difficulty
    ///
    /// # Errors
    ///
    /// Returns an error if no entry has this id or its difficulty is unsupported
    pub fn replay(&mut self, id: &str) -> Result<()> {
        let Some(item) = self.recorder.get(id).cloned() else {
            return Err(invalid_parameter("history id", &id, &"no such run"));
        };
        validate_difficulty(item.difficulty)?;
        let tiles = TileSet::generate(item.image.clone(), item.difficulty, &mut self.rng)?;
        self.start(item.image, item.prompt, tiles)
    }

    /// Register a click on a tile, swapping once two tiles are chosen
    ///
    /// Returns whether a swap happened.
    ///
    /// # Errors
    ///
    /// Returns an error only if a solving swap could not be persisted
    pub fn click_tile(&mut self, id: usize) -> Result<bool> {
        if self.state.status != Status::Playing {
            return Ok(false);
        }
        match self.selection.click(id) {
            Some((a, b)) => {
                self.swap(a, b)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Swap two tiles by id
    ///
    /// Returns whether the puzzle is solved afterwards. The swap that solves
    /// the puzzle records the run in the vault.
    ///
    /// # Errors
    ///
    /// Returns an error if the solved run could not be persisted; the session
    /// has still moved to `Solved`
    pub fn swap(&mut self, a: usize, b: usize) -> Result<bool> {
        self.dispatch(Event::Swap { a, b })?;
        Ok(self.state.status == Status::Solved)
    }

    /// Reverse the most recent swap
    ///
    /// # Errors
    ///
    /// Never fails in practice; shares the dispatch signature
    pub fn undo(&mut self) -> Result<()> {
        self.dispatch(Event::Undo)
    }

    /// Advance the timer by one tick
    ///
    /// # Errors
    ///
    /// Never fails in practice; shares the dispatch signature
    pub fn tick(&mut self) -> Result<()> {
        self.dispatch(Event::Tick)
    }

    /// Deliver every tick that elapsed up to `now`
    ///
    /// Returns the number of ticks applied.
    ///
    /// # Errors
    ///
    /// Never fails in practice; shares the dispatch signature
    pub fn advance_clock(&mut self, now: Instant) -> Result<u64> {
        let due = self.ticker.due_ticks(now);
        for _ in 0..due {
            self.tick()?;
        }
        Ok(due)
    }

    /// Restyle the active puzzle with a preset
    ///
    /// # Errors
    ///
    /// See [`Self::restyle`]
    pub fn restyle_preset(&mut self, preset: StylePreset) -> Result<bool> {
        self.restyle(preset.instruction())
    }

    /// Restyle the active puzzle following a free-form instruction
    ///
    /// Returns whether the new image was applied.
    ///
    /// # Errors
    ///
    /// Returns an error if no puzzle is in progress, a restyle is already
    /// outstanding, or the edit fails
    pub fn restyle(&mut self, instruction: &str) -> Result<bool> {
        let ticket = self.begin_restyle(instruction)?;
        let result = match ticket.source() {
            Some(source) => self.images.edit_image(ticket.text(), source),
            None => Err(generation_error("edit image", &"no source image")),
        };
        self.complete_restyle(ticket, result)
    }

    /// Register a restyle request for the active puzzle
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::RequestInFlight`] while another restyle is
    /// outstanding, or an error if no puzzle is in progress or the
    /// instruction is empty
    pub fn begin_restyle(&mut self, instruction: &str) -> Result<RequestTicket> {
        if self.pending_restyle.is_some() {
            tracing::debug!("restyle rejected; one is already outstanding");
            return Err(PuzzleError::RequestInFlight {
                operation: "restyle",
            });
        }
        if self.state.status != Status::Playing {
            return Err(invalid_parameter(
                "status",
                &self.state.status,
                &"restyle needs a puzzle in progress",
            ));
        }
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(invalid_parameter(
                "instruction",
                &instruction,
                &"instruction is empty",
            ));
        }

        let source = self.state.image.clone();
        let ticket = self.issue(RequestKind::Restyle, instruction.to_string(), source);
        self.pending_restyle = Some(ticket.id);
        Ok(ticket)
    }

    /// Apply the outcome of a restyle request
    ///
    /// Returns `Ok(false)` when the result was discarded because the puzzle it
    /// targeted is gone or no longer in progress.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's error; the session is unchanged
    pub fn complete_restyle(
        &mut self,
        ticket: RequestTicket,
        result: Result<ImageHandle>,
    ) -> Result<bool> {
        if ticket.kind != RequestKind::Restyle || self.pending_restyle != Some(ticket.id) {
            tracing::debug!(id = ticket.id, "discarding restyle for a replaced puzzle");
            return Ok(false);
        }
        self.pending_restyle = None;

        if ticket.epoch != self.epoch || self.state.status != Status::Playing {
            tracing::debug!(id = ticket.id, "discarding restyle for a replaced puzzle");
            return Ok(false);
        }

        let image = result.inspect_err(|e| tracing::warn!(error = %e, "restyle failed"))?;
        self.dispatch(Event::Restyle { image })?;
        Ok(true)
    }

    /// Open the subject quiz over a solved puzzle
    ///
    /// Returns the number of questions.
    ///
    /// # Errors
    ///
    /// Returns an error if the puzzle is not solved or no questions came back;
    /// the session stays solved
    pub fn start_quiz(&mut self) -> Result<usize> {
        if self.state.status != Status::Solved {
            return Err(invalid_parameter(
                "status",
                &self.state.status,
                &"the quiz opens once the puzzle is solved",
            ));
        }
        let questions = self.quizzes.generate_quiz(&self.state.prompt);
        let Some(round) = QuizRound::new(questions) else {
            return Err(generation_error("generate quiz", &"no questions returned"));
        };
        let count = round.len();
        self.quiz = Some(round);
        self.dispatch(Event::EnterQuiz)?;
        Ok(count)
    }

    /// Answer the current quiz question
    pub fn answer_quiz(&mut self, option: usize) -> Option<AnswerFeedback> {
        if self.state.status != Status::Quiz {
            return None;
        }
        self.quiz.as_mut()?.answer(option)
    }

    /// Move to the next quiz question, closing the quiz after the last one
    ///
    /// # Errors
    ///
    /// Never fails in practice; shares the dispatch signature
    pub fn next_quiz_question(&mut self) -> Result<Option<QuizProgress>> {
        if self.state.status != Status::Quiz {
            return Ok(None);
        }
        let Some(progress) = self.quiz.as_mut().and_then(QuizRound::advance) else {
            return Ok(None);
        };
        if let QuizProgress::Complete { score } = progress {
            tracing::info!(score, "quiz complete");
            self.quiz = None;
            self.dispatch(Event::FinishQuiz)?;
        }
        Ok(Some(progress))
    }

    /// Discard the active puzzle and return to idle
    ///
    /// # Errors
    ///
    /// Never fails in practice; shares the dispatch signature
    pub fn reset(&mut self) -> Result<()> {
        self.epoch += 1;
        self.pending_restyle = None;
        self.quiz = None;
        self.dispatch(Event::Reset)
    }

    /// Empty the vault
    ///
    /// # Errors
    ///
    /// Returns an error if the empty vault cannot be persisted
    pub fn clear_history(&mut self) -> Result<()> {
        self.recorder.clear()
    }

    fn start(&mut self, image: ImageHandle, prompt: String, tiles: TileSet) -> Result<()> {
        self.epoch += 1;
        self.latest_generation = None;
        self.pending_restyle = None;
        self.quiz = None;
        self.selection.clear();
        self.ticker.stop();
        tracing::info!(dim = tiles.dim(), prompt = %prompt, "starting puzzle");
        self.dispatch(Event::Start {
            image,
            prompt,
            tiles,
        })
    }

    fn issue(&mut self, kind: RequestKind, text: String, source: Option<ImageHandle>) -> RequestTicket {
        self.next_request_id += 1;
        RequestTicket {
            kind,
            id: self.next_request_id,
            epoch: self.epoch,
            text,
            difficulty: self.state.difficulty,
            source,
        }
    }

    fn dispatch(&mut self, event: Event) -> Result<()> {
        let previous = self.state.status;
        let next = self.state.apply(event);
        let solved_now = previous == Status::Playing && next.status == Status::Solved;
        if previous != next.status {
            tracing::info!(from = %previous, to = %next.status, "session transition");
        }
        self.state = next;
        self.sync_clock();

        if solved_now {
            self.record_solve()?;
        }
        Ok(())
    }

    fn sync_clock(&mut self) {
        if self.state.status == Status::Playing {
            if !self.ticker.is_running() {
                self.ticker.start(Instant::now());
            }
        } else {
            self.ticker.stop();
            self.selection.clear();
        }
    }

    fn record_solve(&mut self) -> Result<()> {
        // Ids are timestamps; keep them unique when solves share a millisecond
        let after_newest = self
            .recorder
            .items()
            .first()
            .map_or(0, |newest| newest.timestamp.saturating_add(1));
        let timestamp = unix_millis().max(after_newest);
        let Some(item) = HistoryItem::from_session(&self.state, timestamp) else {
            return Ok(());
        };
        tracing::info!(
            moves = item.moves,
            time = item.time,
            difficulty = item.difficulty,
            "puzzle solved"
        );
        self.recorder.append(item).map(|_| ())
    }
}

fn validate_difficulty(dim: usize) -> Result<()> {
    if SUPPORTED_DIMENSIONS.contains(&dim) {
        Ok(())
    } else {
        Err(invalid_parameter(
            "difficulty",
            &dim,
            &format!("supported sizes are {SUPPORTED_DIMENSIONS:?}"),
        ))
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
