//! Terminal progress display for the active board

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::puzzle::permutation;
use crate::session::state::SessionState;
use crate::session::timer::format_time;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static BOARD_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} in place {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows how many tiles sit in their home slot, with moves and elapsed time
///
/// One bar step per tile. A hidden bar keeps its position and message so
/// callers behave the same with and without `--quiet`.
pub struct BoardProgress {
    bar: ProgressBar,
}

impl BoardProgress {
    /// Visible bar drawn to stderr
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(BOARD_STYLE.clone());
        Self { bar }
    }

    /// Bar that never draws
    pub fn hidden() -> Self {
        let progress = Self::new();
        progress.bar.set_draw_target(ProgressDrawTarget::hidden());
        progress
    }

    /// Visible unless `quiet`
    pub fn for_quiet(quiet: bool) -> Self {
        if quiet { Self::hidden() } else { Self::new() }
    }

    /// Refresh the bar from the session
    pub fn update(&self, state: &SessionState) {
        let (placed, total) = state
            .tiles
            .as_ref()
            .map_or((0, 0), |tiles| (permutation::correct_count(tiles), tiles.len()));

        self.bar.set_length(total as u64);
        self.bar.set_position(placed as u64);
        self.bar.set_prefix(state.status.to_string());
        self.bar.set_message(format!(
            "moves {} time {}",
            state.moves,
            format_time(state.timer)
        ));
    }

    /// Tiles currently in place
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Tiles on the board
    pub fn length(&self) -> u64 {
        self.bar.length().unwrap_or(0)
    }

    /// Current message text
    pub fn message(&self) -> String {
        self.bar.message()
    }

    /// Leave the final state on screen
    pub fn finish(&self) {
        self.bar.finish();
    }

    /// Remove the bar from the terminal
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for BoardProgress {
    fn default() -> Self {
        Self::new()
    }
}
