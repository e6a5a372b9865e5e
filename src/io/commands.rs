//! Line commands accepted by the interactive terminal session

use std::path::PathBuf;
use std::str::FromStr;

use crate::io::error::{PuzzleError, Result, invalid_command};

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate an image for the prompt and start a puzzle
    New(String),
    /// Start a puzzle from an image file
    Upload(PathBuf),
    /// Choose the grid size before starting
    Difficulty(usize),
    /// Click a tile by id
    Click(usize),
    /// Swap two tiles by id
    Swap(usize, usize),
    /// Reverse the last swap
    Undo,
    /// Restyle with a preset name or a free-form instruction
    Style(String),
    /// Open the subject quiz
    Quiz,
    /// Answer the current quiz question (zero-based option)
    Answer(usize),
    /// Move to the next quiz question
    Next,
    /// Print the board
    Board,
    /// Save the board as a PNG
    Export(PathBuf),
    /// List the vault
    Vault,
    /// Replay a vault entry by id
    Replay(String),
    /// Empty the vault
    ClearVault,
    /// Abandon the puzzle
    Reset,
    /// Show the command list
    Help,
    /// Leave the program
    Quit,
}

/// Help text listing every command
pub const HELP: &str = "\
commands:
  new <prompt>          generate an image and start a puzzle
  upload <path>         start a puzzle from an image file
  difficulty <3|4|5>    choose the grid size (before starting)
  click <id>            select a tile; a second tile swaps them
  swap <a> <b>          swap two tiles by id
  undo                  reverse the last swap
  style <name|text>     restyle: sepia, noir, oil-painting, cyberpunk or free text
  quiz                  take the quiz once solved
  answer <1-4>          answer the current question
  next                  go to the next question
  board                 show the board
  export <path>         save the board as a PNG
  vault                 list completed runs
  replay <id>           play a completed run again
  clear-vault           delete every completed run
  reset                 abandon the puzzle
  help                  show this list
  quit                  leave";

impl FromStr for Command {
    type Err = PuzzleError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_lowercase().as_str() {
            "new" | "generate" => required_text(line, rest, "a prompt").map(Self::New),
            "upload" | "open" => {
                required_text(line, rest, "a file path").map(|path| Self::Upload(path.into()))
            }
            "difficulty" | "dim" => parse_number(line, rest).map(Self::Difficulty),
            "click" => parse_number(line, rest).map(Self::Click),
            "swap" => {
                let mut ids = rest.split_whitespace();
                match (ids.next(), ids.next(), ids.next()) {
                    (Some(a), Some(b), None) => {
                        let (a, b) = (parse_number(line, a)?, parse_number(line, b)?);
                        if a == b {
                            return Err(invalid_command(line, &"choose two different tiles"));
                        }
                        Ok(Self::Swap(a, b))
                    }
                    _ => Err(invalid_command(line, &"expected two tile ids")),
                }
            }
            "undo" => no_arguments(line, rest, Self::Undo),
            "style" | "restyle" => {
                required_text(line, rest, "a style or instruction").map(Self::Style)
            }
            "quiz" => no_arguments(line, rest, Self::Quiz),
            "answer" => match parse_number(line, rest)? {
                0 => Err(invalid_command(line, &"options are numbered from 1")),
                option => Ok(Self::Answer(option - 1)),
            },
            "next" => no_arguments(line, rest, Self::Next),
            "board" | "show" => no_arguments(line, rest, Self::Board),
            "export" => {
                required_text(line, rest, "an output path").map(|path| Self::Export(path.into()))
            }
            "vault" | "history" => no_arguments(line, rest, Self::Vault),
            "replay" => required_text(line, rest, "a run id").map(Self::Replay),
            "clear-vault" => no_arguments(line, rest, Self::ClearVault),
            "reset" => no_arguments(line, rest, Self::Reset),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            "" => Err(invalid_command(line, &"empty input")),
            _ => Err(invalid_command(line, &"unknown command; type 'help'")),
        }
    }
}

fn required_text(line: &str, rest: &str, what: &str) -> Result<String> {
    if rest.is_empty() {
        Err(invalid_command(line, &format!("expected {what}")))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_number(line: &str, text: &str) -> Result<usize> {
    text.parse::<usize>()
        .map_err(|e| invalid_command(line, &format!("'{text}' is not a number: {e}")))
}

fn no_arguments(line: &str, rest: &str, command: Command) -> Result<Command> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(invalid_command(line, &"takes no arguments"))
    }
}
