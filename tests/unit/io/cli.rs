//! Tests for command-line parsing and the terminal game loop

#[cfg(test)]
mod tests {
    use clap::Parser;
    use puzzleme::history::recorder::RunRecorder;
    use puzzleme::history::store::MemoryRecordStore;
    use puzzleme::io::cli::{Cli, GameLoop, Mode, PlayArgs, VaultAction, run_vault};
    use puzzleme::io::commands::Command;
    use puzzleme::io::progress::BoardProgress;
    use puzzleme::services::image::ProceduralImageService;
    use puzzleme::services::quiz::NoQuiz;
    use puzzleme::session::controller::SessionController;
    use puzzleme::session::state::Status;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn game(dir: &TempDir) -> GameLoop<ProceduralImageService, NoQuiz, MemoryRecordStore> {
        let controller = SessionController::new(
            ProceduralImageService::new(dir.path()).with_size(30),
            NoQuiz,
            RunRecorder::load(MemoryRecordStore::new()),
        )
        .with_seed(5);
        GameLoop::new(controller, BoardProgress::hidden())
    }

    fn text(output: &[u8]) -> String {
        String::from_utf8_lossy(output).into_owned()
    }

    // Tests CLI parsing with no arguments
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["puzzleme"]);
        assert!(cli.mode.is_none());
        assert!(cli.seed.is_none());
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
        assert!(cli.should_show_progress());
    }

    // Tests the play subcommand with every option
    // Verified by dropping the global flag marker
    #[test]
    fn test_cli_parse_play() {
        let cli = Cli::parse_from([
            "puzzleme",
            "--data-dir",
            "/tmp/pm",
            "play",
            "--dim",
            "4",
            "--prompt",
            "a red fox",
            "--quiz",
            "bank.json",
            "-vv",
            "--seed",
            "9",
        ]);
        assert_eq!(cli.data_dir(), PathBuf::from("/tmp/pm"));
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.mode,
            Some(Mode::Play(PlayArgs {
                dim: Some(4),
                prompt: Some("a red fox".to_string()),
                image: None,
                quiz: Some(PathBuf::from("bank.json")),
            }))
        );
    }

    // Tests prompt and image are mutually exclusive
    // Verified by removing the conflict rule
    #[test]
    fn test_cli_prompt_conflicts_with_image() {
        let parsed = Cli::try_parse_from(["puzzleme", "play", "-p", "fox", "-i", "fox.png"]);
        assert!(parsed.is_err());
    }

    // Tests the vault subcommands
    // Verified by swapping list and clear
    #[test]
    fn test_cli_parse_vault() {
        let cli = Cli::parse_from(["puzzleme", "-q", "vault", "clear"]);
        assert!(cli.quiet);
        assert_eq!(
            cli.mode,
            Some(Mode::Vault {
                action: VaultAction::Clear
            })
        );
    }

    // Tests vault listing and clearing
    // Verified by clearing without persisting
    #[test]
    fn test_run_vault() {
        let mut output = Vec::new();
        let recorder = RunRecorder::load(MemoryRecordStore::new());
        assert!(run_vault(VaultAction::List, recorder, &mut output).is_ok());
        assert!(text(&output).contains("empty"));

        let mut output = Vec::new();
        let recorder = RunRecorder::load(MemoryRecordStore::new());
        assert!(run_vault(VaultAction::Clear, recorder, &mut output).is_ok());
        assert!(text(&output).contains("Removed 0"));
    }

    // Tests a scripted session through the game loop
    // Verified by stopping at the first failed command
    #[test]
    fn test_game_loop_script() {
        let Ok(dir) = TempDir::new() else { return };
        let mut game = game(&dir);
        let script = "dance\nnew a quiet harbour\nstyle sepia\nswap 0 1\nundo\nboard\nreset\nquit\nnew ignored\n";
        let mut output = Vec::new();

        assert!(game.run(script.as_bytes(), &mut output).is_ok());
        let printed = text(&output);
        assert!(printed.contains("Cannot understand 'dance'"));
        assert!(printed.contains("playing"));
        assert!(printed.contains("Image restyled"));
        assert!(printed.contains("Puzzle abandoned"));
        assert_eq!(game.controller().state().status, Status::Idle);
    }

    // Tests failed commands become notices and the loop continues
    // Verified by propagating command errors out of the loop
    #[test]
    fn test_game_loop_notices() {
        let Ok(dir) = TempDir::new() else { return };
        let mut game = game(&dir);
        let mut output = Vec::new();

        let script = "undo\nstyle noir\ndifficulty 9\nupload notes.txt\nquiz\n";
        assert!(game.run(script.as_bytes(), &mut output).is_ok());
        let printed = text(&output);
        assert!(printed.contains("No puzzle in progress"));
        assert!(printed.contains("restyle needs a puzzle in progress"));
        assert!(printed.contains("supported sizes"));
        assert!(printed.contains("notes.txt"));
        assert!(printed.contains("solved"));
    }

    // Tests a rejected startup image becomes a notice and play continues
    // Verified by propagating the opening command's error
    #[test]
    fn test_execute_startup_upload_failure_is_notice() {
        let Ok(dir) = TempDir::new() else { return };
        let notes = dir.path().join("notes.txt");
        assert!(std::fs::write(&notes, "not a picture").is_ok());
        let data_dir = dir.path().join("data");

        let cli = Cli::parse_from([
            "puzzleme".to_string(),
            "-q".to_string(),
            "--data-dir".to_string(),
            data_dir.to_string_lossy().into_owned(),
            "play".to_string(),
            "--image".to_string(),
            notes.to_string_lossy().into_owned(),
        ]);
        let mut output = Vec::new();
        assert!(cli.execute("board\nquit\n".as_bytes(), &mut output).is_ok());

        let printed = text(&output);
        assert!(printed.contains("is not an image"));
        assert!(printed.contains("No puzzle in progress"));
    }

    // Tests a failing command reports through the loop's notice path
    // Verified by returning the command error
    #[test]
    fn test_execute_reporting() {
        let Ok(dir) = TempDir::new() else { return };
        let mut game = game(&dir);
        let mut output = Vec::new();

        assert!(game.execute_reporting(Command::Undo, &mut output).is_ok());
        assert!(game.execute_reporting(Command::New("   ".to_string()), &mut output).is_ok());
        assert!(text(&output).contains("prompt"));
        assert_eq!(game.controller().state().status, Status::Idle);
    }

    // Tests clicking through the loop
    // Verified by swapping on the first click
    #[test]
    fn test_execute_clicks() {
        let Ok(dir) = TempDir::new() else { return };
        let mut game = game(&dir);
        let mut output = Vec::new();

        assert!(game.execute(Command::New("birds".to_string()), &mut output).is_ok());
        assert!(game.execute(Command::Click(2), &mut output).is_ok());
        assert!(text(&output).contains("Tile 2 selected"));
        assert!(game.execute(Command::Click(2), &mut output).is_ok());
        assert!(text(&output).contains("Selection cleared"));
        assert_eq!(game.controller().state().moves, 0);
    }

    // Tests exporting the board through the loop
    // Verified by skipping the export call
    #[test]
    fn test_execute_export() {
        let Ok(dir) = TempDir::new() else { return };
        let mut game = game(&dir);
        let mut output = Vec::new();
        let target = dir.path().join("board.png");

        assert!(game.execute(Command::Export(target.clone()), &mut output).is_err());
        assert!(game.execute(Command::New("river".to_string()), &mut output).is_ok());
        assert!(game.execute(Command::Export(target.clone()), &mut output).is_ok());
        assert!(target.exists());
    }
}
