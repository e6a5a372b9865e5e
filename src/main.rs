//! CLI entry point for the picture puzzle game

use clap::Parser;
use puzzleme::io::cli::Cli;
use puzzleme::io::logging::init_logging;

fn main() -> puzzleme::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    cli.execute(stdin.lock(), &mut stdout)
}
