use clap::{Parser, Subcommand};

mod high_scores;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the game (the default when no subcommand is given)
    Play(#[clap(flatten)] play::PlayArg),
    /// Print the saved high-score table and exit
    HighScores(#[clap(flatten)] high_scores::HighScoresArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(play::PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::HighScores(arg) => high_scores::run(&arg)?,
    }
    Ok(())
}
