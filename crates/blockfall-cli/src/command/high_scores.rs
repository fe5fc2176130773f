use std::path::PathBuf;

use crate::score_store::ScoreStore;

pub(crate) const DEFAULT_SCORE_FILE: &str = "./data/high_scores.json";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HighScoresArg {
    /// Path of the high-score file
    #[clap(long, default_value = DEFAULT_SCORE_FILE)]
    score_file: PathBuf,
}

pub(crate) fn run(arg: &HighScoresArg) -> anyhow::Result<()> {
    let table = ScoreStore::new(arg.score_file.clone()).load();
    if table.is_empty() {
        println!("no high scores recorded yet");
        return Ok(());
    }
    for (index, entry) in table.entries().iter().enumerate() {
        println!(
            "{rank:>2}. {name:<12} {score:>7}  {date}",
            rank = index + 1,
            name = entry.name,
            score = entry.score,
            date = entry.date,
        );
    }
    Ok(())
}
