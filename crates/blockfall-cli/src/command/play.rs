use std::path::PathBuf;

use anyhow::ensure;
use blockfall_engine::BoardConfig;

use crate::{
    command::high_scores::DEFAULT_SCORE_FILE,
    context::AppContext,
    score_store::ScoreStore,
    screens::TitleScreen,
    sound::SilentSink,
    tui::{ScreenStack, Tui},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path of the high-score file
    #[clap(long, default_value = DEFAULT_SCORE_FILE)]
    score_file: PathBuf,
    /// Grid width in columns
    #[clap(long, default_value_t = 10)]
    width: usize,
    /// Grid height in rows
    #[clap(long, default_value_t = 20)]
    height: usize,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            score_file: PathBuf::from(DEFAULT_SCORE_FILE),
            width: 10,
            height: 20,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    ensure!(
        arg.width >= 4 && arg.height >= 4,
        "the grid must be at least 4x4 to fit a piece"
    );
    let config = BoardConfig::new(arg.width, arg.height);
    let store = ScoreStore::new(arg.score_file.clone());
    let mut ctx = AppContext::new(config, store, Box::new(SilentSink));
    let mut stack = ScreenStack::new(Box::new(TitleScreen::new()));

    Tui::new().run(&mut ctx, &mut stack)
}
