mod command;
mod context;
mod input;
mod score_store;
mod screens;
mod sound;
mod tui;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
