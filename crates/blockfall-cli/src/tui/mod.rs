mod pump;
mod runner;
mod screen;

pub use self::{
    pump::Pace,
    runner::Tui,
    screen::{Screen, ScreenStack, Transition},
};
