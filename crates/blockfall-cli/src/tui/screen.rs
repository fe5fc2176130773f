use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use crate::{context::AppContext, tui::Tui};

/// One screen of the application (title, menu, playing, ...).
///
/// The active screen receives every event and tick and answers with a
/// [`Transition`] that the [`ScreenStack`] applies. `on_active` fires
/// whenever the screen reaches the top of the stack, both when first
/// shown and when a screen above it pops; set the [`Tui`] pace there,
/// since it is shared loop state.
pub trait Screen: fmt::Debug {
    /// Called when this screen becomes the active (topmost) one.
    fn on_active(&mut self, _ctx: &mut AppContext, _tui: &mut Tui) {}

    /// Handles a terminal event and decides where to go next.
    fn handle_event(&mut self, ctx: &mut AppContext, tui: &mut Tui, event: &Event) -> Transition;

    /// Advances screen state by one frame. Only paced screens need this.
    fn update(&mut self, _ctx: &mut AppContext, _tui: &mut Tui) -> Transition {
        Transition::Stay
    }

    /// Renders the screen.
    fn draw(&self, ctx: &AppContext, frame: &mut Frame);
}

/// Where the stack goes after a screen handled an event or tick.
#[derive(Debug)]
pub enum Transition {
    /// Stay on the current screen.
    Stay,
    /// Replace the current screen with a new one.
    Switch(Box<dyn Screen>),
    /// Put a new screen on top; the current one resumes when it pops.
    Push(Box<dyn Screen>),
    /// Remove the current screen and resume the one below.
    Pop,
    /// Drop the whole stack and start over with a new screen. Used when
    /// a buried screen must go too (restarting from the pause menu).
    ResetTo(Box<dyn Screen>),
    /// Exit the application.
    Quit,
}

/// Stack of screens; the top one is active.
#[derive(Debug)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
    should_quit: bool,
}

impl ScreenStack {
    #[must_use]
    pub fn new(initial: Box<dyn Screen>) -> Self {
        Self {
            screens: vec![initial],
            should_quit: false,
        }
    }

    /// Activates the initial screen. Call once before the event loop.
    pub fn init(&mut self, ctx: &mut AppContext, tui: &mut Tui) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active(ctx, tui);
        }
    }

    #[must_use]
    pub fn should_exit(&self) -> bool {
        self.should_quit || self.screens.is_empty()
    }

    pub fn handle_event(&mut self, ctx: &mut AppContext, tui: &mut Tui, event: &Event) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.handle_event(ctx, tui, event);
            self.apply(ctx, tui, transition);
        }
    }

    pub fn update(&mut self, ctx: &mut AppContext, tui: &mut Tui) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.update(ctx, tui);
            self.apply(ctx, tui, transition);
        }
    }

    pub fn draw(&self, ctx: &AppContext, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(ctx, frame);
        }
    }

    fn apply(&mut self, ctx: &mut AppContext, tui: &mut Tui, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Switch(mut screen) => {
                self.screens.pop();
                screen.on_active(ctx, tui);
                self.screens.push(screen);
            }
            Transition::Push(mut screen) => {
                screen.on_active(ctx, tui);
                self.screens.push(screen);
            }
            Transition::Pop => {
                self.screens.pop();
                if let Some(previous) = self.screens.last_mut() {
                    previous.on_active(ctx, tui);
                }
            }
            Transition::ResetTo(mut screen) => {
                self.screens.clear();
                screen.on_active(ctx, tui);
                self.screens.push(screen);
            }
            Transition::Quit => self.should_quit = true,
        }
    }
}
