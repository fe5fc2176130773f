use std::io;

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};

use crate::{
    context::AppContext,
    tui::{
        ScreenStack,
        pump::{EventPump, Pace, TuiEvent},
    },
};

/// TUI runtime: owns the event pump and drives a screen stack inside a
/// ratatui terminal session.
#[derive(Default, Debug)]
pub struct Tui {
    events: EventPump,
}

impl Tui {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how the loop spends its time for the active screen.
    pub fn set_pace(&mut self, pace: Pace) {
        self.events.set_pace(pace);
    }

    /// Runs the screen stack until it exits.
    ///
    /// Keyboard enhancement flags are pushed when the terminal supports
    /// them, so key releases reach the input layer; on terminals without
    /// them the screens fall back to the terminal's own key repeat.
    pub fn run(mut self, ctx: &mut AppContext, stack: &mut ScreenStack) -> anyhow::Result<()> {
        ratatui::run(|terminal| {
            let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
            ctx.enhanced_input = enhanced;
            if enhanced {
                execute!(
                    io::stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )?;
            }

            stack.init(ctx, &mut self);
            let result: anyhow::Result<()> = (|| {
                while !stack.should_exit() {
                    match self.events.next()? {
                        TuiEvent::Frame => {
                            stack.update(ctx, &mut self);
                            terminal.draw(|frame| stack.draw(ctx, frame))?;
                        }
                        TuiEvent::Redraw => {
                            terminal.draw(|frame| stack.draw(ctx, frame))?;
                        }
                        TuiEvent::Input(event) => stack.handle_event(ctx, &mut self, &event),
                    }
                }
                Ok(())
            })();

            if enhanced {
                execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            }
            result
        })
    }
}
