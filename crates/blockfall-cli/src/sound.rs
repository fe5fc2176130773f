/// Distinct audio cues the game can trigger.
///
/// The playing screen maps engine notifications and its own operation
/// results onto these; what a sink does with them is its own business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    /// The active piece rotated successfully.
    Rotate,
    /// The active piece was hard-dropped.
    HardDrop,
    /// One to three rows were cleared.
    LineClear,
    /// Four rows were cleared at once.
    Tetris,
    /// The level increased.
    LevelUp,
    /// The session ended.
    GameOver,
}

/// Receiver for sound events.
pub trait SoundSink {
    fn play(&mut self, event: SoundEvent);
}

/// Sink that swallows every event. The default: no audio backend is
/// wired up, but the dispatch points stay exercised.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl SoundSink for SilentSink {
    fn play(&mut self, _event: SoundEvent) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{cell::RefCell, rc::Rc};

    use super::{SoundEvent, SoundSink};

    /// Sink that records every event for later inspection.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct RecordingSink {
        events: Rc<RefCell<Vec<SoundEvent>>>,
    }

    impl RecordingSink {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn events(&self) -> Vec<SoundEvent> {
            self.events.borrow().clone()
        }
    }

    impl SoundSink for RecordingSink {
        fn play(&mut self, event: SoundEvent) {
            self.events.borrow_mut().push(event);
        }
    }
}
