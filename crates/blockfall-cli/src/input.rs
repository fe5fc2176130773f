use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

/// Delay before a held key starts repeating.
pub const INITIAL_DELAY: Duration = Duration::from_millis(200);
/// Interval between repeats once a key has started repeating.
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(70);

/// Keys that auto-repeat while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatKey {
    Left,
    Right,
    Down,
}

impl RepeatKey {
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left => Some(Self::Left),
            KeyCode::Right => Some(Self::Right),
            KeyCode::Down => Some(Self::Down),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct HeldKey {
    key: RepeatKey,
    next_fire: Instant,
}

/// Explicit key-repeat policy, independent of the terminal's own repeat.
///
/// Driven by press/release events: `key_down` reports whether the press
/// was fresh (callers apply the immediate action themselves), and `due`
/// yields the repeats whose time has come. The terminal's auto-repeat
/// events are ignored by callers when this policy is active, so the
/// 200ms/70ms timing holds on every terminal that reports releases.
#[derive(Debug, Default)]
pub struct KeyRepeat {
    held: Vec<HeldKey>,
}

impl KeyRepeat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a press. Returns `true` if the key was not already held.
    pub fn key_down(&mut self, key: RepeatKey, now: Instant) -> bool {
        if self.held.iter().any(|held| held.key == key) {
            return false;
        }
        self.held.push(HeldKey {
            key,
            next_fire: now + INITIAL_DELAY,
        });
        true
    }

    pub fn key_up(&mut self, key: RepeatKey) {
        self.held.retain(|held| held.key != key);
    }

    /// Forgets every held key. Used when the playing screen loses focus,
    /// since releases that happen on another screen are never seen.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Returns the keys due to repeat at `now` and schedules their next
    /// repeat. At most one repeat per key per call; a laggy tick does not
    /// produce a burst of catch-up moves.
    pub fn due(&mut self, now: Instant) -> Vec<RepeatKey> {
        let mut fired = Vec::new();
        for held in &mut self.held {
            if held.next_fire <= now {
                fired.push(held.key);
                held.next_fire = now + REPEAT_INTERVAL;
            }
        }
        fired
    }
}
