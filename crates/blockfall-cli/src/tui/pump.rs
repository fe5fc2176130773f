use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

/// How long an idle `OnInput` pump waits before re-checking for input.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// What the loop hands the application next.
#[derive(Debug)]
pub(super) enum TuiEvent {
    /// A paced frame is due: advance the session, then draw it.
    Frame,
    /// Something changed since the last draw; repaint.
    Redraw,
    /// A terminal event (key input, resize, ...) arrived.
    Input(Event),
}

/// How the active screen wants the loop to spend its time.
#[derive(Debug, Clone, Copy)]
pub enum Pace {
    /// Fixed-rate frames. The playing screen runs here: gravity and key
    /// repeat need the clock even when no input arrives.
    Frames(Duration),
    /// Sleep on input and repaint only after something changed. Menus
    /// and other static screens run here.
    OnInput,
}

impl Pace {
    #[must_use]
    pub fn frames_per_second(rate: f64) -> Self {
        Self::Frames(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Fixed-rate frame schedule.
#[derive(Debug)]
struct FrameClock {
    interval: Duration,
    next_at: Instant,
}

impl FrameClock {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_at: now,
        }
    }

    /// `None` when a frame is due, advancing the schedule; otherwise the
    /// time left until the next frame. After a stall (a long draw, a
    /// suspended terminal) the schedule resyncs to `now` instead of
    /// replaying every missed frame.
    fn poll(&mut self, now: Instant) -> Option<Duration> {
        if now < self.next_at {
            return Some(self.next_at - now);
        }
        self.next_at += self.interval;
        if self.next_at <= now {
            self.next_at = now + self.interval;
        }
        None
    }
}

/// Turns terminal input and wall-clock time into [`TuiEvent`]s according
/// to the active screen's [`Pace`].
#[derive(Debug)]
pub(super) struct EventPump {
    clock: Option<FrameClock>,
    needs_redraw: bool,
}

impl Default for EventPump {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPump {
    pub(super) fn new() -> Self {
        Self {
            clock: None,
            // The first screen has never been drawn.
            needs_redraw: true,
        }
    }

    /// Switches pacing. A pace change always schedules a repaint, so a
    /// freshly activated screen appears without waiting for input.
    pub(super) fn set_pace(&mut self, pace: Pace) {
        self.clock = match pace {
            Pace::Frames(interval) => Some(FrameClock::new(interval, Instant::now())),
            Pace::OnInput => None,
        };
        self.needs_redraw = true;
    }

    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            if let Some(clock) = &mut self.clock {
                match clock.poll(Instant::now()) {
                    None => {
                        self.needs_redraw = false;
                        return Ok(TuiEvent::Frame);
                    }
                    Some(wait) => {
                        if event::poll(wait)? {
                            return Ok(self.read_input()?);
                        }
                    }
                }
                continue;
            }

            if self.take_redraw() {
                return Ok(TuiEvent::Redraw);
            }
            if event::poll(IDLE_POLL)? {
                return Ok(self.read_input()?);
            }
        }
    }

    fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn read_input(&mut self) -> std::io::Result<TuiEvent> {
        // Whatever the input does, the screen repaints afterwards.
        self.needs_redraw = true;
        Ok(TuiEvent::Input(event::read()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn the_first_frame_is_due_immediately() {
        let start = Instant::now();
        let mut clock = FrameClock::new(INTERVAL, start);
        assert_eq!(clock.poll(start), None);
    }

    #[test]
    fn frames_follow_the_interval() {
        let start = Instant::now();
        let mut clock = FrameClock::new(INTERVAL, start);
        assert_eq!(clock.poll(start), None);

        let halfway = start + INTERVAL / 2;
        assert_eq!(clock.poll(halfway), Some(INTERVAL / 2));

        assert_eq!(clock.poll(start + INTERVAL), None);
    }

    #[test]
    fn a_stall_resyncs_instead_of_bursting() {
        let start = Instant::now();
        let mut clock = FrameClock::new(INTERVAL, start);
        assert_eq!(clock.poll(start), None);

        // Ten intervals pass at once. One frame fires, then the schedule
        // restarts from now rather than owing nine more.
        let late = start + INTERVAL * 10;
        assert_eq!(clock.poll(late), None);
        assert_eq!(clock.poll(late), Some(INTERVAL));
    }

    #[test]
    fn a_pace_change_schedules_a_repaint() {
        let mut pump = EventPump::new();
        assert!(pump.take_redraw(), "the initial screen needs a first draw");
        assert!(!pump.take_redraw());

        pump.set_pace(Pace::OnInput);
        assert!(pump.take_redraw());
        assert!(!pump.take_redraw());
    }
}
