use std::time::{Duration, Instant};

use blockfall_engine::{Board, BoardConfig, TurnEvent, rules};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::{Line, Text},
    widgets::Block,
};

use crate::{
    context::{AppContext, GameSummary},
    input::{KeyRepeat, RepeatKey},
    screens::{GameOverScreen, PausedScreen},
    sound::SoundEvent,
    tui::{Pace, Screen, Transition, Tui},
    view::{
        theme::style,
        widgets::{BoardDisplay, PiecePreview, StatsDisplay},
    },
};

const FRAME_RATE: f64 = 60.0;

const HELP_TEXT: &str =
    "← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Space (Hard Drop) | P (Pause) | Q (Quit)";

/// The game itself: one board, driven by the frame clock.
///
/// Gravity runs on accumulated wall-clock time against the level's drop
/// interval, so the pace is independent of the frame rate. Key repeat for
/// the movement keys is the screen's own 200ms/70ms policy whenever the
/// terminal reports releases; otherwise the terminal's repeat is used
/// as is.
#[derive(Debug)]
pub struct PlayingScreen {
    board: Board,
    fall_timer: Duration,
    last_update: Option<Instant>,
    repeat: KeyRepeat,
}

impl PlayingScreen {
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self {
            board: Board::new(config),
            fall_timer: Duration::ZERO,
            last_update: None,
            repeat: KeyRepeat::new(),
        }
    }

    /// Advances the session to `now`: pending key repeats first, then
    /// gravity once the accumulated time reaches the drop interval.
    fn step(&mut self, ctx: &mut AppContext, now: Instant) -> Transition {
        let elapsed = self
            .last_update
            .map_or(Duration::ZERO, |last| now.duration_since(last));
        self.last_update = Some(now);

        for key in self.repeat.due(now) {
            self.shift(key);
        }

        self.fall_timer += elapsed;
        let interval = Duration::from_secs_f64(rules::drop_interval_secs(self.board.level()));
        if self.fall_timer >= interval {
            self.fall_timer = Duration::ZERO;
            if !self.board.move_piece(0, 1) {
                self.board.merge_piece();
            }
            self.dispatch_turn_events(ctx);
        }

        if self.board.is_game_over() {
            return self.finish(ctx);
        }
        Transition::Stay
    }

    fn shift(&mut self, key: RepeatKey) {
        let (dx, dy) = match key {
            RepeatKey::Left => (-1, 0),
            RepeatKey::Right => (1, 0),
            RepeatKey::Down => (0, 1),
        };
        _ = self.board.move_piece(dx, dy);
    }

    fn handle_shift_key(
        &mut self,
        ctx: &AppContext,
        key: RepeatKey,
        kind: KeyEventKind,
        now: Instant,
    ) {
        match kind {
            KeyEventKind::Press => {
                if !ctx.enhanced_input || self.repeat.key_down(key, now) {
                    self.shift(key);
                }
            }
            // The explicit policy replaces the terminal's repeat when
            // releases are reported.
            KeyEventKind::Repeat => {
                if !ctx.enhanced_input {
                    self.shift(key);
                }
            }
            KeyEventKind::Release => self.repeat.key_up(key),
        }
    }

    fn dispatch_turn_events(&mut self, ctx: &mut AppContext) {
        for event in self.board.take_events() {
            ctx.sound.play(sound_for(event));
        }
    }

    fn finish(&self, ctx: &mut AppContext) -> Transition {
        ctx.last_game = Some(GameSummary {
            score: self.board.score(),
            lines: self.board.lines_cleared(),
            level: self.board.level(),
        });
        ctx.sound.play(SoundEvent::GameOver);
        Transition::Switch(Box::new(GameOverScreen::new()))
    }
}

fn sound_for(event: TurnEvent) -> SoundEvent {
    match event {
        TurnEvent::LinesCleared { count } if count >= 4 => SoundEvent::Tetris,
        TurnEvent::LinesCleared { .. } => SoundEvent::LineClear,
        TurnEvent::LevelUp { .. } => SoundEvent::LevelUp,
    }
}

impl Screen for PlayingScreen {
    fn on_active(&mut self, _ctx: &mut AppContext, tui: &mut Tui) {
        tui.set_pace(Pace::frames_per_second(FRAME_RATE));
        // Returning from the pause menu must not count the paused time
        // as fall time, and releases missed while paused must not leave
        // keys stuck.
        self.last_update = None;
        self.repeat.release_all();
    }

    fn handle_event(&mut self, ctx: &mut AppContext, _tui: &mut Tui, event: &Event) -> Transition {
        let Some(key) = event.as_key_event() else {
            return Transition::Stay;
        };

        if let Some(repeat_key) = RepeatKey::from_key_code(key.code) {
            self.handle_shift_key(ctx, repeat_key, key.kind, Instant::now());
            return Transition::Stay;
        }
        if key.kind == KeyEventKind::Release {
            return Transition::Stay;
        }

        match key.code {
            KeyCode::Up => {
                if self.board.rotate_piece() {
                    ctx.sound.play(SoundEvent::Rotate);
                }
            }
            KeyCode::Char(' ') => {
                ctx.sound.play(SoundEvent::HardDrop);
                self.board.hard_drop();
                self.dispatch_turn_events(ctx);
                if self.board.is_game_over() {
                    return self.finish(ctx);
                }
            }
            KeyCode::Char('p') | KeyCode::Esc => {
                return Transition::Push(Box::new(PausedScreen::new()));
            }
            KeyCode::Char('q') => return Transition::Quit,
            _ => {}
        }
        Transition::Stay
    }

    fn update(&mut self, ctx: &mut AppContext, _tui: &mut Tui) -> Transition {
        self.step(ctx, Instant::now())
    }

    fn draw(&self, ctx: &AppContext, frame: &mut Frame) {
        let board_display = BoardDisplay::new(&self.board)
            .block(Block::bordered().style(style::DEFAULT));
        let preview = PiecePreview::new().piece(self.board.next_piece()).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .style(style::DEFAULT),
        );
        let stats = StatsDisplay::new(&ctx.player_name, &self.board).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .style(style::DEFAULT),
        );

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board_display.width()),
            Constraint::Length(preview.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board_display.height())]).areas(center_column);
        let [preview_area] =
            Layout::vertical([Constraint::Length(preview.height())]).areas(right_column);

        frame.render_widget(stats, stats_area);
        frame.render_widget(board_display, board_area);
        frame.render_widget(preview, preview_area);
        frame.render_widget(
            Text::from(HELP_TEXT).style(style::HELP).centered(),
            help_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::context::testing::recording_context;

    fn playing_screen() -> PlayingScreen {
        PlayingScreen::new(BoardConfig::default())
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    #[test]
    fn gravity_applies_only_after_the_drop_interval() {
        let (mut ctx, _sink) = recording_context();
        let mut screen = playing_screen();
        let t0 = Instant::now();
        screen.step(&mut ctx, t0);
        let y0 = screen.board.current_piece().y();

        screen.step(&mut ctx, t0 + Duration::from_millis(500));
        assert_eq!(
            screen.board.current_piece().y(),
            y0,
            "level 1 drops once per second, not sooner"
        );

        screen.step(&mut ctx, t0 + Duration::from_millis(1000));
        assert_eq!(screen.board.current_piece().y(), y0 + 1);
    }

    #[test]
    fn held_movement_key_repeats_on_the_explicit_schedule() {
        let (mut ctx, _sink) = recording_context();
        ctx.enhanced_input = true;
        let mut screen = playing_screen();
        let mut tui = Tui::new();
        let x0 = screen.board.current_piece().x();

        screen.handle_event(&mut ctx, &mut tui, &key(KeyCode::Left, KeyEventKind::Press));
        assert_eq!(screen.board.current_piece().x(), x0 - 1, "press moves immediately");

        let now = Instant::now();
        screen.step(&mut ctx, now);
        assert_eq!(screen.board.current_piece().x(), x0 - 1, "no repeat before the delay");

        screen.step(&mut ctx, now + Duration::from_millis(200));
        assert_eq!(screen.board.current_piece().x(), x0 - 2, "repeat after the initial delay");
    }

    #[test]
    fn releasing_the_key_cancels_the_repeat() {
        let (mut ctx, _sink) = recording_context();
        ctx.enhanced_input = true;
        let mut screen = playing_screen();
        let mut tui = Tui::new();
        let x0 = screen.board.current_piece().x();

        screen.handle_event(&mut ctx, &mut tui, &key(KeyCode::Left, KeyEventKind::Press));
        screen.handle_event(&mut ctx, &mut tui, &key(KeyCode::Left, KeyEventKind::Release));
        screen.step(&mut ctx, Instant::now() + Duration::from_millis(250));
        assert_eq!(screen.board.current_piece().x(), x0 - 1, "only the initial move");
    }

    #[test]
    fn terminal_repeat_events_are_ignored_on_enhanced_terminals() {
        let (mut ctx, _sink) = recording_context();
        ctx.enhanced_input = true;
        let mut screen = playing_screen();
        let mut tui = Tui::new();
        let x0 = screen.board.current_piece().x();

        screen.handle_event(&mut ctx, &mut tui, &key(KeyCode::Left, KeyEventKind::Press));
        screen.handle_event(&mut ctx, &mut tui, &key(KeyCode::Left, KeyEventKind::Repeat));
        assert_eq!(screen.board.current_piece().x(), x0 - 1);
    }

    #[test]
    fn terminal_repeat_drives_movement_without_release_reporting() {
        let (mut ctx, _sink) = recording_context();
        ctx.enhanced_input = false;
        let mut screen = playing_screen();
        let mut tui = Tui::new();
        let x0 = screen.board.current_piece().x();

        screen.handle_event(&mut ctx, &mut tui, &key(KeyCode::Left, KeyEventKind::Press));
        screen.handle_event(&mut ctx, &mut tui, &key(KeyCode::Left, KeyEventKind::Press));
        screen.handle_event(&mut ctx, &mut tui, &key(KeyCode::Left, KeyEventKind::Repeat));
        assert_eq!(screen.board.current_piece().x(), x0 - 3);
    }

    #[test]
    fn successful_rotation_plays_a_sound() {
        let (mut ctx, sink) = recording_context();
        let mut screen = playing_screen();
        let mut tui = Tui::new();

        screen.handle_event(&mut ctx, &mut tui, &key(KeyCode::Up, KeyEventKind::Press));
        assert_eq!(sink.events(), vec![SoundEvent::Rotate]);
    }

    #[test]
    fn hard_drop_locks_the_piece_and_plays_its_sound() {
        let (mut ctx, sink) = recording_context();
        let mut screen = playing_screen();
        let mut tui = Tui::new();

        let transition =
            screen.handle_event(&mut ctx, &mut tui, &key(KeyCode::Char(' '), KeyEventKind::Press));
        assert!(matches!(transition, Transition::Stay));
        assert!(screen.board.score() > 0, "hard drop awards travel points");
        assert_eq!(sink.events(), vec![SoundEvent::HardDrop]);
    }

    #[test]
    fn pause_key_pushes_the_pause_screen() {
        let (mut ctx, _sink) = recording_context();
        let mut screen = playing_screen();
        let mut tui = Tui::new();

        let transition =
            screen.handle_event(&mut ctx, &mut tui, &key(KeyCode::Char('p'), KeyEventKind::Press));
        assert!(matches!(transition, Transition::Push(_)));
    }

    #[test]
    fn game_over_hands_the_summary_to_the_context() {
        let (mut ctx, sink) = recording_context();
        let mut screen = playing_screen();

        // Stack hard drops in the spawn columns until the pile overflows.
        let mut guard = 0;
        while !screen.board.is_game_over() {
            screen.board.hard_drop();
            guard += 1;
            assert!(guard < 200, "the stack must eventually overflow");
        }

        let transition = screen.step(&mut ctx, Instant::now());
        assert!(matches!(transition, Transition::Switch(_)));
        let summary = ctx.last_game.expect("summary must be recorded");
        assert_eq!(summary.score, screen.board.score());
        assert!(sink.events().contains(&SoundEvent::GameOver));
    }

    #[test]
    fn line_clear_counts_map_to_their_sounds() {
        assert_eq!(sound_for(TurnEvent::LinesCleared { count: 1 }), SoundEvent::LineClear);
        assert_eq!(sound_for(TurnEvent::LinesCleared { count: 3 }), SoundEvent::LineClear);
        assert_eq!(sound_for(TurnEvent::LinesCleared { count: 4 }), SoundEvent::Tetris);
        assert_eq!(sound_for(TurnEvent::LevelUp { level: 2 }), SoundEvent::LevelUp);
    }
}
