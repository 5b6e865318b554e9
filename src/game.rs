//! Session state machine wired to its collaborators
//!
//! [`Game`] is the single owner of all mutable game state. Input handlers and
//! the frame loop both go through it, so there is exactly one writer.
//!
//! ```text
//! Idle --start--> Active --collision--> Over --restart--> Active
//! ```

use crate::audio::{AudioCues, Cue};
use crate::driver::{LoopGuard, LoopTicket, StepControl};
use crate::persistence::BestScore;
use crate::platform::{Presentation, ScoreStore, Screen};
use crate::renderer::{RenderSurface, Scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GapSource, GameState, tick};
use crate::tuning::Tuning;

pub struct Game<S: ScoreStore, A: AudioCues, P: Presentation> {
    pub state: GameState,
    pub store: S,
    pub audio: A,
    pub ui: P,
    settings: Settings,
    best: BestScore,
    gaps: Box<dyn GapSource>,
    guard: LoopGuard,
}

impl<S: ScoreStore, A: AudioCues, P: Presentation> Game<S, A, P> {
    /// Read the best score once and show the start prompt
    pub fn new(
        tuning: Tuning,
        settings: Settings,
        gaps: Box<dyn GapSource>,
        mut store: S,
        audio: A,
        mut ui: P,
    ) -> Self {
        let best = BestScore::load(&mut store);
        ui.show(Screen::Start, 0, best.value());
        log::info!(
            "{} profile: gap {}, base interval {}ms",
            tuning.profile.as_str(),
            tuning.gap_size,
            tuning.base_interval
        );
        Self {
            state: GameState::new(tuning),
            store,
            audio,
            ui,
            settings,
            best,
            gaps,
            guard: LoopGuard::default(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn best_score(&self) -> u64 {
        self.best.value()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Idle/Over -> Active. Returns the ticket the new frame loop must carry,
    /// or `None` if a session is already running.
    pub fn start(&mut self) -> Option<LoopTicket> {
        if !self.state.start() {
            return None;
        }
        self.state.drain_events();
        self.ui.show(Screen::Hud, 0, self.best.value());
        self.audio.start_music();
        log::info!("Session started");
        Some(self.guard.begin())
    }

    /// Jump while Active; ignored otherwise
    pub fn jump(&mut self) -> bool {
        if !self.state.jump() {
            return false;
        }
        self.audio.play(Cue::Jump);
        true
    }

    /// The combined jump/start trigger (key, touch): jumps while Active,
    /// otherwise starts from Idle or Over.
    pub fn trigger(&mut self) -> Option<LoopTicket> {
        if self.state.is_active() {
            self.jump();
            None
        } else {
            self.start()
        }
    }

    /// One frame: a single simulation step, then one render.
    ///
    /// Frames carrying a stale ticket (from a loop that already halted or
    /// was superseded by a restart) do nothing and halt.
    pub fn frame(&mut self, ticket: LoopTicket, now: f64, surface: &mut dyn RenderSurface) -> StepControl {
        if !self.guard.is_current(ticket) {
            return StepControl::Halt;
        }

        let control = tick(&mut self.state, now, &mut *self.gaps);
        for event in self.state.drain_events() {
            match event {
                GameEvent::Scored { score } => self.ui.set_score(score),
                GameEvent::Collided(collision) => {
                    log::info!("Game over ({:?}), score {}", collision, self.state.score);
                    self.game_over();
                }
                GameEvent::Started => {}
            }
        }

        self.render(surface);

        if control == StepControl::Halt {
            self.guard.halt();
        }
        control
    }

    /// Draw the current state (also used for the idle frame before any start)
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.render(&Scene::build(&self.state));
    }

    fn game_over(&mut self) {
        self.guard.halt();
        self.audio.stop_music();
        self.audio.play(Cue::Death);
        if self.settings.effective_screen_shake() {
            self.ui.shake();
        }

        let score = self.state.score;
        self.best.record(score, &mut self.store);
        self.ui.show(Screen::GameOver, score, self.best.value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::consts::*;
    use crate::driver::{FrameClock, drive};
    use crate::platform::{HeadlessPresentation, MemoryStore};
    use crate::renderer::DrawList;
    use crate::sim::Obstacle;
    use crate::sim::SeededGaps;

    type TestGame = Game<MemoryStore, SilentAudio, HeadlessPresentation>;

    fn game_with_best(best: u64) -> TestGame {
        Game::new(
            Tuning::default(),
            Settings::default(),
            Box::new(SeededGaps::new(1)),
            MemoryStore::with_best(best),
            SilentAudio::default(),
            HeadlessPresentation::default(),
        )
    }

    /// Place an obstacle the avatar has just cleared
    fn push_cleared_obstacle(game: &mut TestGame) {
        game.state.field.obstacles.push(Obstacle { x: 12.0, gap_top: 300.0, passed: false });
    }

    /// Place an obstacle whose upper segment covers the avatar
    fn push_blocking_obstacle(game: &mut TestGame) {
        game.state.field.obstacles.push(Obstacle { x: 102.0, gap_top: 500.0, passed: false });
    }

    #[test]
    fn test_new_shows_start_with_best() {
        let game = game_with_best(7);
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.best_score(), 7);
        assert_eq!(game.ui.shown, vec![(Screen::Start, 0, 7)]);
    }

    #[test]
    fn test_jump_ignored_when_idle() {
        let mut game = game_with_best(0);
        assert!(!game.jump());
        assert!(game.audio.played.is_empty());
        assert_eq!(game.state.avatar.velocity, 0.0);
    }

    #[test]
    fn test_trigger_starts_then_jumps() {
        let mut game = game_with_best(0);
        assert!(game.trigger().is_some());
        assert_eq!(game.phase(), GamePhase::Active);
        assert!(game.audio.music_playing);
        assert_eq!(game.ui.screen, Some(Screen::Hud));

        assert!(game.trigger().is_none());
        assert_eq!(game.state.avatar.velocity, JUMP_VELOCITY);
        assert_eq!(game.audio.played, vec![Cue::Jump]);
    }

    #[test]
    fn test_collision_ends_session_and_records_best() {
        let mut game = game_with_best(0);
        let mut surface = DrawList::default();
        let ticket = game.start().unwrap();
        push_cleared_obstacle(&mut game);

        assert_eq!(game.frame(ticket, 100.0, &mut surface), StepControl::Continue);
        assert_eq!(game.state.score, 1);
        assert_eq!(game.ui.hud_score, 1);

        push_blocking_obstacle(&mut game);
        assert_eq!(game.frame(ticket, 116.0, &mut surface), StepControl::Halt);
        assert_eq!(game.phase(), GamePhase::Over);
        assert!(!game.audio.music_playing);
        assert_eq!(game.audio.played, vec![Cue::Death]);
        assert_eq!(game.ui.shakes, 1);
        assert_eq!(game.ui.screen, Some(Screen::GameOver));
        assert_eq!(game.best_score(), 1);
        assert_eq!(game.store.best, 1);
        assert_eq!(game.store.writes, 1);
        assert_eq!(surface.frames, 2);

        // Already-queued frames never step again
        let y = game.state.avatar.pos.y;
        assert_eq!(game.frame(ticket, 132.0, &mut surface), StepControl::Halt);
        assert_eq!(game.state.avatar.pos.y, y);
        assert_eq!(surface.frames, 2);
    }

    #[test]
    fn test_tie_does_not_overwrite_best() {
        let mut game = game_with_best(1);
        let mut surface = DrawList::default();
        let ticket = game.start().unwrap();
        push_cleared_obstacle(&mut game);
        game.frame(ticket, 100.0, &mut surface);
        push_blocking_obstacle(&mut game);
        game.frame(ticket, 116.0, &mut surface);

        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.best_score(), 1);
        assert_eq!(game.store.writes, 0);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = game_with_best(0);
        let mut surface = DrawList::default();
        let ticket = game.start().unwrap();
        for _ in 0..3 {
            push_cleared_obstacle(&mut game);
            game.frame(ticket, 100.0, &mut surface);
        }
        assert_eq!(game.state.score, 3);
        push_blocking_obstacle(&mut game);
        game.frame(ticket, 116.0, &mut surface);
        assert_eq!(game.phase(), GamePhase::Over);

        let restarted = game.start().unwrap();
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.state.score, 0);
        assert_eq!(game.state.difficulty.speed, 2.2);
        assert_eq!(game.state.difficulty.interval, 1300.0);
        assert!(game.state.field.is_empty());
        assert_eq!(game.ui.screen, Some(Screen::Hud));

        // The old loop's frames are dead; the new one runs
        assert_eq!(game.frame(ticket, 200.0, &mut surface), StepControl::Halt);
        assert_eq!(game.frame(restarted, 200.0, &mut surface), StepControl::Continue);
    }

    #[test]
    fn test_trigger_restarts_from_game_over() {
        let mut game = game_with_best(0);
        let mut surface = DrawList::default();
        let ticket = game.trigger().unwrap();
        push_cleared_obstacle(&mut game);
        game.frame(ticket, 100.0, &mut surface);
        push_blocking_obstacle(&mut game);
        game.frame(ticket, 116.0, &mut surface);
        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.state.score, 1);

        let restarted = game.trigger().unwrap();
        assert_ne!(restarted, ticket);
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.state.score, 0);
        assert!(game.state.field.is_empty());
        assert!(game.audio.music_playing);
        assert_eq!(game.ui.screen, Some(Screen::Hud));
        // No jump cue: the trigger started a session instead
        assert_eq!(game.audio.played, vec![Cue::Death]);

        assert_eq!(game.frame(ticket, 132.0, &mut surface), StepControl::Halt);
        assert_eq!(game.frame(restarted, 132.0, &mut surface), StepControl::Continue);
    }

    #[test]
    fn test_no_shake_with_reduced_motion() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut game: TestGame = Game::new(
            Tuning::default(),
            settings,
            Box::new(SeededGaps::new(1)),
            MemoryStore::default(),
            SilentAudio::default(),
            HeadlessPresentation::default(),
        );
        let mut surface = DrawList::default();
        let ticket = game.start().unwrap();
        push_blocking_obstacle(&mut game);
        game.frame(ticket, 100.0, &mut surface);
        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.ui.shakes, 0);
    }

    #[test]
    fn test_driven_session_ends_exactly_once() {
        let mut game = game_with_best(0);
        let mut surface = DrawList::default();
        let mut clock = FrameClock::default();
        let ticket = game.start().unwrap();

        let frames = drive(&mut clock, 10_000, |now| game.frame(ticket, now, &mut surface));
        assert!(frames < 10_000);
        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(surface.frames, frames);
        let game_overs = game
            .ui
            .shown
            .iter()
            .filter(|(screen, _, _)| *screen == Screen::GameOver)
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(game.audio.played, vec![Cue::Death]);
    }
}
