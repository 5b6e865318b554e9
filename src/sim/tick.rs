//! Fixed step simulation tick
//!
//! One call advances the session by exactly one frame, independent of how much
//! wall-clock time has passed. `now` only gates obstacle spawning.

use super::collision;
use super::obstacle::GapSource;
use super::state::{GamePhase, GameState};
use crate::driver::StepControl;

/// Advance an Active session by one step.
///
/// Order within a step: avatar physics, spawn, scroll, obstacle collision,
/// scoring, retirement, boundary collision. Returns `Halt` when the session is
/// (or becomes) anything other than Active.
pub fn tick(state: &mut GameState, now: f64, gaps: &mut dyn GapSource) -> StepControl {
    if state.phase != GamePhase::Active {
        return StepControl::Halt;
    }

    state.time_ticks += 1;

    state.avatar.integrate(state.tuning.gravity);

    state
        .field
        .maybe_spawn(now, state.difficulty.interval, &state.tuning, gaps);
    state.field.advance(state.difficulty.speed);

    let gap_size = state.tuning.gap_size as f32;
    if let Some(hit) = collision::check_obstacles(&state.avatar, &state.field.obstacles, gap_size) {
        state.end(hit);
        log::info!("Hit obstacle at score {} (tick {})", state.score, state.time_ticks);
        return StepControl::Halt;
    }

    let cleared = state.field.check_passed(state.avatar.pos.x);
    for _ in 0..cleared {
        state.add_point();
        log::debug!(
            "Score {} - speed {:.2}, interval {:.0}ms",
            state.score,
            state.difficulty.speed,
            state.difficulty.interval
        );
    }

    state.field.reap_offscreen();

    if let Some(hit) = collision::check_boundary(&state.avatar, state.tuning.field_height) {
        state.end(hit);
        log::info!("Left the field at score {} (tick {})", state.score, state.time_ticks);
        return StepControl::Halt;
    }

    StepControl::Continue
}
