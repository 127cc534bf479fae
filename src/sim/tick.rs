//! Variable-dt simulation step
//!
//! Order per step: motion -> spawner -> combo decay + collisions -> timer.

use super::state::{GameStatus, Session};
use super::{motion, scoring, spawner};
use crate::error::SimError;

/// Player intent for one step, sampled once before the step runs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// -1.0 left, 0.0 none, 1.0 right
    pub direction: f32,
}

/// Advance the session by `dt` seconds
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) -> Result<(), SimError> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(SimError::InvalidDelta(dt));
    }
    if session.status != GameStatus::Running {
        return Ok(());
    }

    // Death grace: let the effects play, nothing else moves or scores
    if let Some(grace) = session.dying {
        motion::update_effects(session, dt);
        let grace = grace - dt;
        if grace <= 0.0 {
            session.end();
        } else {
            session.dying = Some(grace);
        }
        return Ok(());
    }

    motion::update_player(&mut session.player, input.direction, session.field, dt);
    motion::update_entities(session, dt);
    motion::update_effects(session, dt);

    spawner::spawn(session, dt);

    scoring::decay_combo(session, dt);
    scoring::resolve_collisions(session);

    if !session.is_dying() {
        advance_timer(session, dt);
    }

    check_finite(session)
}

/// Count down (timed) or up (arcade); timed sessions end at zero
pub fn advance_timer(session: &mut Session, dt: f32) {
    if session.arcade_mode {
        session.time_remaining += dt;
        return;
    }
    session.time_remaining -= dt;
    if session.time_remaining <= 0.0 {
        session.time_remaining = 0.0;
        log::info!("Time up");
        session.end();
    }
}

fn check_finite(session: &Session) -> Result<(), SimError> {
    if !session.player.pos.is_finite() || !session.player.vel.is_finite() {
        return Err(SimError::NonFinite("player"));
    }
    if session.entities.iter().any(|e| !e.pos.is_finite()) {
        return Err(SimError::NonFinite("entities"));
    }
    if !session.time_remaining.is_finite() || !session.combo_window.is_finite() {
        return Err(SimError::NonFinite("timers"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EntityKind, FallingEntity, GameEvent};
    use crate::tuning::GameConfig;
    use proptest::prelude::*;

    fn started(config: GameConfig, seed: u64) -> Session {
        let mut session = Session::new(config, seed);
        session.start(seed);
        session
    }

    #[test]
    fn test_idle_and_paused_do_not_advance() {
        let mut session = Session::new(GameConfig::honey_hunt(), 1);
        tick(&mut session, &TickInput { direction: 1.0 }, 0.1).unwrap();
        assert_eq!(session.time_remaining, 60.0);

        session.start(1);
        session.pause();
        let x = session.player.pos.x;
        tick(&mut session, &TickInput { direction: 1.0 }, 0.1).unwrap();
        assert_eq!(session.player.pos.x, x);
        assert_eq!(session.time_remaining, 60.0);
    }

    #[test]
    fn test_timer_ends_exactly_at_sixty_seconds() {
        let mut session = started(GameConfig::honey_catch(), 3);
        session.config.session_secs = 60.0;
        session.reset_values();

        for step in 1..=60 {
            tick(&mut session, &TickInput::default(), 1.0).unwrap();
            if step < 60 {
                assert_eq!(session.status, GameStatus::Running, "ended early at {}", step);
            }
        }
        assert_eq!(session.status, GameStatus::Ended);
        assert_eq!(session.time_remaining, 0.0);
    }

    #[test]
    fn test_arcade_timer_counts_up() {
        let mut session = Session::new(GameConfig::honey_catch(), 3);
        session.toggle_arcade_mode();
        session.start(3);
        for _ in 0..100 {
            tick(&mut session, &TickInput::default(), 1.0).unwrap();
        }
        assert_eq!(session.status, GameStatus::Running);
        assert_eq!(session.time_remaining, 100.0);
    }

    #[test]
    fn test_last_life_ends_after_grace() {
        let mut session = started(GameConfig::honey_hunt(), 5);
        session.lives = 1;
        let pos = session.player.pos;
        session.entities.push(FallingEntity {
            id: 999,
            kind: EntityKind::Hazard,
            pos,
            speed: 0.0,
            size: EntityKind::Hazard.size(),
            spin: 0.0,
        });

        tick(&mut session, &TickInput::default(), 0.01).unwrap();
        assert_eq!(session.lives, 0);
        assert_eq!(session.status, GameStatus::Running);
        assert!(session.is_dying());

        // No scoring during the grace period
        let score = session.score;
        session.entities.push(FallingEntity {
            id: 1000,
            kind: EntityKind::Collectible,
            pos: session.player.pos,
            speed: 0.0,
            size: EntityKind::Collectible.size(),
            spin: 0.0,
        });
        tick(&mut session, &TickInput::default(), 0.5).unwrap();
        assert_eq!(session.score, score);
        assert_eq!(session.status, GameStatus::Running);

        tick(&mut session, &TickInput::default(), 0.6).unwrap();
        assert_eq!(session.status, GameStatus::Ended);
        assert_eq!(session.lives, 0);
        assert!(
            session
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Ended { .. }))
        );
    }

    #[test]
    fn test_rejects_bad_delta() {
        let mut session = started(GameConfig::honey_hunt(), 1);
        assert_eq!(
            tick(&mut session, &TickInput::default(), -0.1),
            Err(SimError::InvalidDelta(-0.1))
        );
        assert!(tick(&mut session, &TickInput::default(), f32::NAN).is_err());
    }

    #[test]
    fn test_non_finite_state_is_reported() {
        let mut session = started(GameConfig::honey_hunt(), 1);
        session.player.vel = f32::INFINITY;
        assert!(tick(&mut session, &TickInput::default(), 0.01).is_err());
    }

    #[test]
    fn test_determinism() {
        let mut a = started(GameConfig::honey_hunt(), 777);
        let mut b = started(GameConfig::honey_hunt(), 777);
        let inputs = [-1.0, -1.0, 0.0, 1.0, 1.0, 1.0, 0.0];
        for i in 0..600 {
            let input = TickInput {
                direction: inputs[i % inputs.len()],
            };
            tick(&mut a, &input, 1.0 / 60.0).unwrap();
            tick(&mut b, &input, 1.0 / 60.0).unwrap();
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.entities.len(), b.entities.len());
        assert!((a.player.pos - b.player.pos).length() < 1e-4);
    }

    #[test]
    fn test_entities_are_spawned_while_running() {
        let mut session = started(GameConfig::honey_hunt(), 12);
        for _ in 0..600 {
            tick(&mut session, &TickInput::default(), 1.0 / 60.0).unwrap();
        }
        assert!(session.next_entity_id() > 1);
        assert!(session.entities.iter().all(|e| e.pos.y >= -e.size / 2.0));
    }

    proptest! {
        #[test]
        fn prop_score_monotonic(
            seed in 0u64..10_000,
            moves in proptest::collection::vec((-1i8..=1, 1u8..=10), 1..300),
        ) {
            let mut session = started(GameConfig::honey_hunt(), seed);
            let mut last = session.score;
            for (dir, ms) in moves {
                let input = TickInput { direction: dir as f32 };
                tick(&mut session, &input, ms as f32 / 100.0).unwrap();
                prop_assert!(session.score >= last);
                last = session.score;
                prop_assert_eq!(
                    session.multiplier(),
                    crate::sim::state::multiplier_for_streak(session.streak)
                );
                if session.lives == 0 {
                    prop_assert!(session.is_dying() || session.status == GameStatus::Ended);
                }
                if !session.arcade_mode {
                    prop_assert!(session.time_remaining >= 0.0);
                }
            }
        }
    }
}
