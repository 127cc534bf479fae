//! Collision resolution, scoring, combo and lives
//!
//! Everything that changes score, streak or lives goes through here.

use glam::Vec2;
use rand::Rng;

use super::collision::{catches, hits_hazard};
use super::state::{
    ComboPopup, EntityKind, GameEvent, MAX_PARTICLES, MAX_POPUPS, Particle, ParticleKind, Session,
};
use crate::consts::*;

/// Points for the next catch at the current streak and multiplier
pub fn catch_points(streak: u32, multiplier: u32) -> u64 {
    let streak_bonus = (streak as u64 * STREAK_BONUS_PER_CATCH).min(STREAK_BONUS_CAP);
    (BASE_SCORE + streak_bonus) * multiplier as u64
}

/// Level for a given score (1-based, one level per 500 points)
pub fn level_for_score(score: u64) -> u32 {
    (score / POINTS_PER_LEVEL) as u32 + 1
}

/// Tick the combo window down; break the streak once it runs out
pub fn decay_combo(session: &mut Session, dt: f32) {
    if session.streak == 0 {
        return;
    }
    session.combo_window -= dt;
    if session.combo_window <= 0.0 {
        log::debug!("Combo expired at streak {}", session.streak);
        session.streak = 0;
        session.combo_window = 0.0;
        session.emit(GameEvent::ComboBreak);
    }
}

/// Test every falling entity against the player and apply the results
pub fn resolve_collisions(session: &mut Session) {
    let mut caught = Vec::new();
    let mut stung = 0u32;

    let player = &session.player;
    session.entities.retain(|e| match e.kind {
        EntityKind::Collectible if catches(player, e) => {
            caught.push(e.pos);
            false
        }
        EntityKind::Hazard if hits_hazard(player, e) => {
            stung += 1;
            false
        }
        _ => true,
    });

    for pos in caught {
        apply_catch(session, pos);
    }
    for _ in 0..stung {
        if session.is_dying() {
            break;
        }
        apply_hazard_hit(session);
    }
}

/// Score a caught collectible at `pos`
pub fn apply_catch(session: &mut Session, pos: Vec2) {
    let points = catch_points(session.streak, session.multiplier());
    let old_level = session.level;

    session.score += points;
    session.streak += 1;
    session.combo_window = COMBO_WINDOW_SECS;

    burst(session, pos, ParticleKind::Honey, 8);
    popup(session, pos, format!("+{}", points));
    session.emit(GameEvent::Collected { points, pos });

    if session.streak % COMBO_MILESTONE_EVERY == 0 {
        burst(session, pos, ParticleKind::Sparkle, 12);
        session.emit(GameEvent::ComboMilestone {
            streak: session.streak,
        });
    }

    let level = level_for_score(session.score);
    if level > old_level {
        session.level = level;
        log::info!("Level up: {} (score {})", level, session.score);
        session.emit(GameEvent::LevelUp { level });
    }
}

/// A hazard reached the player
pub fn apply_hazard_hit(session: &mut Session) {
    session.lives = session.lives.saturating_sub(1);
    session.streak = 0;
    session.combo_window = 0.0;

    let pos = session.player.pos;
    burst(session, pos, ParticleKind::Sting, 10);
    session.emit(GameEvent::Hurt {
        lives: session.lives,
    });

    if session.lives == 0 {
        log::info!("Out of lives at score {}", session.score);
        burst(session, pos, ParticleKind::Sting, 30);
        session.dying = Some(DEATH_GRACE_SECS);
        session.emit(GameEvent::Died);
    }
}

/// Spray `count` particles from `pos`
fn burst(session: &mut Session, pos: Vec2, kind: ParticleKind, count: usize) {
    for _ in 0..count {
        if session.particles.len() >= MAX_PARTICLES {
            break;
        }
        let angle = session.rng.random::<f32>() * std::f32::consts::TAU;
        let speed = 60.0 + session.rng.random::<f32>() * 140.0;
        let size = 2.0 + session.rng.random::<f32>() * 4.0;
        session.particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            kind,
            life: 1.0,
            size,
        });
    }
}

fn popup(session: &mut Session, pos: Vec2, text: String) {
    if session.popups.len() >= MAX_POPUPS {
        session.popups.remove(0);
    }
    session.popups.push(ComboPopup {
        pos,
        text,
        life: 1.0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{FallingEntity, GameStatus};
    use crate::tuning::GameConfig;
    use proptest::prelude::*;

    fn running_session() -> Session {
        let mut session = Session::new(GameConfig::honey_hunt(), 42);
        session.status = GameStatus::Running;
        session
    }

    fn drop_on_player(session: &mut Session, kind: EntityKind) {
        let id = session.next_entity_id();
        session.entities.push(FallingEntity {
            id,
            kind,
            pos: session.player.pos,
            speed: 0.0,
            size: kind.size(),
            spin: 0.0,
        });
    }

    #[test]
    fn test_basic_catch() {
        let mut session = running_session();
        drop_on_player(&mut session, EntityKind::Collectible);
        resolve_collisions(&mut session);

        assert_eq!(session.score, 10);
        assert_eq!(session.streak, 1);
        assert_eq!(session.multiplier(), 1);
        assert_eq!(session.combo_window, COMBO_WINDOW_SECS);
        assert!(session.entities.is_empty());
        assert!(
            session
                .take_events()
                .contains(&GameEvent::Collected {
                    points: 10,
                    pos: session.player.pos
                })
        );
    }

    #[test]
    fn test_streak_bonus_at_cap() {
        let mut session = running_session();
        session.streak = 30;
        assert_eq!(session.multiplier(), 3);
        drop_on_player(&mut session, EntityKind::Collectible);
        resolve_collisions(&mut session);

        assert_eq!(session.score, 180);
        assert_eq!(session.streak, 31);
    }

    #[test]
    fn test_hazard_resets_combo() {
        let mut session = running_session();
        session.streak = 40;
        session.combo_window = 2.0;
        drop_on_player(&mut session, EntityKind::Hazard);
        resolve_collisions(&mut session);

        assert_eq!(session.lives, 2);
        assert_eq!(session.streak, 0);
        assert_eq!(session.multiplier(), 1);
        assert_eq!(session.combo_window, 0.0);
        assert!(session.take_events().contains(&GameEvent::Hurt { lives: 2 }));
        assert!(!session.is_dying());
    }

    #[test]
    fn test_last_life_starts_death_grace() {
        let mut session = running_session();
        session.lives = 1;
        drop_on_player(&mut session, EntityKind::Hazard);
        drop_on_player(&mut session, EntityKind::Hazard);
        resolve_collisions(&mut session);

        assert_eq!(session.lives, 0);
        assert_eq!(session.dying, Some(DEATH_GRACE_SECS));
        let events = session.take_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::Died).count(), 1);
    }

    #[test]
    fn test_milestone_every_tenth_catch() {
        let mut session = running_session();
        let mut milestones = Vec::new();
        for _ in 0..25 {
            apply_catch(&mut session, Vec2::ZERO);
            for event in session.take_events() {
                if let GameEvent::ComboMilestone { streak } = event {
                    milestones.push(streak);
                }
            }
        }
        assert_eq!(milestones, vec![10, 20]);
    }

    #[test]
    fn test_level_up_on_500_boundary() {
        let mut session = running_session();
        session.score = 495;
        apply_catch(&mut session, Vec2::ZERO);
        assert_eq!(session.score, 505);
        assert_eq!(session.level, 2);
        assert!(session.take_events().contains(&GameEvent::LevelUp { level: 2 }));

        apply_catch(&mut session, Vec2::ZERO);
        assert_eq!(session.level, 2);
        assert!(
            !session
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::LevelUp { .. }))
        );
    }

    #[test]
    fn test_combo_decay_breaks_once() {
        let mut session = running_session();
        session.streak = 12;
        session.combo_window = 0.25;

        decay_combo(&mut session, 0.1);
        assert_eq!(session.streak, 12);

        decay_combo(&mut session, 0.2);
        assert_eq!(session.streak, 0);
        assert_eq!(session.multiplier(), 1);

        decay_combo(&mut session, 0.2);
        decay_combo(&mut session, 5.0);
        assert_eq!(session.streak, 0);
        assert_eq!(session.combo_window, 0.0);
        let breaks = session
            .take_events()
            .into_iter()
            .filter(|e| *e == GameEvent::ComboBreak)
            .count();
        assert_eq!(breaks, 1);
    }

    #[test]
    fn test_catch_rearms_combo_window() {
        let mut session = running_session();
        apply_catch(&mut session, Vec2::ZERO);
        decay_combo(&mut session, 2.5);
        apply_catch(&mut session, Vec2::ZERO);
        decay_combo(&mut session, 2.5);
        assert_eq!(session.streak, 2);
    }

    proptest! {
        #[test]
        fn prop_points_match_formula(streak in 0u32..200) {
            let m = crate::sim::state::multiplier_for_streak(streak);
            let expected = (10 + (streak as u64 * 2).min(50)) * m as u64;
            prop_assert_eq!(catch_points(streak, m), expected);
        }

        #[test]
        fn prop_multiplier_tracks_streak(ops in proptest::collection::vec(0u8..3, 1..200)) {
            let mut session = running_session();
            for op in ops {
                match op {
                    0 => apply_catch(&mut session, Vec2::ZERO),
                    1 => decay_combo(&mut session, 0.7),
                    _ => {
                        session.lives = 3;
                        apply_hazard_hit(&mut session);
                    }
                }
                let s = session.streak;
                let expected = if s >= 50 { 4 } else if s >= 25 { 3 } else if s >= 10 { 2 } else { 1 };
                prop_assert_eq!(session.multiplier(), expected);
                prop_assert!(session.combo_window >= 0.0);
            }
        }

        #[test]
        fn prop_lives_never_negative(hits in 0u32..20) {
            let mut session = running_session();
            for _ in 0..hits {
                apply_hazard_hit(&mut session);
            }
            prop_assert_eq!(session.lives, 3u32.saturating_sub(hits));
            prop_assert_eq!(session.is_dying(), hits >= 3);
        }
    }
}
