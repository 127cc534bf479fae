//! Collision tests between the player and falling entities
//!
//! Collectibles use a round reach a little wider than the drawn bear;
//! hazards use a shrunken box, so grazing a bee does not count. The
//! fractions are tuning constants, not geometry.

use super::state::{FallingEntity, Player};
use crate::consts::{CATCH_PLAYER_FRACTION, CATCH_RADIUS_FRACTION, HAZARD_PLAYER_FRACTION};

/// Distance below which a collectible counts as caught
#[inline]
pub fn catch_reach(player: &Player, entity: &FallingEntity) -> f32 {
    player.width * CATCH_PLAYER_FRACTION + entity.radius() * CATCH_RADIUS_FRACTION
}

/// Round proximity test for collectibles
pub fn catches(player: &Player, entity: &FallingEntity) -> bool {
    entity.pos.distance(player.pos) < catch_reach(player, entity)
}

/// Half-extent overlap test for hazards
pub fn hits_hazard(player: &Player, entity: &FallingEntity) -> bool {
    let d = (entity.pos - player.pos).abs();
    let half = entity.radius();
    d.x < player.half_width() * HAZARD_PLAYER_FRACTION + half
        && d.y < player.half_height() * HAZARD_PLAYER_FRACTION + half
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EntityKind;
    use glam::Vec2;

    fn player_at(x: f32, y: f32) -> Player {
        let mut p = Player::new(Vec2::new(800.0, 600.0));
        p.pos = Vec2::new(x, y);
        p
    }

    fn entity(kind: EntityKind, x: f32, y: f32) -> FallingEntity {
        FallingEntity {
            id: 1,
            kind,
            pos: Vec2::new(x, y),
            speed: 0.0,
            size: kind.size(),
            spin: 0.0,
        }
    }

    #[test]
    fn test_catch_reach_uses_fractional_radii() {
        let p = player_at(400.0, 500.0);
        let drop = entity(EntityKind::Collectible, 400.0, 500.0);
        // 80 * 0.4 + 15 * 0.8
        assert!((catch_reach(&p, &drop) - 44.0).abs() < 1e-4);
    }

    #[test]
    fn test_collectible_catch_is_round() {
        let p = player_at(400.0, 500.0);
        assert!(catches(&p, &entity(EntityKind::Collectible, 400.0, 457.0)));
        assert!(catches(&p, &entity(EntityKind::Collectible, 430.0, 470.0)));
        // Just outside along the diagonal: sqrt(32^2 + 32^2) ~ 45.25
        assert!(!catches(&p, &entity(EntityKind::Collectible, 432.0, 468.0)));
        assert!(!catches(&p, &entity(EntityKind::Collectible, 400.0, 455.0)));
    }

    #[test]
    fn test_hazard_overlap_is_box() {
        let p = player_at(400.0, 500.0);
        // x limit: 40 * 0.8 + 18 = 50; y limit: 35 * 0.8 + 18 = 46
        assert!(hits_hazard(&p, &entity(EntityKind::Hazard, 449.0, 500.0)));
        assert!(!hits_hazard(&p, &entity(EntityKind::Hazard, 451.0, 500.0)));
        assert!(hits_hazard(&p, &entity(EntityKind::Hazard, 400.0, 455.0)));
        assert!(!hits_hazard(&p, &entity(EntityKind::Hazard, 400.0, 453.0)));
        // Corner of the box counts even though it is outside a circle
        assert!(hits_hazard(&p, &entity(EntityKind::Hazard, 448.0, 456.0)));
    }
}
