//! Player movement and soft-bounds steering

use super::sim::PlayerState;

/// Movement constants shared by every player
#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    /// Forward speed in world units per second
    pub speed: f32,
    /// Largest heading change per second, in degrees, either direction
    pub max_turn_jitter: f32,
    /// Half-extent of the square players roam freely in
    pub soft_bound: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 150.0,
            max_turn_jitter: 45.0,
            soft_bound: 2400.0,
        }
    }
}

/// Wrap an angle in degrees into [0, 360)
pub fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Physics system for updating player positions and headings
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Advance one player by `dt` seconds.
    ///
    /// `jitter` is the heading perturbation in degrees per second for this
    /// tick; the caller draws it from `[-max_turn_jitter, max_turn_jitter)`.
    /// Leaving the soft bounds reflects the heading, axis by axis, without
    /// touching the position, so a single tick may still overshoot.
    pub fn advance_player(player: &mut PlayerState, dt: f32, jitter: f32, cfg: &MovementConfig) {
        player.yaw = wrap_degrees(player.yaw + jitter * dt);

        let rad = player.yaw.to_radians();
        player.x += rad.cos() * cfg.speed * dt;
        player.y += rad.sin() * cfg.speed * dt;

        if Self::outside(player.x, cfg.soft_bound) {
            player.yaw = wrap_degrees(180.0 - player.yaw);
        }
        if Self::outside(player.y, cfg.soft_bound) {
            player.yaw = wrap_degrees(-player.yaw);
        }
    }

    fn outside(v: f32, bound: f32) -> bool {
        v < -bound || v > bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ws::protocol::Team;

    fn player_at(x: f32, y: f32, yaw: f32) -> PlayerState {
        PlayerState::new("p1".to_string(), Team::T, x, y, yaw)
    }

    #[test]
    fn wrap_degrees_stays_in_range() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(725.0), 5.0);
        let tiny = wrap_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn moves_along_heading() {
        let cfg = MovementConfig::default();
        let mut p = player_at(0.0, 0.0, 90.0);
        PhysicsSystem::advance_player(&mut p, 0.1, 0.0, &cfg);
        assert!(p.x.abs() < 1e-3);
        assert!((p.y - 15.0).abs() < 1e-3);
        assert_eq!(p.yaw, 90.0);
    }

    #[test]
    fn jitter_is_scaled_by_delta() {
        let cfg = MovementConfig::default();
        let mut p = player_at(0.0, 0.0, 10.0);
        PhysicsSystem::advance_player(&mut p, 0.1, -45.0, &cfg);
        assert!((p.yaw - 5.5).abs() < 1e-4);
    }

    #[test]
    fn crossing_x_bound_reflects_heading_with_180_minus_yaw() {
        let cfg = MovementConfig::default();
        let mut p = player_at(2399.0, 0.0, 0.0);
        PhysicsSystem::advance_player(&mut p, 0.1, 0.0, &cfg);

        // Position is not clamped, only the heading turns around
        assert!(p.x > 2400.0);
        assert_eq!(p.yaw, 180.0);
    }

    #[test]
    fn x_reflection_ignores_y_axis() {
        let cfg = MovementConfig::default();
        // Heading 30 degrees, well inside on y
        let mut p = player_at(2399.0, 100.0, 30.0);
        PhysicsSystem::advance_player(&mut p, 0.1, 0.0, &cfg);
        assert!((p.yaw - 150.0).abs() < 1e-4);
    }

    #[test]
    fn crossing_y_bound_negates_heading() {
        let cfg = MovementConfig::default();
        let mut p = player_at(0.0, -2399.0, 270.0);
        PhysicsSystem::advance_player(&mut p, 0.1, 0.0, &cfg);
        assert!(p.y < -2400.0);
        assert!((p.yaw - 90.0).abs() < 1e-4);
    }

    #[test]
    fn corner_applies_both_reflections_independently() {
        let cfg = MovementConfig::default();
        let mut p = player_at(2399.0, 2399.0, 45.0);
        PhysicsSystem::advance_player(&mut p, 0.1, 0.0, &cfg);
        // 180 - 45 = 135, then -135 wraps to 225
        assert!((p.yaw - 225.0).abs() < 1e-4);
    }
}
