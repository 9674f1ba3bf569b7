//! Per-frame simulation tick
//!
//! One call per display refresh. Physics is frame-coupled: every speed in
//! the tuning is "pixels per tick".

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::combat::{advance_bullets, advance_enemies, fire, resolve_collisions};
use super::hitbox::contains_point;
use super::movement::update_player;
use super::spawn::maybe_spawn;
use super::state::{Bounds, GamePhase, GameState};
use super::upgrade::{check_progression, handle_menu_click};

/// Movement keys held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub keys: DirectionKeys,
    /// Pointer position in play-area coordinates
    pub pointer: Vec2,
    /// A click happened since the last tick
    pub clicked: bool,
    /// Fire button held (auto-fire at the player's fire rate)
    pub fire_held: bool,
    /// Current play area
    pub bounds: Bounds,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;
    state.bounds = input.bounds;

    // Judged once against the tick-start position
    let on_ship = contains_point(input.pointer, &state.player);
    update_player(&mut state.player, &input.keys, input.pointer, input.bounds);
    handle_fire_input(state, input, on_ship);

    maybe_spawn(state);
    advance_bullets(state);
    advance_enemies(state);
    resolve_collisions(state);

    check_progression(state);
}

/// Clicks pick an upgrade while the menu is open and fire otherwise
fn handle_fire_input(state: &mut GameState, input: &TickInput, on_ship: bool) {
    state.player.fire_cooldown = state.player.fire_cooldown.saturating_sub(1);

    match state.phase {
        GamePhase::UpgradeSelect => {
            if input.clicked {
                handle_menu_click(state, input.pointer, input.bounds);
            }
        }
        GamePhase::Playing => {
            // Clicking the ship itself is not a shot
            if on_ship {
                return;
            }
            let auto_fire = input.fire_held && state.player.fire_cooldown == 0;
            if input.clicked || auto_fire {
                fire(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, Enemy, GameEvent};
    use crate::sim::upgrade::UpgradeId;
    use crate::tuning::Tuning;

    const BOUNDS: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };

    fn quiet_state(seed: u64) -> GameState {
        let tuning = Tuning {
            spawn_chance: 0.0,
            ..Default::default()
        };
        GameState::new(seed, tuning, BOUNDS).unwrap()
    }

    fn input_at(pointer: Vec2) -> TickInput {
        TickInput {
            pointer,
            bounds: BOUNDS,
            ..Default::default()
        }
    }

    #[test]
    fn test_click_fires_volley() {
        let mut state = quiet_state(1);
        let input = TickInput {
            clicked: true,
            ..input_at(Vec2::new(700.0, 300.0))
        };
        tick(&mut state, &input);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.events.contains(&GameEvent::ShotsFired { count: 1 }));
    }

    #[test]
    fn test_click_on_ship_does_not_fire() {
        let mut state = quiet_state(1);
        let input = TickInput {
            clicked: true,
            ..input_at(state.player.pos)
        };
        tick(&mut state, &input);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_click_ahead_fires_even_if_ship_moves_under_it() {
        let mut state = quiet_state(1);
        let input = TickInput {
            clicked: true,
            keys: DirectionKeys {
                forward: true,
                ..Default::default()
            },
            ..input_at(Vec2::new(421.0, 300.0))
        };
        tick(&mut state, &input);
        // Ship ends the tick with the pointer over it, but started clear
        assert_eq!(state.player.pos, Vec2::new(405.0, 300.0));
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_held_fire_silent_in_menu() {
        let mut state = quiet_state(5);
        state.phase = GamePhase::UpgradeSelect;
        state.offered = vec![UpgradeId::Multishot, UpgradeId::DamageUp, UpgradeId::Thrusters];
        let input = TickInput {
            fire_held: true,
            ..input_at(Vec2::new(700.0, 50.0))
        };
        for _ in 0..30 {
            tick(&mut state, &input);
        }
        assert_eq!(state.phase, GamePhase::UpgradeSelect);
        assert!(state.bullets.is_empty());
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::ShotsFired { .. })));
    }

    #[test]
    fn test_held_fire_respects_cooldown() {
        let mut state = quiet_state(1);
        let input = TickInput {
            fire_held: true,
            ..input_at(Vec2::new(400.0, 10.0))
        };
        // 4 shots/s at 60 ticks/s: shots on ticks 1 and 16
        for _ in 0..29 {
            tick(&mut state, &input);
        }
        let shots = state.bullets.len();
        assert_eq!(shots, 2);
    }

    #[test]
    fn test_kill_threshold_opens_menu_same_tick() {
        let mut state = quiet_state(2);
        state.kills = 9;
        state
            .enemies
            .spawn(Enemy::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 0.0, 15.0, 1.0));
        state
            .bullets
            .spawn(Bullet::new(Vec2::new(90.0, 100.0), 0.0, 10.0, 3.0, 1.0));

        tick(&mut state, &input_at(Vec2::new(700.0, 500.0)));
        assert_eq!(state.phase, GamePhase::UpgradeSelect);
        assert_eq!(state.kills, 0);
        assert_eq!(state.score, 10);
        assert_eq!(state.offered.len(), 3);
    }

    #[test]
    fn test_menu_keeps_simulating_and_blocks_fire() {
        let mut state = quiet_state(3);
        state.phase = GamePhase::UpgradeSelect;
        state.offered = vec![UpgradeId::Multishot, UpgradeId::DamageUp, UpgradeId::Thrusters];
        state
            .enemies
            .spawn(Enemy::new(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0), 0.0, 15.0, 4.0));

        // Click in the gap between cards
        let input = TickInput {
            clicked: true,
            ..input_at(Vec2::new(290.0, 300.0))
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::UpgradeSelect);
        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies.get(0).unwrap().pos.x, 101.0);

        // Click the first card
        let input = TickInput {
            clicked: true,
            ..input_at(Vec2::new(100.0, 300.0))
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.bullet_count, 3);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_bounds_follow_input() {
        let mut state = quiet_state(4);
        let input = TickInput {
            bounds: Bounds::new(100.0, 100.0),
            pointer: Vec2::new(0.0, 0.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.bounds, Bounds::new(100.0, 100.0));
        assert_eq!(state.player.pos, Vec2::new(80.0, 80.0));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, Tuning::default(), BOUNDS).unwrap();
        let mut state2 = GameState::new(99999, Tuning::default(), BOUNDS).unwrap();

        let input = TickInput {
            fire_held: true,
            keys: DirectionKeys {
                left: true,
                ..Default::default()
            },
            ..input_at(Vec2::new(400.0, 0.0))
        };
        for _ in 0..600 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, 600);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.score, state2.score);
        for (a, b) in state1.enemies.iter().zip(state2.enemies.iter()) {
            assert_eq!(a.pos, b.pos);
        }
    }
}
