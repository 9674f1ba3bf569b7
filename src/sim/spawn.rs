//! Enemy spawning just outside the screen edges

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{Bounds, Enemy, GameEvent, GameState};
use crate::heading;
use crate::tuning::Tuning;

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Point just past this edge; `t` in [0, 1) picks the spot along it
    pub fn spawn_point(self, bounds: Bounds, size: f32, t: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(t * bounds.width, -size),
            Edge::Right => Vec2::new(bounds.width + size, t * bounds.height),
            Edge::Bottom => Vec2::new(t * bounds.width, bounds.height + size),
            Edge::Left => Vec2::new(-size, t * bounds.height),
        }
    }
}

/// Build a fresh enemy off-screen with a random heading and speed
pub fn spawn_enemy<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, bounds: Bounds) -> Enemy {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let pos = edge.spawn_point(bounds, tuning.enemy_size, rng.random::<f32>());

    let angle = rng.random_range(0.0..TAU);
    let speed = tuning.enemy_base_speed * (0.5 + rng.random::<f32>());

    Enemy::new(
        pos,
        heading(angle) * speed,
        angle,
        tuning.enemy_size,
        tuning.enemy_start_hp,
    )
}

/// Roll the per-tick spawn chance; uncapped on purpose
pub fn maybe_spawn(state: &mut GameState) {
    if !state.rng.random_bool(state.tuning.spawn_chance) {
        return;
    }

    let enemy = spawn_enemy(&mut state.rng, &state.tuning, state.bounds);
    log::debug!("Enemy spawned at ({:.0}, {:.0})", enemy.pos.x, enemy.pos.y);
    state.events.push(GameEvent::EnemySpawned { pos: enemy.pos });
    state.enemies.spawn(enemy);
}
