//! Player steering: face the pointer, strafe relative to the facing

use glam::Vec2;

use super::hitbox::contains_point;
use super::state::{Bounds, Player};
use super::tick::DirectionKeys;
use crate::{heading, right_of};

/// Forward and right unit vectors for a facing angle
pub fn movement_vectors(angle: f32) -> (Vec2, Vec2) {
    (heading(angle), right_of(angle))
}

/// Turn toward the pointer unless it sits on the ship
pub fn update_angle(player: &mut Player, pointer: Vec2) {
    if contains_point(pointer, player) {
        return;
    }
    let delta = pointer - player.pos;
    player.angle = delta.y.atan2(delta.x);
}

/// Apply held keys; diagonals are not normalized
pub fn apply_movement(player: &mut Player, keys: &DirectionKeys, pointer: Vec2) {
    if contains_point(pointer, player) {
        return;
    }

    let (forward, right) = movement_vectors(player.angle);
    let mut step = Vec2::ZERO;
    if keys.forward {
        step += forward;
    }
    if keys.back {
        step -= forward;
    }
    if keys.left {
        step -= right;
    }
    if keys.right {
        step += right;
    }
    player.pos += step * player.speed;
}

/// Keep the ship `size` away from every edge, per axis
pub fn constrain_to_bounds(player: &mut Player, bounds: Bounds) {
    player.pos.x = clamp_axis(player.pos.x, player.size, bounds.width);
    player.pos.y = clamp_axis(player.pos.y, player.size, bounds.height);
}

/// Lower bound wins when the area is narrower than the ship
fn clamp_axis(value: f32, margin: f32, extent: f32) -> f32 {
    value.min(extent - margin).max(margin)
}

/// Full per-tick player update
pub fn update_player(player: &mut Player, keys: &DirectionKeys, pointer: Vec2, bounds: Bounds) {
    update_angle(player, pointer);
    apply_movement(player, keys, pointer);
    constrain_to_bounds(player, bounds);
}
