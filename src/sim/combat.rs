//! Bullets, enemy drift and bullet-enemy hits
//!
//! Order inside a tick is fixed: bullets move, enemies move, then hits are
//! resolved. Removal loops walk indices from high to low.

use super::hitbox::intersects;
use super::state::{Bounds, Bullet, Enemy, GameEvent, GameState, Player};
use crate::tuning::Tuning;

/// Bullets for one volley, fanned evenly around the player's facing
///
/// The fan spans `(bullet_count - 1) * spread_angle` in total.
pub fn volley(player: &Player, tuning: &Tuning) -> Vec<Bullet> {
    let count = player.bullet_count.max(1);
    let total_spread = (count - 1) as f32 * player.spread_angle;
    let first = player.angle - total_spread / 2.0;

    (0..count)
        .map(|i| {
            Bullet::new(
                player.pos,
                first + i as f32 * player.spread_angle,
                tuning.bullet_speed,
                tuning.bullet_radius,
                player.damage,
            )
        })
        .collect()
}

/// Fire a volley and restart the held-fire cooldown
pub fn fire(state: &mut GameState) {
    let shots = volley(&state.player, &state.tuning);
    let count = shots.len() as u32;
    for bullet in shots {
        state.bullets.spawn(bullet);
    }
    state.player.fire_cooldown = Tuning::fire_cooldown_ticks(state.player.fire_rate);
    state.events.push(GameEvent::ShotsFired { count });
}

/// Move bullets and drop the ones that left the play area
pub fn advance_bullets(state: &mut GameState) {
    let bounds = state.bounds;
    for bullet in &mut state.bullets {
        bullet.pos += bullet.vel;
    }
    state.bullets.retain(|b| bounds.contains(b.pos));
}

/// One tick of enemy drift
pub fn advance_enemy(enemy: &mut Enemy, tuning: &Tuning, bounds: Bounds) {
    enemy.pos += enemy.vel;
    enemy.angle += tuning.enemy_spin;

    // Curve the path instead of travelling straight
    enemy.vel.x += enemy.angle.sin() * tuning.enemy_drift;
    enemy.vel.y += enemy.angle.cos() * tuning.enemy_drift;

    let max_speed = tuning.enemy_base_speed * tuning.enemy_max_speed_factor;
    let speed = enemy.vel.length();
    if speed > max_speed {
        enemy.vel *= max_speed / speed;
    }

    enemy.hit_flash = enemy.hit_flash.saturating_sub(1);
    wrap_enemy(enemy, bounds);
}

/// Toroidal wrap once an enemy is more than `2 * size` past an edge
pub fn wrap_enemy(enemy: &mut Enemy, bounds: Bounds) {
    let margin = enemy.size * 2.0;

    if enemy.pos.x < -margin {
        enemy.pos.x = bounds.width + margin;
    } else if enemy.pos.x > bounds.width + margin {
        enemy.pos.x = -margin;
    }

    if enemy.pos.y < -margin {
        enemy.pos.y = bounds.height + margin;
    } else if enemy.pos.y > bounds.height + margin {
        enemy.pos.y = -margin;
    }
}

pub fn advance_enemies(state: &mut GameState) {
    let bounds = state.bounds;
    for enemy in &mut state.enemies {
        advance_enemy(enemy, &state.tuning, bounds);
    }
}

/// Resolve bullet hits
///
/// Each enemy takes at most one bullet per tick and a bullet is removed the
/// moment it hits, so it can never damage a second enemy. Enemies at or below
/// zero hp are removed on the spot.
pub fn resolve_collisions(state: &mut GameState) {
    for ei in (0..state.enemies.len()).rev() {
        let Some(enemy) = state.enemies.get(ei) else {
            continue;
        };
        let hit = (0..state.bullets.len())
            .rev()
            .find(|&bi| state.bullets.get(bi).is_some_and(|b| intersects(b, enemy)));

        let Some(bullet) = hit.and_then(|bi| state.bullets.remove_at(bi)) else {
            continue;
        };
        let Some(enemy) = state.enemies.get_mut(ei) else {
            continue;
        };

        enemy.hp -= bullet.damage;
        enemy.hit_flash = state.tuning.hit_flash_ticks;
        let (pos, hp) = (enemy.pos, enemy.hp);
        state.events.push(GameEvent::EnemyHit { pos, hp });

        if enemy.is_dead() {
            state.enemies.remove_at(ei);
            state.score += state.tuning.kill_reward;
            state.kills += 1;
            log::debug!("Enemy destroyed, score={} kills={}", state.score, state.kills);
            state.events.push(GameEvent::EnemyKilled {
                pos,
                reward: state.tuning.kill_reward,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn new_state() -> GameState {
        GameState::new(1, Tuning::default(), Bounds::new(800.0, 600.0)).unwrap()
    }

    fn still_enemy(x: f32, y: f32) -> Enemy {
        Enemy::new(Vec2::new(x, y), Vec2::ZERO, 0.0, 15.0, 4.0)
    }

    fn bullet_at(x: f32, y: f32, damage: f32) -> Bullet {
        Bullet::new(Vec2::new(x, y), 0.0, 10.0, 3.0, damage)
    }

    #[test]
    fn test_volley_fans_around_facing() {
        let mut state = new_state();
        state.player.angle = 1.0;
        state.player.bullet_count = 3;
        state.player.spread_angle = 0.2;

        let shots = volley(&state.player, &state.tuning);
        let angles: Vec<f32> = shots.iter().map(|b| b.angle).collect();
        assert_eq!(angles.len(), 3);
        assert!((angles[0] - 0.8).abs() < 1e-6);
        assert!((angles[1] - 1.0).abs() < 1e-6);
        assert!((angles[2] - 1.2).abs() < 1e-6);
        assert!(shots.iter().all(|b| b.damage == state.player.damage));
    }

    #[test]
    fn test_single_bullet_goes_straight() {
        let state = new_state();
        let shots = volley(&state.player, &state.tuning);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].angle, state.player.angle);
        assert!((shots[0].vel.length() - state.tuning.bullet_speed).abs() < 1e-4);
    }

    #[test]
    fn test_bullet_removed_after_leaving_bounds() {
        let mut state = new_state();
        state.bounds = Bounds::new(130.0, 600.0);
        state.bullets.spawn(bullet_at(100.0, 100.0, 1.0));

        advance_bullets(&mut state); // x = 110
        advance_bullets(&mut state); // x = 120
        advance_bullets(&mut state); // x = 130, still on the edge
        assert_eq!(state.bullets.len(), 1);
        advance_bullets(&mut state); // x = 140
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_enemy_speed_is_capped() {
        let tuning = Tuning::default();
        let mut enemy = still_enemy(400.0, 300.0);
        enemy.vel = Vec2::new(50.0, 0.0);
        advance_enemy(&mut enemy, &tuning, Bounds::new(800.0, 600.0));
        let cap = tuning.enemy_base_speed * tuning.enemy_max_speed_factor;
        assert!((enemy.vel.length() - cap).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_spins_and_flash_floors_at_zero() {
        let tuning = Tuning::default();
        let mut enemy = still_enemy(400.0, 300.0);
        enemy.hit_flash = 1;
        let bounds = Bounds::new(800.0, 600.0);

        advance_enemy(&mut enemy, &tuning, bounds);
        assert_eq!(enemy.hit_flash, 0);
        assert!((enemy.angle - 0.02).abs() < 1e-6);
        // Drift: vx += sin(0.02) * 0.05, vy += cos(0.02) * 0.05
        assert!((enemy.vel.x - 0.02f32.sin() * 0.05).abs() < 1e-6);
        assert!((enemy.vel.y - 0.02f32.cos() * 0.05).abs() < 1e-6);

        advance_enemy(&mut enemy, &tuning, bounds);
        assert_eq!(enemy.hit_flash, 0);
    }

    #[test]
    fn test_enemy_wraps_around() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut enemy = still_enemy(-31.0, 300.0);
        enemy.vel = Vec2::new(-1.0, 0.5);
        wrap_enemy(&mut enemy, bounds);
        assert_eq!(enemy.pos.x, 830.0);
        assert_eq!(enemy.pos.y, 300.0);
        assert_eq!(enemy.vel, Vec2::new(-1.0, 0.5));

        // Exactly at the margin stays put
        let mut enemy = still_enemy(-30.0, 631.0);
        wrap_enemy(&mut enemy, bounds);
        assert_eq!(enemy.pos, Vec2::new(-30.0, -30.0));
    }

    #[test]
    fn test_four_hits_kill() {
        let mut state = new_state();
        state.enemies.spawn(still_enemy(300.0, 300.0));

        for expected_hp in [3.0, 2.0, 1.0] {
            state.bullets.spawn(bullet_at(300.0, 300.0, 1.0));
            resolve_collisions(&mut state);
            assert_eq!(state.enemies.len(), 1);
            assert_eq!(state.enemies.get(0).unwrap().hp, expected_hp);
            assert_eq!(state.enemies.get(0).unwrap().hit_flash, 10);
            assert!(state.bullets.is_empty());
        }
        assert_eq!(state.score, 0);

        state.bullets.spawn(bullet_at(300.0, 300.0, 1.0));
        resolve_collisions(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.kills, 1);
    }

    #[test]
    fn test_one_bullet_per_enemy_per_tick() {
        let mut state = new_state();
        state.enemies.spawn(still_enemy(300.0, 300.0));
        state.bullets.spawn(bullet_at(300.0, 300.0, 1.0));
        state.bullets.spawn(bullet_at(302.0, 300.0, 1.0));

        resolve_collisions(&mut state);
        assert_eq!(state.enemies.get(0).unwrap().hp, 3.0);
        assert_eq!(state.bullets.len(), 1);
        // The newest bullet is checked first
        assert_eq!(state.bullets.get(0).unwrap().pos.x, 300.0);
    }

    #[test]
    fn test_one_enemy_per_bullet() {
        let mut state = new_state();
        // Two overlapping enemies, one bullet between them
        state.enemies.spawn(still_enemy(300.0, 300.0));
        state.enemies.spawn(still_enemy(310.0, 300.0));
        state.bullets.spawn(bullet_at(305.0, 300.0, 1.0));

        resolve_collisions(&mut state);
        assert!(state.bullets.is_empty());
        // Highest index is resolved first
        assert_eq!(state.enemies.get(0).unwrap().hp, 4.0);
        assert_eq!(state.enemies.get(1).unwrap().hp, 3.0);
    }

    #[test]
    fn test_overkill_still_scores_once() {
        let mut state = new_state();
        state.enemies.spawn(still_enemy(300.0, 300.0));
        state.bullets.spawn(bullet_at(300.0, 300.0, 10.0));

        resolve_collisions(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.kills, 1);
    }

    #[test]
    fn test_miss_leaves_everything() {
        let mut state = new_state();
        state.enemies.spawn(still_enemy(300.0, 300.0));
        state.bullets.spawn(bullet_at(500.0, 500.0, 1.0));

        resolve_collisions(&mut state);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.enemies.get(0).unwrap().hp, 4.0);
    }
}
