//! Game state and core simulation types
//!
//! `GameState` is the single simulation context: every component's update
//! takes it (or a piece of it) by `&mut`, and nothing else mutates it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hitbox::{Collider, Hitbox};
use super::store::EntityStore;
use super::upgrade::{UpgradeCatalog, UpgradeId};
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play: clicks fire
    Playing,
    /// Upgrade menu open: clicks pick an option, simulation keeps running
    UpgradeSelect,
}

/// Size of the play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive containment in `[0, width] x [0, height]`
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Facing (radians)
    pub angle: f32,
    pub size: f32,
    pub hitbox: Hitbox,
    pub speed: f32,
    pub damage: f32,
    /// Shots per second while fire is held
    pub fire_rate: f32,
    pub bullet_count: u32,
    /// Angle between adjacent bullets of a volley
    pub spread_angle: f32,
    /// Ticks until held fire may shoot again
    #[serde(default)]
    pub fire_cooldown: u32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            angle: 0.0,
            size: tuning.player_size,
            hitbox: Hitbox::circle(tuning.player_size),
            speed: tuning.player_speed,
            damage: tuning.player_damage,
            fire_rate: tuning.player_fire_rate,
            bullet_count: tuning.player_bullet_count,
            spread_angle: tuning.player_spread_angle,
            fire_cooldown: 0,
        }
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,
    pub size: f32,
    pub hitbox: Hitbox,
    pub damage: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32, speed: f32, radius: f32, damage: f32) -> Self {
        Self {
            pos,
            vel: crate::heading(angle) * speed,
            angle,
            size: radius,
            hitbox: Hitbox::circle(radius),
            damage,
        }
    }
}

/// A drifting hostile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading (radians); spins a little every tick
    pub angle: f32,
    pub size: f32,
    pub hitbox: Hitbox,
    pub hp: f32,
    /// Ticks of damage flash left (cosmetic)
    pub hit_flash: u32,
}

impl Enemy {
    pub fn new(pos: Vec2, vel: Vec2, angle: f32, size: f32, hp: f32) -> Self {
        Self {
            pos,
            vel,
            angle,
            size,
            hitbox: Hitbox::square(size * 2.0),
            hp,
            hit_flash: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

impl Collider for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn hitbox(&self) -> &Hitbox {
        &self.hitbox
    }
}

impl Collider for Bullet {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn hitbox(&self) -> &Hitbox {
        &self.hitbox
    }
}

impl Collider for Enemy {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn hitbox(&self) -> &Hitbox {
        &self.hitbox
    }
}

/// Things that happened during the last tick (for effects and HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotsFired { count: u32 },
    EnemySpawned { pos: Vec2 },
    EnemyHit { pos: Vec2, hp: f32 },
    EnemyKilled { pos: Vec2, reward: u64 },
    UpgradeOffered { options: Vec<UpgradeId> },
    UpgradeChosen { id: UpgradeId },
}

/// Complete simulation context
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    #[serde(skip)]
    pub tuning: Tuning,
    #[serde(skip)]
    pub catalog: UpgradeCatalog,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Kills since the last upgrade menu opened
    pub kills: u32,
    /// Play area as of the latest tick
    pub bounds: Bounds,
    pub player: Player,
    /// Active bullets (insertion order)
    pub bullets: EntityStore<Bullet>,
    /// Active enemies (insertion order)
    pub enemies: EntityStore<Enemy>,
    /// Options on screen while in `UpgradeSelect` (empty otherwise)
    pub offered: Vec<UpgradeId>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run, validating the tuning and its upgrade catalog
    pub fn new(seed: u64, tuning: Tuning, bounds: Bounds) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let catalog = UpgradeCatalog::new(tuning.upgrades.clone(), tuning.upgrade_choices)?;
        let player = Player::new(bounds.center(), &tuning);

        log::info!("New run: seed={seed}, catalog={} upgrades", catalog.len());

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            catalog,
            time_ticks: 0,
            phase: GamePhase::Playing,
            score: 0,
            kills: 0,
            bounds,
            player,
            bullets: EntityStore::new(),
            enemies: EntityStore::new(),
            offered: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            time_ticks: self.time_ticks,
            phase: self.phase,
            score: self.score,
            kills: self.kills,
            player: &self.player,
            bullets: self.bullets.as_slice(),
            enemies: self.enemies.as_slice(),
            offered: &self.offered,
            events: &self.events,
        }
    }
}

/// Borrowed, serializable view of everything the renderer draws
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub kills: u32,
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub offered: &'a [UpgradeId],
    pub events: &'a [GameEvent],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_centered_and_playing() {
        let state = GameState::new(7, Tuning::default(), Bounds::new(400.0, 300.0)).unwrap();
        assert_eq!(state.player.pos, Vec2::new(200.0, 150.0));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.kills, 0);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_new_state_rejects_small_catalog() {
        let tuning = Tuning {
            upgrades: vec![UpgradeId::Multishot, UpgradeId::DamageUp],
            ..Default::default()
        };
        let err = GameState::new(1, tuning, Bounds::default()).unwrap_err();
        assert!(matches!(err, ConfigError::TooFewUpgrades { .. }));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(3, Tuning::default(), Bounds::default()).unwrap();
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Playing\""));
        assert!(json.contains("\"bullets\":[]"));
    }
}
