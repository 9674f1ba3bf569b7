//! Star Skirmish - A top-down arena shooter
//!
//! Core modules:
//! - `sim`: Frame-coupled simulation (movement, spawning, combat, upgrades)
//! - `platform`: Input collaborator boundary (keys, pointer, play bounds)
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration errors

pub mod error;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Ticks per second the frame coupling assumes (one tick per display refresh)
    pub const TICKS_PER_SECOND: f32 = 60.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_DAMAGE: f32 = 1.0;
    /// Shots per second while fire is held
    pub const PLAYER_FIRE_RATE: f32 = 4.0;
    pub const PLAYER_BULLET_COUNT: u32 = 1;
    /// Angle between adjacent bullets of one volley (radians)
    pub const PLAYER_SPREAD_ANGLE: f32 = 0.15;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_RADIUS: f32 = 3.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 15.0;
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    pub const ENEMY_START_HP: f32 = 4.0;
    /// Heading increment per tick (radians)
    pub const ENEMY_SPIN: f32 = 0.02;
    /// Velocity perturbation per tick
    pub const ENEMY_DRIFT: f32 = 0.05;
    /// Speed cap as a multiple of base speed
    pub const ENEMY_MAX_SPEED_FACTOR: f32 = 1.5;

    /// Chance per tick of spawning one enemy
    pub const SPAWN_CHANCE: f64 = 0.02;
    /// Ticks an enemy flashes after being hit
    pub const HIT_FLASH_TICKS: u32 = 10;
    /// Score per kill
    pub const KILL_REWARD: u64 = 10;
    /// Kills needed to open the upgrade menu
    pub const UPGRADE_KILL_THRESHOLD: u32 = 10;
    /// Upgrades offered per menu
    pub const UPGRADE_CHOICES: usize = 3;

    /// Upgrade card layout
    pub const UPGRADE_CARD_WIDTH: f32 = 200.0;
    pub const UPGRADE_CARD_HEIGHT: f32 = 120.0;
    pub const UPGRADE_CARD_GAP: f32 = 20.0;
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Unit vector 90 degrees clockwise (screen space) from `angle`
#[inline]
pub fn right_of(angle: f32) -> Vec2 {
    heading(angle + std::f32::consts::FRAC_PI_2)
}
