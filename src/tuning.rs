//! Data-driven game balance
//!
//! Loaded once at startup (from JSON, or defaults). Every field has a default,
//! so a tuning file only needs to list what it changes.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::upgrade::{UpgradeCatalog, UpgradeId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    pub player_damage: f32,
    /// Shots per second while fire is held
    pub player_fire_rate: f32,
    pub player_bullet_count: u32,
    pub player_spread_angle: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_radius: f32,

    // === Enemies ===
    pub enemy_size: f32,
    pub enemy_base_speed: f32,
    pub enemy_start_hp: f32,
    pub enemy_spin: f32,
    pub enemy_drift: f32,
    pub enemy_max_speed_factor: f32,

    // === Pacing ===
    /// Independent chance per tick of spawning one enemy
    pub spawn_chance: f64,
    pub hit_flash_ticks: u32,
    pub kill_reward: u64,

    // === Upgrades ===
    pub upgrade_kill_threshold: u32,
    pub upgrade_choices: usize,
    /// Catalog in presentation order
    pub upgrades: Vec<UpgradeId>,
    pub upgrade_card_width: f32,
    pub upgrade_card_height: f32,
    pub upgrade_card_gap: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_damage: PLAYER_DAMAGE,
            player_fire_rate: PLAYER_FIRE_RATE,
            player_bullet_count: PLAYER_BULLET_COUNT,
            player_spread_angle: PLAYER_SPREAD_ANGLE,

            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,

            enemy_size: ENEMY_SIZE,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_start_hp: ENEMY_START_HP,
            enemy_spin: ENEMY_SPIN,
            enemy_drift: ENEMY_DRIFT,
            enemy_max_speed_factor: ENEMY_MAX_SPEED_FACTOR,

            spawn_chance: SPAWN_CHANCE,
            hit_flash_ticks: HIT_FLASH_TICKS,
            kill_reward: KILL_REWARD,

            upgrade_kill_threshold: UPGRADE_KILL_THRESHOLD,
            upgrade_choices: UPGRADE_CHOICES,
            upgrades: UpgradeId::ALL.to_vec(),
            upgrade_card_width: UPGRADE_CARD_WIDTH,
            upgrade_card_height: UPGRADE_CARD_HEIGHT,
            upgrade_card_gap: UPGRADE_CARD_GAP,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning file
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject balance values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("player_size", self.player_size),
            ("player_speed", self.player_speed),
            ("player_fire_rate", self.player_fire_rate),
            ("bullet_speed", self.bullet_speed),
            ("bullet_radius", self.bullet_radius),
            ("enemy_size", self.enemy_size),
            ("enemy_base_speed", self.enemy_base_speed),
            ("enemy_start_hp", self.enemy_start_hp),
            ("enemy_max_speed_factor", self.enemy_max_speed_factor),
            ("upgrade_card_width", self.upgrade_card_width),
            ("upgrade_card_height", self.upgrade_card_height),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(ConfigError::OutOfRange {
                field: "spawn_chance",
                value: self.spawn_chance,
                min: 0.0,
                max: 1.0,
            });
        }

        if self.player_bullet_count == 0 {
            return Err(ConfigError::OutOfRange {
                field: "player_bullet_count",
                value: 0.0,
                min: 1.0,
                max: f64::from(u32::MAX),
            });
        }

        UpgradeCatalog::new(self.upgrades.clone(), self.upgrade_choices)?;
        Ok(())
    }

    /// Ticks between held-fire shots
    pub fn fire_cooldown_ticks(fire_rate: f32) -> u32 {
        (TICKS_PER_SECOND / fire_rate).ceil().max(1.0) as u32
    }
}
