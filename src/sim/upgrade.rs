//! Upgrade catalog and the upgrade-selection phase
//!
//! Every `UPGRADE_KILL_THRESHOLD` kills the game offers a few random upgrades.
//! The simulation keeps running underneath the menu; a click on one of the
//! option cards applies it and returns to `Playing`.

use glam::Vec2;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::hitbox::Aabb;
use super::state::{Bounds, GameEvent, GamePhase, GameState, Player};
use crate::error::ConfigError;

/// Stable identifier for each upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeId {
    Multishot,
    DamageUp,
    RapidFire,
    Thrusters,
    WideSpread,
    FocusedSpread,
}

/// Immutable upgrade descriptor
#[derive(Debug, Clone, Copy)]
pub struct Upgrade {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
}

impl UpgradeId {
    /// Full catalog in presentation order
    pub const ALL: [UpgradeId; 6] = [
        UpgradeId::Multishot,
        UpgradeId::DamageUp,
        UpgradeId::RapidFire,
        UpgradeId::Thrusters,
        UpgradeId::WideSpread,
        UpgradeId::FocusedSpread,
    ];

    pub fn describe(self) -> Upgrade {
        let (name, description) = match self {
            UpgradeId::Multishot => ("Multishot", "+2 bullets per shot"),
            UpgradeId::DamageUp => ("Damage Up", "+1 bullet damage"),
            UpgradeId::RapidFire => ("Rapid Fire", "+1 shot per second"),
            UpgradeId::Thrusters => ("Thrusters", "+1 movement speed"),
            UpgradeId::WideSpread => ("Wide Spread", "Bullets fan out wider"),
            UpgradeId::FocusedSpread => ("Focused Spread", "Bullets fan out 25% tighter"),
        };
        Upgrade {
            id: self,
            name,
            description,
        }
    }

    /// Whether this upgrade is only offered to some players
    pub fn has_requirement(self) -> bool {
        matches!(self, UpgradeId::WideSpread | UpgradeId::FocusedSpread)
    }

    /// Whether the player may be offered this upgrade
    pub fn is_eligible(self, player: &Player) -> bool {
        match self {
            // Spread only matters with more than one barrel
            UpgradeId::WideSpread | UpgradeId::FocusedSpread => player.bullet_count > 1,
            _ => true,
        }
    }

    /// Apply the stat change; stacks without caps
    pub fn apply(self, player: &mut Player) {
        match self {
            UpgradeId::Multishot => player.bullet_count += 2,
            UpgradeId::DamageUp => player.damage += 1.0,
            UpgradeId::RapidFire => player.fire_rate += 1.0,
            UpgradeId::Thrusters => player.speed += 1.0,
            UpgradeId::WideSpread => player.spread_angle += 0.05,
            UpgradeId::FocusedSpread => player.spread_angle *= 0.75,
        }
    }
}

/// Validated, fixed-order upgrade catalog
#[derive(Debug, Clone, Default)]
pub struct UpgradeCatalog {
    entries: Vec<UpgradeId>,
    choices: usize,
}

impl UpgradeCatalog {
    /// Build a catalog; duplicates are dropped, order is kept
    pub fn new(ids: Vec<UpgradeId>, choices: usize) -> Result<Self, ConfigError> {
        let mut entries: Vec<UpgradeId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !entries.contains(&id) {
                entries.push(id);
            }
        }

        let available = entries.iter().filter(|id| !id.has_requirement()).count();
        if available < choices {
            return Err(ConfigError::TooFewUpgrades {
                available,
                required: choices,
            });
        }

        Ok(Self { entries, choices })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Draw distinct eligible upgrades uniformly without replacement
    pub fn sample<R: rand::Rng + ?Sized>(&self, player: &Player, rng: &mut R) -> Vec<UpgradeId> {
        let eligible: Vec<UpgradeId> = self
            .entries
            .iter()
            .copied()
            .filter(|id| id.is_eligible(player))
            .collect();
        let amount = self.choices.min(eligible.len());

        index::sample(rng, eligible.len(), amount)
            .into_iter()
            .filter_map(|i| eligible.get(i).copied())
            .collect()
    }
}

/// Screen regions of the option cards, left to right, centred in `bounds`
pub fn option_regions(state: &GameState, bounds: Bounds) -> Vec<Aabb> {
    let tuning = &state.tuning;
    let count = state.offered.len();
    if count == 0 {
        return Vec::new();
    }

    let (w, h, gap) = (
        tuning.upgrade_card_width,
        tuning.upgrade_card_height,
        tuning.upgrade_card_gap,
    );
    let total_width = count as f32 * w + (count as f32 - 1.0) * gap;
    let center = bounds.center();
    let left = center.x - total_width / 2.0;
    let top = center.y - h / 2.0;

    (0..count)
        .map(|i| Aabb::new(left + i as f32 * (w + gap), top, w, h))
        .collect()
}

/// Enter `UpgradeSelect` once enough kills have piled up
///
/// Only fires from `Playing`; kills keep counting while the menu is open and
/// are checked again after it closes.
pub fn check_progression(state: &mut GameState) {
    if state.phase != GamePhase::Playing || state.kills < state.tuning.upgrade_kill_threshold {
        return;
    }

    let options = state.catalog.sample(&state.player, &mut state.rng);
    state.kills = 0;
    state.phase = GamePhase::UpgradeSelect;
    state.offered = options.clone();

    log::info!("Upgrade menu opened with {options:?}");
    state.events.push(GameEvent::UpgradeOffered { options });
}

/// Handle a click while the menu is open
///
/// Returns the chosen upgrade, or `None` when the click missed every card
/// (the menu stays open).
pub fn handle_menu_click(state: &mut GameState, pointer: Vec2, bounds: Bounds) -> Option<UpgradeId> {
    if state.phase != GamePhase::UpgradeSelect {
        return None;
    }

    let regions = option_regions(state, bounds);
    let slot = regions.iter().position(|r| r.contains_point(pointer))?;
    let id = *state.offered.get(slot)?;

    id.apply(&mut state.player);
    state.offered.clear();
    state.phase = GamePhase::Playing;

    log::info!("Upgrade chosen: {}", id.describe().name);
    state.events.push(GameEvent::UpgradeChosen { id });
    Some(id)
}
