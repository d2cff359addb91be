use super::attributes::StatBlock;
use crate::core::constants::{BASE_HP, HERO_BASE_DEFENSE, HP_PER_VITALITY};

/// How current HP is adjusted when max HP is recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpPolicy {
    /// Character creation and permanent meta upgrades: HP = new max.
    FullHeal,
    /// Mid-run changes: keep the wounded fraction, rescaled to the new max.
    Proportional,
}

/// Values computed from a character's total stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStats {
    pub total: StatBlock,
    pub max_hp: u32,
    /// Enemy attack rolls must meet or beat this to land.
    pub defense_target: u32,
}

impl DerivedStats {
    /// Calculates derived stats from base stats plus folded equipment bonuses.
    pub fn calculate_derived_stats(base: &StatBlock, equipment_bonus: &StatBlock) -> Self {
        let total = *base + *equipment_bonus;
        Self {
            total,
            max_hp: max_hp_for(&total),
            defense_target: HERO_BASE_DEFENSE.saturating_add(total.def),
        }
    }
}

/// Max HP = max(1, BASE_HP + HP_PER_VITALITY × VIT + flat HP bonus).
pub fn max_hp_for(total: &StatBlock) -> u32 {
    let raw = BASE_HP + HP_PER_VITALITY * total.vit as i64 + total.hp_bonus as i64;
    raw.clamp(1, u32::MAX as i64) as u32
}

/// Applies `policy` to produce the new current HP.
///
/// Proportional mode preserves `current / old_max` (1.0 when `old_max` is 0),
/// rounds, and clamps to `[0, new_max]`. Zero stays zero.
pub fn rescale_hp(current: u32, old_max: u32, new_max: u32, policy: HpPolicy) -> u32 {
    match policy {
        HpPolicy::FullHeal => new_max,
        HpPolicy::Proportional => {
            let ratio = if old_max == 0 {
                1.0
            } else {
                current as f64 / old_max as f64
            };
            let scaled = (new_max as f64 * ratio).round();
            scaled.clamp(0.0, new_max as f64) as u32
        }
    }
}
