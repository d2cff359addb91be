//! Meta-progression: a gold bank and permanent stat upgrades that carry
//! across characters and runs.

use super::attributes::{StatBlock, StatType};
use super::hero::Character;
use super::save::Result;
use crate::core::constants::{
    META_COST_DEF, META_COST_DEX, META_COST_INT, META_COST_STR, META_COST_VIT,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaProgress {
    pub bank_gold: u32,
    /// Purchased upgrade levels, one point per purchase.
    pub bonus: StatBlock,
}

impl MetaProgress {
    /// Price of the next upgrade of `stat`.
    pub fn cost_for(&self, stat: StatType) -> u32 {
        let (base, per_level) = match stat {
            StatType::Strength => META_COST_STR,
            StatType::Dexterity => META_COST_DEX,
            StatType::Intellect => META_COST_INT,
            StatType::Vitality => META_COST_VIT,
            StatType::Defense => META_COST_DEF,
        };
        base.saturating_add(per_level.saturating_mul(self.bonus.get(stat)))
    }

    pub fn deposit(&mut self, gold: u32) {
        self.bank_gold = self.bank_gold.saturating_add(gold);
    }

    /// Buys one level of `stat`. Returns false when the bank can't cover it.
    pub fn purchase(&mut self, stat: StatType) -> bool {
        let cost = self.cost_for(stat);
        if self.bank_gold < cost {
            return false;
        }
        self.bank_gold -= cost;
        let level = self.bonus.get_mut(stat);
        *level = level.saturating_add(1);
        true
    }

    /// Adds the purchased bonuses to the hero's base stats and fully heals.
    pub fn apply_to(&self, character: &mut Character) {
        character.add_permanent_bonus(self.bonus);
    }
}

/// JSON file holding the shared `MetaProgress`.
pub struct MetaStore {
    path: PathBuf,
}

impl MetaStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join("meta.json"),
        }
    }

    /// Loads progress, falling back to the default on a missing or bad file.
    pub fn load(&self) -> MetaProgress {
        let Ok(json) = fs::read_to_string(&self.path) else {
            return MetaProgress::default();
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "meta progress unreadable, starting fresh");
            MetaProgress::default()
        })
    }

    pub fn save(&self, progress: &MetaProgress) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(progress)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
