/// Which damage pipeline ranged attacks use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DamageModel {
    /// Dice plus flat bonuses, multiplied by brand/slay, then criticals.
    #[default]
    Standard,
    /// Deadliness inflates the dice sides, criticals add extra dice.
    Percent,
}

/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Energy in one full player turn at normal speed.
    pub move_energy: i32,
    /// Longest distance any missile travels.
    pub max_range: i32,
    /// Longest projection path traced, in grids.
    pub max_path: usize,
    pub damage_model: DamageModel,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Most distinct melee attacks a player can have (weapons plus innate blows).
    pub const MAX_ATTACKS: usize = 4;
    /// Size of a monster race's blow table.
    pub const MAX_MONSTER_BLOWS: usize = 4;
    pub const MAX_BODY_SLOTS: usize = 12;

    /// Skill points added per point of to-hit bonus.
    pub const BTH_PLUS_ADJ: i32 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVE_ENERGY: i32 = 100;
    pub const DEFAULT_MAX_RANGE: i32 = 20;
    pub const DEFAULT_MAX_PATH: usize = 256;

    pub fn new() -> Self {
        Self {
            move_energy: Self::DEFAULT_MOVE_ENERGY,
            max_range: Self::DEFAULT_MAX_RANGE,
            max_path: Self::DEFAULT_MAX_PATH,
            damage_model: DamageModel::Standard,
        }
    }

    pub fn with_damage_model(mut self, damage_model: DamageModel) -> Self {
        self.damage_model = damage_model;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
