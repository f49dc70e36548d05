//! Static balance tables: critical hit tiers and the deadliness curve.
//!
//! Tables are validated once when they are built (or deserialized) so the
//! resolution code can walk them without further checks.

use tracing::debug;

use crate::error::{CombatError, TableError};
use crate::resolve::HitClass;

/// Passes `result` through, logging the classification of a rejected table.
fn checked<T>(table: &'static str, result: Result<T, TableError>) -> Result<T, TableError> {
    if let Err(err) = &result {
        debug!(
            table,
            code = err.error_code(),
            severity = err.severity().as_str(),
            "table rejected: {err}"
        );
    }
    result
}

/// Oracle providing the combat balance tables.
///
/// The combat core never owns table data; the surrounding game (or the
/// content crate) builds a [`CombatTables`] and hands it over behind this
/// trait.
pub trait TablesOracle: Send + Sync {
    fn melee_criticals(&self) -> &CriticalParams;
    fn ranged_criticals(&self) -> &CriticalParams;
    fn percent_criticals(&self) -> &PercentCriticalParams;
    fn deadliness(&self) -> &DeadlinessTable;
}

/// One tier of a critical table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriticalLevel {
    /// Power at or above which the walk moves on to the next tier.
    /// Ignored on the last tier.
    pub cutoff: i32,
    pub multiplier: i32,
    pub addend: i32,
    pub class: HitClass,
}

impl CriticalLevel {
    pub const fn new(cutoff: i32, multiplier: i32, addend: i32, class: HitClass) -> Self {
        Self {
            cutoff,
            multiplier,
            addend,
            class,
        }
    }

    /// Damage after this tier is applied to `dam`.
    pub fn apply(&self, dam: i32) -> i32 {
        self.addend + self.multiplier * dam
    }
}

/// Ordered critical tiers, lowest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<CriticalLevel>", into = "Vec<CriticalLevel>")
)]
pub struct CriticalTable {
    levels: Vec<CriticalLevel>,
}

impl CriticalTable {
    /// Builds a table, rejecting decreasing cutoffs and negative multipliers.
    pub fn new(levels: Vec<CriticalLevel>) -> Result<Self, TableError> {
        let walked = levels.len().saturating_sub(1);
        for (index, pair) in levels[..walked].windows(2).enumerate() {
            if pair[1].cutoff < pair[0].cutoff {
                return Err(TableError::UnsortedCutoffs {
                    index: index + 1,
                    cutoff: pair[1].cutoff,
                    previous: pair[0].cutoff,
                });
            }
        }
        if let Some((index, level)) = levels
            .iter()
            .enumerate()
            .find(|(_, level)| level.multiplier < 0)
        {
            return Err(TableError::NegativeMultiplier {
                index,
                multiplier: level.multiplier,
            });
        }
        Ok(Self { levels })
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[CriticalLevel] {
        &self.levels
    }

    /// First tier whose cutoff exceeds `power`, or the last tier.
    pub fn lookup(&self, power: i32) -> Option<&CriticalLevel> {
        let last = self.levels.len().checked_sub(1)?;
        let index = self.levels[..last]
            .iter()
            .position(|level| power < level.cutoff)
            .unwrap_or(last);
        self.levels.get(index)
    }
}

impl TryFrom<Vec<CriticalLevel>> for CriticalTable {
    type Error = TableError;

    fn try_from(levels: Vec<CriticalLevel>) -> Result<Self, Self::Error> {
        checked("critical", Self::new(levels))
    }
}

impl From<CriticalTable> for Vec<CriticalLevel> {
    fn from(table: CriticalTable) -> Self {
        table.levels
    }
}

/// Coefficients of the standard critical test.
///
/// `chance = weight_scale × weight + to_h_scale × to_h + level_scale × level
/// + skill_scale × skill + offset`; a critical happens when
/// `randint1(chance_range) <= chance`. Its power is
/// `power_weight_scale × weight + randint1(power_random)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriticalParams {
    pub weight_scale: i32,
    pub to_h_scale: i32,
    pub level_scale: i32,
    /// Scale of the melee or launched-missile skill.
    pub skill_scale: i32,
    /// Scale of the throwing skill (ranged tables only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub thrown_skill_scale: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub offset: i32,
    pub chance_range: i32,
    pub power_weight_scale: i32,
    pub power_random: i32,
    /// To-hit bonus against confused, held, afraid, or stunned targets.
    pub debuff_to_h: i32,
    pub levels: CriticalTable,
}

impl CriticalParams {
    /// Melee criticals: weight 1, to-hit 5, level 3, range 5000.
    pub fn default_melee() -> Self {
        Self {
            weight_scale: 1,
            to_h_scale: 5,
            level_scale: 3,
            skill_scale: 0,
            thrown_skill_scale: 0,
            offset: 0,
            chance_range: 5000,
            power_weight_scale: 1,
            power_random: 650,
            debuff_to_h: 10,
            levels: CriticalTable {
                levels: vec![
                    CriticalLevel::new(400, 2, 5, HitClass::Good),
                    CriticalLevel::new(700, 2, 10, HitClass::Great),
                    CriticalLevel::new(900, 3, 15, HitClass::Superb),
                    CriticalLevel::new(1300, 3, 20, HitClass::HiGreat),
                    CriticalLevel::new(0, 3, 25, HitClass::HiSuperb),
                ],
            },
        }
    }

    /// Ranged criticals: weight 1, to-hit 4, level 2, range 5000.
    pub fn default_ranged() -> Self {
        Self {
            weight_scale: 1,
            to_h_scale: 4,
            level_scale: 2,
            skill_scale: 1,
            thrown_skill_scale: 1,
            offset: 0,
            chance_range: 5000,
            power_weight_scale: 1,
            power_random: 500,
            debuff_to_h: 10,
            levels: CriticalTable {
                levels: vec![
                    CriticalLevel::new(500, 2, 5, HitClass::Good),
                    CriticalLevel::new(1000, 2, 10, HitClass::Great),
                    CriticalLevel::new(0, 3, 15, HitClass::Superb),
                ],
            },
        }
    }
}

/// One tier of the percent-model critical table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PercentCriticalLevel {
    /// The walk stops at this tier with probability `1 / chance`.
    pub chance: i32,
    pub added_dice: i32,
    pub class: HitClass,
}

impl PercentCriticalLevel {
    pub const fn new(chance: i32, added_dice: i32, class: HitClass) -> Self {
        Self {
            chance,
            added_dice,
            class,
        }
    }
}

/// Percent-model critical tiers, lowest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "Vec<PercentCriticalLevel>",
        into = "Vec<PercentCriticalLevel>"
    )
)]
pub struct PercentCriticalTable {
    levels: Vec<PercentCriticalLevel>,
}

impl PercentCriticalTable {
    pub fn new(levels: Vec<PercentCriticalLevel>) -> Result<Self, TableError> {
        if let Some((index, level)) = levels
            .iter()
            .enumerate()
            .find(|(_, level)| level.chance <= 0)
        {
            return Err(TableError::InvalidChance {
                index,
                chance: level.chance,
            });
        }
        Ok(Self { levels })
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[PercentCriticalLevel] {
        &self.levels
    }
}

impl TryFrom<Vec<PercentCriticalLevel>> for PercentCriticalTable {
    type Error = TableError;

    fn try_from(levels: Vec<PercentCriticalLevel>) -> Result<Self, Self::Error> {
        checked("percent critical", Self::new(levels))
    }
}

impl From<PercentCriticalTable> for Vec<PercentCriticalLevel> {
    fn from(table: PercentCriticalTable) -> Self {
        table.levels
    }
}

/// Coefficients of the percent-model ranged critical test.
///
/// The missile's hit power is scaled by a rational factor (launched or
/// thrown), then a critical happens when
/// `randint1(power × chance_power_den + chance_add_den) <= power × chance_power_num`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PercentCriticalParams {
    pub debuff_to_h: i32,
    pub launched_scale_num: i32,
    pub launched_scale_den: i32,
    pub thrown_scale_num: i32,
    pub thrown_scale_den: i32,
    pub chance_power_num: i32,
    pub chance_power_den: i32,
    pub chance_add_den: i32,
    pub levels: PercentCriticalTable,
}

impl Default for PercentCriticalParams {
    fn default() -> Self {
        Self {
            debuff_to_h: 20,
            launched_scale_num: 1,
            launched_scale_den: 1,
            thrown_scale_num: 1,
            thrown_scale_den: 1,
            chance_power_num: 1,
            chance_power_den: 1,
            chance_add_den: 400,
            levels: PercentCriticalTable {
                levels: vec![
                    PercentCriticalLevel::new(2, 1, HitClass::Good),
                    PercentCriticalLevel::new(3, 2, HitClass::Great),
                    PercentCriticalLevel::new(1, 3, HitClass::Superb),
                ],
            },
        }
    }
}

/// Conversion of to-damage plusses into a percentage added to damage.
#[rustfmt::skip]
pub const DEADLINESS_CONVERSION: [u8; DeadlinessTable::LEN] = [
    0,
    5,  10,  14,  18,  22,  26,  30,  33,  36,  39,
    42,  45,  48,  51,  54,  57,  60,  63,  66,  69,
    72,  75,  78,  81,  84,  87,  90,  93,  96,  99,
    102, 104, 107, 109, 112, 114, 117, 119, 122, 124,
    127, 129, 132, 134, 137, 139, 142, 144, 147, 149,
    152, 154, 157, 159, 162, 164, 167, 169, 172, 174,
    176, 178, 180, 182, 184, 186, 188, 190, 192, 194,
    196, 198, 200, 202, 204, 206, 208, 210, 212, 214,
    216, 218, 220, 222, 224, 226, 228, 230, 232, 234,
    236, 238, 240, 242, 244, 246, 248, 250, 251, 253,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
];

/// Deadliness curve: plus value (0..=150) to damage percentage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u8>", into = "Vec<u8>"))]
pub struct DeadlinessTable([u8; DeadlinessTable::LEN]);

impl DeadlinessTable {
    pub const LEN: usize = 151;
    pub const MAX_PLUS: i32 = 150;

    pub fn new(values: &[u8]) -> Result<Self, TableError> {
        let table: [u8; Self::LEN] =
            values
                .try_into()
                .map_err(|_| TableError::DeadlinessLength {
                    expected: Self::LEN,
                    found: values.len(),
                })?;
        if let Some(index) = table.windows(2).position(|pair| pair[1] < pair[0]) {
            return Err(TableError::DeadlinessNotMonotonic { index: index + 1 });
        }
        Ok(Self(table))
    }

    /// Percentage for a plus value; the magnitude is clamped to 150.
    pub fn percent(&self, plus: i32) -> i32 {
        let index = plus.unsigned_abs().min(Self::MAX_PLUS as u32) as usize;
        i32::from(self.0[index])
    }
}

impl Default for DeadlinessTable {
    fn default() -> Self {
        Self(DEADLINESS_CONVERSION)
    }
}

impl TryFrom<Vec<u8>> for DeadlinessTable {
    type Error = TableError;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        checked("deadliness", Self::new(&values))
    }
}

impl From<DeadlinessTable> for Vec<u8> {
    fn from(table: DeadlinessTable) -> Self {
        table.0.to_vec()
    }
}

/// All balance tables the combat core consults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatTables {
    pub melee: CriticalParams,
    pub ranged: CriticalParams,
    #[cfg_attr(feature = "serde", serde(default))]
    pub percent: PercentCriticalParams,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deadliness: DeadlinessTable,
}

impl Default for CombatTables {
    fn default() -> Self {
        Self {
            melee: CriticalParams::default_melee(),
            ranged: CriticalParams::default_ranged(),
            percent: PercentCriticalParams::default(),
            deadliness: DeadlinessTable::default(),
        }
    }
}

impl TablesOracle for CombatTables {
    fn melee_criticals(&self) -> &CriticalParams {
        &self.melee
    }

    fn ranged_criticals(&self) -> &CriticalParams {
        &self.ranged
    }

    fn percent_criticals(&self) -> &PercentCriticalParams {
        &self.percent
    }

    fn deadliness(&self) -> &DeadlinessTable {
        &self.deadliness
    }
}
