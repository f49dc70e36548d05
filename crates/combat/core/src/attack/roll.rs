use std::fmt;

use strum::EnumCount;

use crate::state::{Dice, Element, ItemHandle, MonsterTimedKind, Skill, Stat};

/// Blows per turn in hundredths (150 = one and a half blows).
///
/// Never below one full blow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "i32", into = "i32"))]
pub struct Blows(i32);

impl Blows {
    pub const ONE: Self = Self(100);

    /// Wraps a hundredths value, flooring it at one blow.
    pub const fn from_hundredths(hundredths: i32) -> Self {
        if hundredths < Self::ONE.0 {
            Self::ONE
        } else {
            Self(hundredths)
        }
    }

    pub const fn hundredths(self) -> i32 {
        self.0
    }

    /// Energy one blow costs when a full turn is worth `move_energy`.
    pub const fn energy_per_blow(self, move_energy: i32) -> i32 {
        100 * move_energy / self.0
    }
}

impl Default for Blows {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<i32> for Blows {
    fn from(hundredths: i32) -> Self {
        Self::from_hundredths(hundredths)
    }
}

impl From<Blows> for i32 {
    fn from(blows: Blows) -> Self {
        blows.0
    }
}

impl fmt::Display for Blows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Everything needed to resolve one potential blow.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRoll {
    pub dice: Dice,
    pub to_hit: i32,
    pub to_dam: i32,
    pub accuracy_stat: Stat,
    pub damage_stat: Stat,
    pub attack_skill: Skill,
    pub blows: Blows,
    pub projection: Element,
    /// Weapon or ammunition the roll was built from.
    pub source: Option<ItemHandle>,
    /// Weight of each status the blow may inflict, indexed by [`MonsterTimedKind`].
    pub status_chances: [i32; MonsterTimedKind::COUNT],
    /// Verb used in combat text ("hit", "punch", "bite").
    pub message: String,
}

impl Default for AttackRoll {
    fn default() -> Self {
        Self {
            dice: Dice::new(0, 0),
            to_hit: 0,
            to_dam: 0,
            accuracy_stat: Stat::Dex,
            damage_stat: Stat::Str,
            attack_skill: Skill::ToHitMelee,
            blows: Blows::ONE,
            projection: Element::Bludgeoning,
            source: None,
            status_chances: [0; MonsterTimedKind::COUNT],
            message: String::new(),
        }
    }
}

impl AttackRoll {
    pub fn status_chance(&self, kind: MonsterTimedKind) -> i32 {
        self.status_chances[kind as usize]
    }

    pub(crate) fn add_status_chance(&mut self, kind: MonsterTimedKind, amount: i32) {
        self.status_chances[kind as usize] += amount;
    }

    /// Floors dice and sides. `min_sides` is 0 only for blows printed with no sides.
    pub(crate) fn clamp_dice(&mut self, min_sides: i32) {
        self.dice.count = self.dice.count.max(1);
        self.dice.sides = self.dice.sides.max(min_sides);
    }
}
