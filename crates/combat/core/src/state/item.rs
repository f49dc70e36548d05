//! Items as seen by the combat core: weapons, launchers, ammunition, shields.

use std::fmt;

use bitflags::bitflags;

use crate::env::CombatRng;
use crate::state::{Element, ItemHandle, RaceFlags};

/// A damage dice expression (`count`d`sides`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dice {
    pub count: i32,
    pub sides: i32,
}

impl Dice {
    pub const fn new(count: i32, sides: i32) -> Self {
        Self { count, sides }
    }

    /// Rolls the dice. Degenerate expressions (no dice or no sides) roll 0.
    pub fn roll(&self, rng: &mut (impl CombatRng + ?Sized)) -> i32 {
        rng.damroll(self.count, self.sides)
    }

    /// Average total, rounded down.
    pub fn average(&self) -> i32 {
        self.count * (self.sides + 1) / 2
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// Broad item classes. Weapon specializations and ammunition rules key off these.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemClass {
    Sword,
    Hafted,
    Polearm,
    Digger,
    Bow,
    Shot,
    Arrow,
    Bolt,
    Shield,
    Flask,
    Other,
}

impl ItemClass {
    pub const fn is_ammo(self) -> bool {
        matches!(self, ItemClass::Shot | ItemClass::Arrow | ItemClass::Bolt)
    }

    /// Arrows and bolts; only these benefit from piercing shots.
    pub const fn is_sharp_missile(self) -> bool {
        matches!(self, ItemClass::Arrow | ItemClass::Bolt)
    }

    pub const fn is_melee_weapon(self) -> bool {
        matches!(
            self,
            ItemClass::Sword | ItemClass::Hafted | ItemClass::Polearm | ItemClass::Digger
        )
    }

    pub const fn ammo_kind(self) -> Option<AmmoKind> {
        match self {
            ItemClass::Shot => Some(AmmoKind::Shot),
            ItemClass::Arrow => Some(AmmoKind::Arrow),
            ItemClass::Bolt => Some(AmmoKind::Bolt),
            _ => None,
        }
    }
}

/// Ammunition families a launcher can fire.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AmmoKind {
    Shot,
    Arrow,
    Bolt,
}

bitflags! {
    /// Item properties relevant to combat.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ItemFlags: u16 {
        /// Designed to be thrown (daggers, spears, throwing axes).
        const THROWING = 1 << 0;
        /// Shatters on impact for extra damage (flasks of oil).
        const EXPLODE  = 1 << 1;
        const BLESSED  = 1 << 2;
        /// Heavy hits shake the dungeon.
        const IMPACT   = 1 << 3;
    }
}

/// Elemental brand carried by an item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Brand {
    pub element: Element,
    pub multiplier: i32,
    /// Multiplier used by the percent damage model, in tenths.
    pub percent_multiplier: i32,
    /// "You burn the orc."
    pub melee_verb: String,
    /// "Your arrow burns the orc."
    pub ranged_verb: String,
}

impl Brand {
    pub fn new(
        element: Element,
        multiplier: i32,
        melee_verb: impl Into<String>,
        ranged_verb: impl Into<String>,
    ) -> Self {
        Self {
            element,
            multiplier,
            percent_multiplier: multiplier * 10,
            melee_verb: melee_verb.into(),
            ranged_verb: ranged_verb.into(),
        }
    }
}

/// Race-specific slay carried by an item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slay {
    /// Race flags the slay is effective against (any match applies).
    pub race: RaceFlags,
    pub multiplier: i32,
    /// Multiplier used by the percent damage model, in tenths.
    pub percent_multiplier: i32,
    pub melee_verb: String,
    pub ranged_verb: String,
}

impl Slay {
    pub fn new(
        race: RaceFlags,
        multiplier: i32,
        melee_verb: impl Into<String>,
        ranged_verb: impl Into<String>,
    ) -> Self {
        Self {
            race,
            multiplier,
            percent_multiplier: multiplier * 10,
            melee_verb: melee_verb.into(),
            ranged_verb: ranged_verb.into(),
        }
    }
}

/// A single item stack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub handle: ItemHandle,
    pub name: String,
    pub class: ItemClass,
    pub dice: Dice,
    pub to_h: i32,
    pub to_d: i32,
    /// Weight of one item, in tenth-pounds.
    pub weight: i32,
    /// Launcher multiplier for bows; unused otherwise.
    pub pval: i32,
    pub flags: ItemFlags,
    pub artifact: bool,
    /// Percent chance to break when it hits its target.
    pub break_percent: i32,
    pub projection: Element,
    pub brands: Vec<Brand>,
    pub slays: Vec<Slay>,
    /// Ammunition a launcher fires.
    pub shoots: Option<AmmoKind>,
    pub number: u16,
}

impl Item {
    /// Creates a single plain item of the given class.
    pub fn new(handle: ItemHandle, name: impl Into<String>, class: ItemClass) -> Self {
        let projection = match class {
            ItemClass::Sword | ItemClass::Polearm => Element::Slashing,
            ItemClass::Arrow | ItemClass::Bolt => Element::Arrow,
            ItemClass::Digger => Element::Piercing,
            ItemClass::Flask => Element::Fire,
            _ => Element::Bludgeoning,
        };
        let break_percent = match class {
            ItemClass::Arrow => 35,
            ItemClass::Bolt | ItemClass::Shot => 25,
            ItemClass::Flask => 100,
            _ => 10,
        };

        Self {
            handle,
            name: name.into(),
            class,
            dice: Dice::new(1, 1),
            to_h: 0,
            to_d: 0,
            weight: 0,
            pval: 0,
            flags: ItemFlags::empty(),
            artifact: false,
            break_percent,
            projection,
            brands: Vec::new(),
            slays: Vec::new(),
            shoots: None,
            number: 1,
        }
    }

    pub fn with_dice(mut self, count: i32, sides: i32) -> Self {
        self.dice = Dice::new(count, sides);
        self
    }

    pub fn with_bonuses(mut self, to_h: i32, to_d: i32) -> Self {
        self.to_h = to_h;
        self.to_d = to_d;
        self
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_number(mut self, number: u16) -> Self {
        self.number = number;
        self
    }

    pub fn with_break_percent(mut self, break_percent: i32) -> Self {
        self.break_percent = break_percent;
        self
    }

    pub fn with_brand(mut self, brand: Brand) -> Self {
        self.brands.push(brand);
        self
    }

    pub fn with_slay(mut self, slay: Slay) -> Self {
        self.slays.push(slay);
        self
    }

    pub fn as_artifact(mut self) -> Self {
        self.artifact = true;
        self
    }

    /// Turns the item into a launcher for `ammo` with the given multiplier.
    pub fn as_launcher(mut self, ammo: AmmoKind, multiplier: i32) -> Self {
        self.shoots = Some(ammo);
        self.pval = multiplier;
        self
    }

    pub fn has(&self, flag: ItemFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_ammo(&self) -> bool {
        self.class.is_ammo()
    }
}
