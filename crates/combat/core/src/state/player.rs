//! Player record consumed by the combat core.
//!
//! The surrounding game derives [`PlayerState`] from race, class, and
//! equipment; the core only reads it, except for the attack table it fills in
//! through [`crate::attack::derive_attacks`] and the per-turn energy counter.

use arrayvec::ArrayVec;
use bitflags::bitflags;
use strum::EnumCount;

use crate::attack::{AttackRoll, RangedProfile};
use crate::config::CombatConfig;
use crate::state::{AmmoKind, Item, ItemClass, ItemHandle, Position, Skill, SlotKind, Stat};
use crate::stats::PowerLevels;

bitflags! {
    /// Derived player properties from race, class, and equipment.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PlayerFlags: u32 {
        /// Too frightened to melee.
        const AFRAID       = 1 << 0;
        /// Heavy blows cause earthquakes.
        const IMPACT       = 1 << 1;
        /// Class ability: opportunistic shield bashes.
        const SHIELD_BASH  = 1 << 2;
        /// Class ability: extra shots with launchers.
        const FAST_SHOT    = 1 << 3;
        /// Class ability: bonus with blessed or hafted weapons.
        const BLESS_WEAPON = 1 << 4;
    }
}

bitflags! {
    /// Timed effects currently active on the player.
    ///
    /// Durations are tracked by the surrounding game; the core only reads
    /// them and asks for some to be cleared.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PlayerTimed: u32 {
        /// Next melee hit confuses the target.
        const ATT_CONF  = 1 << 0;
        /// Melee hits heal the player.
        const ATT_VAMP  = 1 << 1;
        /// Next shot pierces through several monsters.
        const POWERSHOT = 1 << 2;
        const BLIND     = 1 << 3;
        const BLOODLUST = 1 << 4;
    }
}

/// One equipment slot on the player's body.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodySlot {
    pub kind: SlotKind,
    pub item: Option<Item>,
}

impl BodySlot {
    pub fn empty(kind: SlotKind) -> Self {
        Self { kind, item: None }
    }

    pub fn holding(kind: SlotKind, item: Item) -> Self {
        Self {
            kind,
            item: Some(item),
        }
    }
}

/// Derived combat numbers, recomputed whenever equipment or status changes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    /// Stat indices (0 = worst, 7 = average, 14 = the scaling ceiling).
    pub stat_ind: [i32; Stat::COUNT],
    pub skills: [i32; Skill::COUNT],
    pub to_h: i32,
    pub to_d: i32,
    /// Launcher multiplier, including extra might.
    pub ammo_mult: i32,
    /// Shots per turn, in tenths.
    pub num_shots: i32,
    pub ammo_kind: Option<AmmoKind>,
    pub heavy_wield: bool,
    /// The launcher is too heavy to draw; no extra shots apply.
    pub heavy_shoot: bool,
    pub flags: PlayerFlags,
    pub attacks: ArrayVec<AttackRoll, { CombatConfig::MAX_ATTACKS }>,
    pub ranged: Option<RangedProfile>,
}

impl Default for PlayerState {
    /// Average stats, untrained skills, no attacks derived yet.
    fn default() -> Self {
        Self {
            stat_ind: [7; Stat::COUNT],
            skills: [0; Skill::COUNT],
            to_h: 0,
            to_d: 0,
            ammo_mult: 0,
            num_shots: 10,
            ammo_kind: None,
            heavy_wield: false,
            heavy_shoot: false,
            flags: PlayerFlags::empty(),
            attacks: ArrayVec::new(),
            ranged: None,
        }
    }
}

impl PlayerState {
    pub fn stat(&self, stat: Stat) -> i32 {
        self.stat_ind[stat as usize]
    }

    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills[skill as usize]
    }

    pub fn with_stat(mut self, stat: Stat, index: i32) -> Self {
        self.stat_ind[stat as usize] = index;
        self
    }

    pub fn with_skill(mut self, skill: Skill, value: i32) -> Self {
        self.skills[skill as usize] = value;
        self
    }

    pub fn has(&self, flag: PlayerFlags) -> bool {
        self.flags.contains(flag)
    }
}

/// The attacking player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub level: i32,
    /// Body weight, in pounds.
    pub weight: i32,
    /// Total carried weight, in tenth-pounds.
    pub total_weight: i32,
    /// Energy banked for this turn.
    pub energy: i32,
    /// Energy spent by the current command.
    pub energy_use: i32,
    pub timed: PlayerTimed,
    pub body: ArrayVec<BodySlot, { CombatConfig::MAX_BODY_SLOTS }>,
    pub powers: PowerLevels,
    pub position: Position,
    pub state: PlayerState,
}

impl Player {
    /// A level-1 player with the standard humanoid body and a full turn of energy.
    pub fn new(level: i32) -> Self {
        let mut body = ArrayVec::new();
        for kind in [
            SlotKind::Weapon,
            SlotKind::Bow,
            SlotKind::Ring,
            SlotKind::Ring,
            SlotKind::Amulet,
            SlotKind::Light,
            SlotKind::BodyArmor,
            SlotKind::Cloak,
            SlotKind::Shield,
            SlotKind::Hat,
            SlotKind::Gloves,
            SlotKind::Boots,
        ] {
            body.push(BodySlot::empty(kind));
        }

        Self {
            level,
            weight: 150,
            total_weight: 0,
            energy: 100,
            energy_use: 0,
            timed: PlayerTimed::empty(),
            body,
            powers: PowerLevels::default(),
            position: Position::ORIGIN,
            state: PlayerState::default(),
        }
    }

    /// Places `item` in the first slot of `kind`, replacing what was there.
    pub fn equip(&mut self, kind: SlotKind, item: Item) -> &mut Self {
        if let Some(slot) = self.body.iter_mut().find(|slot| slot.kind == kind) {
            slot.item = Some(item);
        }
        self
    }

    pub fn slots_of(&self, kind: SlotKind) -> impl Iterator<Item = &BodySlot> {
        self.body.iter().filter(move |slot| slot.kind == kind)
    }

    fn first_item(&self, kind: SlotKind) -> Option<&Item> {
        self.slots_of(kind).find_map(|slot| slot.item.as_ref())
    }

    pub fn weapon(&self) -> Option<&Item> {
        self.first_item(SlotKind::Weapon)
    }

    pub fn launcher(&self) -> Option<&Item> {
        self.first_item(SlotKind::Bow)
    }

    /// A shield held anywhere other than the weapon slot.
    pub fn shield(&self) -> Option<&Item> {
        self.body
            .iter()
            .filter(|slot| slot.kind != SlotKind::Weapon)
            .filter_map(|slot| slot.item.as_ref())
            .find(|item| item.class == ItemClass::Shield)
    }

    /// Looks up an equipped item by handle.
    pub fn item(&self, handle: ItemHandle) -> Option<&Item> {
        self.body
            .iter()
            .filter_map(|slot| slot.item.as_ref())
            .find(|item| item.handle == handle)
    }

    /// Equipped items other than the weapon and launcher; their slays and
    /// brands (rings of flames, gauntlets of venom) apply to melee too.
    pub fn off_weapon_items(&self) -> impl Iterator<Item = &Item> {
        self.body
            .iter()
            .filter(|slot| !matches!(slot.kind, SlotKind::Weapon | SlotKind::Bow))
            .filter_map(|slot| slot.item.as_ref())
    }
}
