//! Monster races (static) and monster instances (mutable HP and timed status).

use std::sync::Arc;

use arrayvec::ArrayVec;
use bitflags::bitflags;
use strum::EnumCount;

use crate::config::CombatConfig;
use crate::state::{Dice, Element, MonsterId, MonsterTimedKind, Position, Skill, SlotKind};

bitflags! {
    /// Race properties consulted by slays, brands, and drain effects.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RaceFlags: u32 {
        const ANIMAL    = 1 << 0;
        const EVIL      = 1 << 1;
        const UNDEAD    = 1 << 2;
        const DEMON     = 1 << 3;
        const ORC       = 1 << 4;
        const TROLL     = 1 << 5;
        const GIANT     = 1 << 6;
        const DRAGON    = 1 << 7;
        const NONLIVING = 1 << 8;

        const IM_ACID   = 1 << 16;
        const IM_ELEC   = 1 << 17;
        const IM_FIRE   = 1 << 18;
        const IM_COLD   = 1 << 19;
        const IM_POIS   = 1 << 20;

        const HURT_FIRE = 1 << 24;
        const HURT_COLD = 1 << 25;
    }
}

impl RaceFlags {
    /// Immunity flag protecting against a brand element, if one exists.
    pub const fn immunity_to(element: Element) -> Option<RaceFlags> {
        match element {
            Element::Acid => Some(RaceFlags::IM_ACID),
            Element::Elec => Some(RaceFlags::IM_ELEC),
            Element::Fire => Some(RaceFlags::IM_FIRE),
            Element::Cold => Some(RaceFlags::IM_COLD),
            Element::Pois => Some(RaceFlags::IM_POIS),
            _ => None,
        }
    }

    /// Vulnerability flag that doubles a brand element, if one exists.
    pub const fn vulnerability_to(element: Element) -> Option<RaceFlags> {
        match element {
            Element::Fire => Some(RaceFlags::HURT_FIRE),
            Element::Cold => Some(RaceFlags::HURT_COLD),
            _ => None,
        }
    }
}

/// How a blow is delivered (hit, bite, claw, gaze...).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlowMethod {
    pub name: String,
    /// Skill the blow aims with when used by a shapechanged player.
    pub skill: Skill,
    /// Body slot the blow needs free (a bite needs an uncovered head).
    pub equip_slot: SlotKind,
    /// Projection used when the effect does not name one.
    pub projection: Element,
    /// Verb shown when the player delivers this blow.
    pub message: String,
}

/// What a blow does on contact.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlowEffect {
    pub name: String,
    /// Projection for the damage; `None` defers to the method.
    pub projection: Option<Element>,
    /// Timed status the blow inflicts on a monster target.
    pub timed: Option<MonsterTimedKind>,
}

impl BlowEffect {
    /// Plain damage with no rider.
    pub fn hurt() -> Self {
        Self {
            name: "hurt".into(),
            projection: None,
            timed: None,
        }
    }
}

/// One entry of a race's static blow table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterBlow {
    /// `None` marks an empty slot and terminates the table.
    pub method: Option<BlowMethod>,
    pub effect: BlowEffect,
    pub dice: Dice,
}

/// Static description of a monster kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterRace {
    pub name: String,
    pub level: i32,
    pub ac: i32,
    pub flags: RaceFlags,
    pub blows: ArrayVec<MonsterBlow, { CombatConfig::MAX_MONSTER_BLOWS }>,
}

impl MonsterRace {
    pub fn new(name: impl Into<String>, level: i32, ac: i32) -> Self {
        Self {
            name: name.into(),
            level,
            ac,
            flags: RaceFlags::empty(),
            blows: ArrayVec::new(),
        }
    }

    pub fn with_flags(mut self, flags: RaceFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Appends a blow; extra blows beyond the table capacity are ignored.
    pub fn with_blow(mut self, blow: MonsterBlow) -> Self {
        let _ = self.blows.try_push(blow);
        self
    }

    /// Living monsters can be drained by vampiric attacks.
    pub fn is_living(&self) -> bool {
        !self
            .flags
            .intersects(RaceFlags::UNDEAD | RaceFlags::DEMON | RaceFlags::NONLIVING)
    }
}

/// Timed status counters, indexed by [`MonsterTimedKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTimed([i32; MonsterTimedKind::COUNT]);

impl MonsterTimed {
    pub fn get(&self, kind: MonsterTimedKind) -> i32 {
        self.0[kind as usize]
    }

    pub fn set(&mut self, kind: MonsterTimedKind, value: i32) {
        self.0[kind as usize] = value.max(0);
    }

    pub fn is_active(&self, kind: MonsterTimedKind) -> bool {
        self.get(kind) > 0
    }

    /// Confused, held, afraid, or stunned monsters are easier to hit critically.
    pub fn is_debuffed(&self) -> bool {
        self.is_active(MonsterTimedKind::Conf)
            || self.is_active(MonsterTimedKind::Hold)
            || self.is_active(MonsterTimedKind::Fear)
            || self.is_active(MonsterTimedKind::Stun)
    }

    pub fn as_array(&self) -> [i32; MonsterTimedKind::COUNT] {
        self.0
    }
}

/// A monster instance on the level.
#[derive(Clone, Debug)]
pub struct Monster {
    pub id: MonsterId,
    pub race: Arc<MonsterRace>,
    pub hp: i32,
    pub max_hp: i32,
    pub timed: MonsterTimed,
    /// The player can see the monster.
    pub visible: bool,
    /// The player is aware of the monster (seen, heard, or detected).
    pub obvious: bool,
    pub position: Position,
}

impl Monster {
    pub fn new(id: MonsterId, race: Arc<MonsterRace>, hp: i32, position: Position) -> Self {
        Self {
            id,
            race,
            hp,
            max_hp: hp,
            timed: MonsterTimed::default(),
            visible: true,
            obvious: true,
            position,
        }
    }

    pub fn with_timed(mut self, kind: MonsterTimedKind, value: i32) -> Self {
        self.timed.set(kind, value);
        self
    }

    pub fn unseen(mut self) -> Self {
        self.visible = false;
        self.obvious = false;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.hp < 0
    }

    /// Subtracts `damage` from hit points. Returns whether the monster died.
    pub fn take_hit(&mut self, damage: i32) -> bool {
        self.hp -= damage.max(0);
        self.is_dead()
    }

    /// Adds to a timed counter (never below zero). Returns whether it changed.
    pub fn inc_timed(&mut self, kind: MonsterTimedKind, amount: i32) -> bool {
        let before = self.timed.get(kind);
        self.timed.set(kind, before + amount);
        self.timed.get(kind) != before
    }

    pub fn ac(&self) -> i32 {
        self.race.ac
    }

    pub fn level(&self) -> i32 {
        self.race.level
    }
}
