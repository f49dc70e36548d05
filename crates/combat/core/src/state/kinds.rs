//! Enumerations shared by the player, monster, and item models.
//!
//! Every enum here is dense and `#[repr(usize)]`-compatible so that it can
//! index the fixed-size arrays held by the state records (`stat_ind`,
//! `skills`, `status_chances`, monster timed counters).

/// Player statistics.
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
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Stat {
    Str,
    Int,
    Wis,
    Dex,
    Con,
}

/// Player skills. The to-hit skills select the hit-chance base formula.
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
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Skill {
    DisarmPhys,
    DisarmMagic,
    Device,
    Save,
    /// Perception; some innate blows (gazes, spits) aim with it.
    Search,
    Stealth,
    ToHitMelee,
    ToHitBow,
    ToHitThrow,
    Digging,
    Magic,
}

/// Projection (damage) categories.
///
/// Physical weapons use the last three variants; the rest are elemental and
/// interact with monster immunities and brands.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    Acid,
    Elec,
    Fire,
    Cold,
    Pois,
    Light,
    Dark,
    Sound,
    Shard,
    Nexus,
    Nether,
    Chaos,
    Disen,
    Water,
    Ice,
    Gravity,
    Inertia,
    Force,
    Time,
    Plasma,
    Meteor,
    Missile,
    Mana,
    HolyOrb,
    Arrow,
    Piercing,
    Slashing,
    #[default]
    Bludgeoning,
}

impl Element {
    /// Sentence fragment describing what the projection does to its target,
    /// for elements that have one ("you burn it").
    pub const fn player_message(self) -> Option<&'static str> {
        match self {
            Element::Acid => Some("corrode"),
            Element::Elec => Some("electrocute"),
            Element::Fire => Some("burn"),
            Element::Cold => Some("freeze"),
            Element::Pois => Some("poison"),
            _ => None,
        }
    }

    /// True for the weapon damage categories (no elemental component).
    pub const fn is_physical(self) -> bool {
        matches!(
            self,
            Element::Piercing | Element::Slashing | Element::Bludgeoning | Element::Arrow
        )
    }
}

/// Timed statuses a monster can carry.
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
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MonsterTimedKind {
    Sleep,
    Stun,
    Conf,
    Fear,
    Slow,
    Fast,
    Hold,
    Disen,
    Command,
    Changed,
}

/// Kinds of equipment slots on a body.
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
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SlotKind {
    Weapon,
    Bow,
    Ring,
    Amulet,
    Light,
    BodyArmor,
    Cloak,
    Shield,
    Hat,
    Gloves,
    Boots,
}
