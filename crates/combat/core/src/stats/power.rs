//! Class and race powers.
//!
//! A power is a 0–50 rating granted by race, class, and level. Rules read it
//! either raw or mapped through a [`PowerCurve`] onto an arbitrary range.

use strum::EnumCount;

/// Highest level a power can reach.
pub const MAX_POWER_LEVEL: i32 = 50;

/// Powers that feed combat formulas.
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
pub enum PowerKind {
    AirSpecialization,
    FireSpecialization,
    EarthSpecialization,
    WaterSpecialization,
    PoisonSpecialization,
    DivinationSpecialization,
    TeleportationSpecialization,
    NecromancySpecialization,
    HealingSpecialization,
    SwordSpecialization,
    HaftedSpecialization,
    PolearmSpecialization,
    BowSpecialization,
    UnarmedStrike,
    UnarmouredAgility,
    Backstab,
}

/// Shape used to map a power level onto a target range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PowerCurve {
    #[default]
    Linear,
    /// Slow start, fast finish.
    Square,
    /// Fast start, slow finish.
    Sqrt,
}

impl PowerCurve {
    /// Maps `level` (clamped to 0..=50) so that level 50 yields `scaleto`.
    pub fn apply(self, level: i32, scaleto: i32) -> i32 {
        let level = level.clamp(0, MAX_POWER_LEVEL);
        match self {
            PowerCurve::Linear => level * scaleto / MAX_POWER_LEVEL,
            PowerCurve::Square => level * level * scaleto / (MAX_POWER_LEVEL * MAX_POWER_LEVEL),
            PowerCurve::Sqrt => isqrt(level * MAX_POWER_LEVEL) * scaleto / MAX_POWER_LEVEL,
        }
    }
}

/// Integer square root, rounded down. Non-positive inputs yield 0.
pub fn isqrt(value: i32) -> i32 {
    if value <= 0 {
        return 0;
    }
    value.isqrt()
}

/// Power levels of one player, indexed by [`PowerKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerLevels([i32; PowerKind::COUNT]);

impl PowerLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a power, clamped to 0..=50.
    pub fn with(mut self, kind: PowerKind, level: i32) -> Self {
        self.set(kind, level);
        self
    }

    pub fn set(&mut self, kind: PowerKind, level: i32) {
        self.0[kind as usize] = level.clamp(0, MAX_POWER_LEVEL);
    }

    /// Raw level, 0..=50.
    pub fn level(&self, kind: PowerKind) -> i32 {
        self.0[kind as usize]
    }

    /// Level mapped onto `0..=scaleto` through `curve`.
    pub fn scale(&self, kind: PowerKind, scaleto: i32, curve: PowerCurve) -> i32 {
        curve.apply(self.level(kind), scaleto)
    }

    /// Speed bonus for fighting unarmoured, reduced by armour weight
    /// (in tenth-pounds).
    pub fn unarmoured_speed_bonus(&self, armour_weight: i32) -> i32 {
        let bonus = self.scale(PowerKind::UnarmouredAgility, 10, PowerCurve::Square);
        let penalty = (armour_weight / 5 - bonus).max(0);
        (bonus - penalty).max(0)
    }

    /// Armour class bonus for fighting unarmoured. Heavy armour can take
    /// away at most half of it.
    pub fn unarmoured_ac_bonus(&self, armour_weight: i32) -> i32 {
        let allowance = self.scale(PowerKind::UnarmouredAgility, 250, PowerCurve::Linear);
        let penalty = (armour_weight - allowance).max(0);
        let bonus = self.scale(PowerKind::UnarmouredAgility, 50, PowerCurve::Sqrt);
        (bonus / 2).max(bonus - penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_meet_at_the_ends() {
        for curve in [PowerCurve::Linear, PowerCurve::Square, PowerCurve::Sqrt] {
            assert_eq!(curve.apply(0, 100), 0);
            assert_eq!(curve.apply(50, 100), 100);
            assert_eq!(curve.apply(80, 100), 100);
        }
    }

    #[test]
    fn curves_bend_in_opposite_directions() {
        assert_eq!(PowerCurve::Linear.apply(25, 100), 50);
        assert_eq!(PowerCurve::Square.apply(25, 100), 25);
        // isqrt(1250) = 35
        assert_eq!(PowerCurve::Sqrt.apply(25, 100), 70);
    }

    #[test]
    fn isqrt_rounds_down() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(-4), 0);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(2500), 50);
    }

    #[test]
    fn levels_are_clamped() {
        let powers = PowerLevels::new()
            .with(PowerKind::UnarmedStrike, 70)
            .with(PowerKind::Backstab, -3);
        assert_eq!(powers.level(PowerKind::UnarmedStrike), 50);
        assert_eq!(powers.level(PowerKind::Backstab), 0);
        assert_eq!(powers.level(PowerKind::SwordSpecialization), 0);
    }

    #[test]
    fn unarmoured_bonuses_fade_with_armour() {
        let powers = PowerLevels::new().with(PowerKind::UnarmouredAgility, 50);
        assert_eq!(powers.unarmoured_speed_bonus(0), 10);
        assert_eq!(powers.unarmoured_speed_bonus(60), 8);
        assert_eq!(powers.unarmoured_speed_bonus(200), 0);

        assert_eq!(powers.unarmoured_ac_bonus(0), 50);
        assert_eq!(powers.unarmoured_ac_bonus(260), 40);
        assert_eq!(powers.unarmoured_ac_bonus(1000), 25);
    }
}
