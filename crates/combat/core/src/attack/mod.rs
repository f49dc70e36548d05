//! Attack roll construction: weapons, bare hands, monster-form blows, launchers.
//!
//! Builders never fail: a blow that cannot be made is `None` or missing from
//! the returned table.

mod blows;
mod builder;
mod ranged;
mod roll;

pub use blows::{calc_blows, calc_shots, derive_attacks, is_heavy_launcher};
pub use builder::{
    backstab_mod_attack, backstab_power, build_monster_attack, build_weapon_attack,
    get_monster_attacks,
};
pub use ranged::{MAX_THROW_RANGE, RangedProfile, build_ranged_attack, fire_range, throw_range};
pub use roll::{AttackRoll, Blows};
