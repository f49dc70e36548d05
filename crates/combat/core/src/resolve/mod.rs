//! Hit, critical, and damage resolution.
//!
//! `ATTEMPT -> {MISS, HIT -> {CRITICAL tier}} -> FINAL_DAMAGE`. Everything
//! here is a pure function of its inputs and the random stream, apart from
//! [`resolve_melee_blow`], which applies the blow's effects.

pub mod critical;
pub mod damage;
pub mod hit;
mod melee;
mod result;

pub use critical::{Critical, PercentCritical, critical_melee, critical_shot, percent_critical_shot};
pub use damage::{
    AttackModifier, apply_deadliness, brand_applies, improve_attack_modifier, launcher_multiplier,
    melee_damage, percent_ranged_damage, ranged_damage, slay_applies,
};
pub use hit::{
    ALWAYS_HIT, ALWAYS_MISS, chance_of_melee_hit, chance_of_melee_hit_base, chance_of_missile_hit,
    chance_of_missile_hit_base, hit_chance, test_hit,
};
pub use melee::{BlowOutcome, QUAKE_THRESHOLD, STATUS_POWER_THRESHOLD, resolve_melee_blow};
pub use result::{AttackResult, HitClass};
