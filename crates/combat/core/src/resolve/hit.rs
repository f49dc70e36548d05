//! Hit rolls.

use crate::attack::AttackRoll;
use crate::config::CombatConfig;
use crate::env::{CombatRng, RandomChance};
use crate::state::{Item, ItemFlags, Monster, Player, PlayerState, Skill};

/// Percent of attacks that always hit.
pub const ALWAYS_HIT: i32 = 12;
/// Percent of attacks that always miss.
pub const ALWAYS_MISS: i32 = 5;

/// Chance that an attack with `to_hit` connects against armour class `ac`.
///
/// Even odds at `to_hit == ac`, moving five points per three points of
/// difference, bounded to `[ALWAYS_HIT, 100 - ALWAYS_MISS]` percent.
pub fn hit_chance(to_hit: i32, ac: i32) -> RandomChance {
    let scaleto = 100 - ALWAYS_HIT - ALWAYS_MISS;
    let numerator = (scaleto / 2 + (to_hit - ac) * 5 / 3).clamp(0, scaleto) + ALWAYS_HIT;
    RandomChance::new(numerator, 100)
}

pub fn test_hit(rng: &mut (impl CombatRng + ?Sized), to_hit: i32, ac: i32) -> bool {
    rng.check(hit_chance(to_hit, ac))
}

/// Melee to-hit before the target is considered.
pub fn chance_of_melee_hit_base(state: &PlayerState, roll: &AttackRoll) -> i32 {
    state.skill(roll.attack_skill) + roll.to_hit * CombatConfig::BTH_PLUS_ADJ
}

/// Melee to-hit against `monster`; halved when it cannot be seen.
pub fn chance_of_melee_hit(state: &PlayerState, roll: &AttackRoll, monster: &Monster) -> i32 {
    let chance = chance_of_melee_hit_base(state, roll);
    if monster.visible { chance } else { chance / 2 }
}

/// Missile to-hit before the target is considered.
///
/// Only throwing weapons benefit from the player's general to-hit bonus when
/// thrown by hand; any other object gets a larger share of the throwing skill.
pub fn chance_of_missile_hit_base(
    state: &PlayerState,
    missile: &Item,
    launcher: Option<&Item>,
) -> i32 {
    let mut bonus = missile.to_h;
    match launcher {
        Some(bow) => {
            bonus += state.to_h + bow.to_h;
            state.skill(Skill::ToHitBow) + bonus * CombatConfig::BTH_PLUS_ADJ
        }
        None if missile.has(ItemFlags::THROWING) => {
            bonus += state.to_h;
            state.skill(Skill::ToHitThrow) + bonus * CombatConfig::BTH_PLUS_ADJ
        }
        None => 3 * state.skill(Skill::ToHitThrow) / 2 + bonus * CombatConfig::BTH_PLUS_ADJ,
    }
}

/// Missile to-hit against `monster`: minus one per grid of distance, halved
/// when the player is unaware of the target.
pub fn chance_of_missile_hit(
    player: &Player,
    missile: &Item,
    launcher: Option<&Item>,
    monster: &Monster,
) -> i32 {
    let chance = chance_of_missile_hit_base(&player.state, missile, launcher)
        - player.position.distance(monster.position);
    if monster.obvious { chance } else { chance / 2 }
}
