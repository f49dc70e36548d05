//! Critical hits.
//!
//! Standard criticals scale the damage of a blow that already connected.
//! Percent-model criticals instead add whole damage dice before they are rolled.

use crate::env::{CombatRng, CriticalParams, PercentCriticalParams};
use crate::resolve::HitClass;
use crate::resolve::hit::chance_of_missile_hit_base;
use crate::state::{Item, Monster, Player, PlayerState, Skill};

/// Damage after the critical test, with the class of hit it produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Critical {
    pub damage: i32,
    pub class: HitClass,
}

fn debuffed_to_h(state: &PlayerState, monster: &Monster, plus: i32, debuff_to_h: i32) -> i32 {
    let to_h = state.to_h + plus;
    if monster.timed.is_debuffed() {
        to_h + debuff_to_h
    } else {
        to_h
    }
}

fn roll_critical(
    rng: &mut (impl CombatRng + ?Sized),
    params: &CriticalParams,
    chance: i32,
    weight: i32,
    dam: i32,
    plain: HitClass,
) -> Critical {
    let plain = Critical {
        damage: dam,
        class: plain,
    };
    if rng.randint1(params.chance_range) > chance || params.levels.is_empty() {
        return plain;
    }

    let power = params.power_weight_scale * weight + rng.randint1(params.power_random);
    match params.levels.lookup(power) {
        Some(level) => Critical {
            damage: level.apply(dam),
            class: level.class,
        },
        None => plain,
    }
}

/// Critical test for a melee blow with a weapon of `weight` and to-hit `plus`.
pub fn critical_melee(
    rng: &mut (impl CombatRng + ?Sized),
    params: &CriticalParams,
    player: &Player,
    monster: &Monster,
    weight: i32,
    plus: i32,
    dam: i32,
) -> Critical {
    let state = &player.state;
    let to_h = debuffed_to_h(state, monster, plus, params.debuff_to_h);
    let chance = params.weight_scale * weight
        + params.to_h_scale * to_h
        + params.level_scale * player.level
        + params.skill_scale * state.skill(Skill::ToHitMelee)
        + params.offset;

    roll_critical(rng, params, chance, weight, dam, HitClass::Hit)
}

/// Critical test for a missile. `launched` selects the bow skill over the
/// throwing skill.
#[allow(clippy::too_many_arguments)]
pub fn critical_shot(
    rng: &mut (impl CombatRng + ?Sized),
    params: &CriticalParams,
    player: &Player,
    monster: &Monster,
    weight: i32,
    plus: i32,
    dam: i32,
    launched: bool,
) -> Critical {
    let state = &player.state;
    let to_h = debuffed_to_h(state, monster, plus, params.debuff_to_h);
    let skill = if launched {
        params.skill_scale * state.skill(Skill::ToHitBow)
    } else {
        params.thrown_skill_scale * state.skill(Skill::ToHitThrow)
    };
    let chance = params.weight_scale * weight
        + params.to_h_scale * to_h
        + params.level_scale * player.level
        + skill
        + params.offset;

    roll_critical(rng, params, chance, weight, dam, HitClass::ShootHit)
}

/// Extra damage dice from a percent-model critical.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PercentCritical {
    pub added_dice: i32,
    pub class: HitClass,
}

/// Percent-model missile critical.
///
/// The chance is `a × power / (b × power + c)`, where power is the missile's
/// base to-hit. Tiers are walked from the lowest; each stops the walk with
/// probability `1 / chance`, and the last tier always does.
pub fn percent_critical_shot(
    rng: &mut (impl CombatRng + ?Sized),
    params: &PercentCriticalParams,
    state: &PlayerState,
    monster: &Monster,
    missile: &Item,
    launcher: Option<&Item>,
) -> PercentCritical {
    let mut power = chance_of_missile_hit_base(state, missile, launcher);
    if monster.timed.is_debuffed() {
        power += params.debuff_to_h;
    }
    power = match launcher {
        Some(_) => power * params.launched_scale_num / params.launched_scale_den.max(1),
        None => power * params.thrown_scale_num / params.thrown_scale_den.max(1),
    };

    let chance_num = power * params.chance_power_num;
    let chance_den = power * params.chance_power_den + params.chance_add_den;

    let levels = params.levels.levels();
    if rng.randint1(chance_den) > chance_num || levels.is_empty() {
        return PercentCritical {
            added_dice: 0,
            class: HitClass::ShootHit,
        };
    }

    let last = levels.len() - 1;
    let level = levels
        .iter()
        .enumerate()
        .find(|(index, level)| *index == last || rng.one_in(level.chance))
        .map(|(_, level)| level)
        .unwrap_or(&levels[last]);

    PercentCritical {
        added_dice: level.added_dice,
        class: level.class,
    }
}
