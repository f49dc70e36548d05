//! Stat index scaling.
//!
//! Stat indices run from 0 upwards with 7 as the neutral (average) value and
//! 14 as the point where a table reaches its nominal maximum. Every derived
//! bonus is an integer function of the index; truncation toward zero is part
//! of the rules and must be preserved.

/// Lowest meaningful stat index.
pub const LOW_STAT_INDEX: i32 = 0;
/// Neutral stat index: every scaled bonus is zero here.
pub const AVERAGE_STAT_INDEX: i32 = 7;
/// Index at which a scaled bonus reaches `scaleto`.
pub const HIGH_STAT_INDEX: i32 = 14;

/// Scales `scaleto` by a stat index.
///
/// Below the neutral index the result falls linearly and goes negative; above
/// it grows quadratically, reaching `scaleto` at index 14 and continuing past
/// it. With `min_zero` the whole curve is shifted up so that index 0 is
/// roughly zero instead of negative.
pub fn stat_scale(index: i32, scaleto: i32, min_zero: bool) -> i32 {
    let index = index.max(LOW_STAT_INDEX);
    let shift = if min_zero {
        ((AVERAGE_STAT_INDEX - LOW_STAT_INDEX) * scaleto + 49) / 50
    } else {
        0
    };

    let delta = index - AVERAGE_STAT_INDEX;
    let span = HIGH_STAT_INDEX - AVERAGE_STAT_INDEX;
    if delta >= 0 {
        scaleto * (delta * delta) / (span * span) + shift
    } else {
        (delta * scaleto - 24) / 25 + shift
    }
}

/// Damage bonus from strength.
pub fn adj_str_td(index: i32) -> i32 {
    (index - AVERAGE_STAT_INDEX) * 15 / 8
}

/// To-hit bonus from dexterity.
pub fn adj_dex_th(index: i32) -> i32 {
    (index - AVERAGE_STAT_INDEX) * 35 / 8
}

/// Armour class bonus from dexterity.
pub fn adj_dex_ta(index: i32) -> i32 {
    stat_scale(index, 15, false)
}

pub fn adj_dex_dis(index: i32) -> i32 {
    stat_scale(index, 20, false)
}

pub fn adj_int_dis(index: i32) -> i32 {
    stat_scale(index, 20, false)
}

pub fn adj_int_dev(index: i32) -> i32 {
    stat_scale(index, 15, false)
}

pub fn adj_wis_sav(index: i32) -> i32 {
    stat_scale(index, 50, false)
}

pub fn adj_str_dig(index: i32) -> i32 {
    stat_scale(index, 100, false)
}

/// Carrying capacity factor, never below 25.
pub fn adj_str_wgt(index: i32) -> i32 {
    (stat_scale(index, 250, false) + 100).max(25)
}

/// Heaviest weapon (in tenth-pounds) that can be wielded without penalty.
pub fn adj_str_hold(index: i32) -> i32 {
    stat_scale(index, 200, true) + 50
}

/// Strength contribution to throwing range.
pub fn adj_str_blow(index: i32) -> i32 {
    stat_scale(index, 240, true)
}

/// Blow-count contribution of the combined damage/accuracy stat.
pub fn adj_stat_blow(index: i32) -> i32 {
    (index + 1) * 600 / 16
}

/// Chance to avoid theft.
pub fn adj_dex_safe(index: i32) -> i32 {
    stat_scale(index, 80, true)
}

/// Hit point regeneration from constitution.
pub fn adj_con_fix(index: i32) -> i32 {
    stat_scale(index, 10, true)
}

/// Hit points per level from constitution, in hundredths.
pub fn adj_con_mhp(index: i32) -> i32 {
    stat_scale(index, 250, false)
}

/// Spells learned per level from the casting stat, in halves.
pub fn adj_mag_study(index: i32) -> i32 {
    (index + 5) * 10 / 20
}

/// Mana per level from the casting stat, in hundredths.
pub fn adj_mag_mana(index: i32) -> i32 {
    (index + 5) * 500 / 20
}

/// Weight (tenth-pounds) at which strength stops compensating.
pub fn weight_limit(str_index: i32) -> i32 {
    adj_str_wgt(str_index) * 10
}

/// Weight left before the player becomes burdened; negative when over.
pub fn weight_remaining(str_index: i32, total_weight: i32) -> i32 {
    6 * adj_str_wgt(str_index) - total_weight - 1
}
