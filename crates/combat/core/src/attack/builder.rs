//! Attack roll construction.
//!
//! A roll starts from printed values (weapon dice, unarmed base, or a monster
//! race's blow table) and then accumulates the player's bonuses in a fixed
//! order. Most bonuses are added to the dice *sides* rather than to a flat
//! damage bonus, so the order and the `(x + 49) / 50` rounding of every
//! level-scaled term matter.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::attack::{AttackRoll, Blows};
use crate::config::CombatConfig;
use crate::state::{
    Dice, Element, Item, ItemClass, Monster, MonsterRace, MonsterTimedKind, Player, PlayerTimed,
    Skill, Stat,
};
use crate::stats::{PowerKind, adj_dex_th, adj_str_td};

/// `lev × factor / 50`, rounded to nearest.
fn level_bonus(lev: i32, factor: i32) -> i32 {
    (lev * factor + 49) / 50
}

fn unarmed_base(roll: &mut AttackRoll, lev: i32) {
    roll.dice = Dice::new(
        if lev < 15 {
            1
        } else if lev < 30 {
            2
        } else {
            3
        },
        1 + level_bonus(lev, 9),
    );
    roll.status_chances[MonsterTimedKind::Stun as usize] = level_bonus(lev, 25);
    roll.accuracy_stat = Stat::Dex;
    roll.damage_stat = Stat::Str;
    roll.message = "punch".into();
    roll.source = None;
    roll.projection = Element::Bludgeoning;
}

/// Martial-arts bonuses; nothing at unarmed level 0.
fn unarmed_mod(roll: &mut AttackRoll, lev: i32) {
    if lev == 0 {
        return;
    }
    roll.dice.sides += level_bonus(lev, 10);
    roll.to_hit += level_bonus(lev, 25);
    roll.to_dam += level_bonus(lev, 5);
    roll.add_status_chance(MonsterTimedKind::Stun, level_bonus(lev, 50));
}

fn specialization_power(class: ItemClass) -> Option<PowerKind> {
    match class {
        ItemClass::Hafted => Some(PowerKind::HaftedSpecialization),
        ItemClass::Polearm => Some(PowerKind::PolearmSpecialization),
        ItemClass::Sword => Some(PowerKind::SwordSpecialization),
        _ => None,
    }
}

fn specialization_mod(roll: &mut AttackRoll, player: &Player, weapon: &Item) {
    let lev = specialization_power(weapon.class)
        .map(|kind| player.powers.level(kind))
        .unwrap_or(0);
    roll.to_hit += level_bonus(lev, 15);
    roll.to_dam += level_bonus(lev, 10);
    roll.dice.sides += level_bonus(lev, 10);
}

/// Builds the melee roll for a weapon, or for bare hands when `weapon` is `None`.
///
/// Half of the weapon's damage bonus is folded into the dice sides. Blows are
/// left at one; [`crate::attack::derive_attacks`] assigns the real count.
pub fn build_weapon_attack(player: &Player, weapon: Option<&Item>) -> AttackRoll {
    let state = &player.state;
    let mut roll = AttackRoll::default();

    match weapon {
        Some(item) => {
            let td = item.to_d;
            roll.dice = Dice::new(item.dice.count, item.dice.sides + td / 2);
            roll.to_dam = (td + 1) / 2;
            roll.to_hit = item.to_h;
            roll.message = "hit".into();
            roll.accuracy_stat = Stat::Dex;
            roll.damage_stat = Stat::Str;
            roll.source = Some(item.handle);
            roll.projection = item.projection;
        }
        None => {
            let lev = player.powers.level(PowerKind::UnarmedStrike);
            unarmed_base(&mut roll, lev);
            unarmed_mod(&mut roll, lev);
        }
    }

    roll.attack_skill = Skill::ToHitMelee;
    roll.to_hit += state.to_h;
    roll.dice.sides += state.to_d;
    roll.dice.count = roll.dice.count * (state.skill(roll.attack_skill) + 33) / 33;

    roll.to_hit += adj_dex_th(state.stat(roll.accuracy_stat));
    roll.dice.sides += adj_str_td(state.stat(roll.damage_stat));

    if let Some(item) = weapon {
        specialization_mod(&mut roll, player, item);
    }

    roll.clamp_dice(1);
    roll
}

/// Whether a shapechanged player can use a race's blow.
///
/// Gazes and spits (search-skill blows) need sight; every blow needs a free
/// body slot of its kind when the body has any slot of that kind.
fn monster_blow_is_usable(player: &Player, race: &MonsterRace, index: usize) -> bool {
    let Some(method) = race.blows.get(index).and_then(|blow| blow.method.as_ref()) else {
        return false;
    };

    if method.skill == Skill::Search && player.timed.contains(PlayerTimed::BLIND) {
        return false;
    }

    let mut found_empty = false;
    let mut found_full = false;
    for slot in player.slots_of(method.equip_slot) {
        if slot.item.is_some() {
            found_full = true;
        } else {
            found_empty = true;
        }
    }
    !(found_full && !found_empty)
}

/// Search-skill blows hit with the weaker of INT and WIS.
fn monster_blow_damage_stat(player: &Player, skill: Skill) -> Stat {
    if skill != Skill::Search {
        return Stat::Str;
    }
    let state = &player.state;
    if state.stat(Stat::Int) > state.stat(Stat::Wis) {
        Stat::Wis
    } else {
        Stat::Int
    }
}

/// Builds the roll for one entry of a race's blow table, as used by a player
/// in that monster's form. `None` if the slot is empty or unusable.
pub fn build_monster_attack(
    player: &Player,
    race: &MonsterRace,
    index: usize,
) -> Option<AttackRoll> {
    let blow = race.blows.get(index)?;
    let method = blow.method.as_ref()?;
    if !monster_blow_is_usable(player, race, index) {
        debug!(
            race = %race.name,
            blow = index,
            method = %method.name,
            "monster blow unusable in current body"
        );
        return None;
    }

    let state = &player.state;
    let min_sides = if blow.dice.sides != 0 { 1 } else { 0 };

    let mut roll = AttackRoll {
        dice: Dice::new(blow.dice.count, (blow.dice.sides + 1) / 2),
        blows: Blows::ONE,
        message: method.message.clone(),
        projection: blow.effect.projection.unwrap_or(method.projection),
        attack_skill: method.skill,
        source: None,
        accuracy_stat: Stat::Dex,
        damage_stat: monster_blow_damage_stat(player, method.skill),
        ..AttackRoll::default()
    };
    if let Some(kind) = blow.effect.timed {
        roll.status_chances[kind as usize] = 50 + race.level;
    }

    roll.to_hit += state.to_h;
    roll.dice.sides += state.to_d;
    roll.to_hit += adj_dex_th(state.stat(roll.accuracy_stat));
    roll.dice.sides += adj_str_td(state.stat(roll.damage_stat));

    roll.clamp_dice(min_sides);

    if roll.attack_skill == Skill::ToHitMelee {
        unarmed_mod(&mut roll, player.powers.level(PowerKind::UnarmedStrike));
    }

    Some(roll)
}

/// Builds up to `max` rolls from a race's blow table, scanning in order and
/// stopping at the first empty slot.
pub fn get_monster_attacks(
    player: &Player,
    race: &MonsterRace,
    max: usize,
) -> ArrayVec<AttackRoll, { CombatConfig::MAX_ATTACKS }> {
    let max = max.min(CombatConfig::MAX_ATTACKS);
    let mut rolls = ArrayVec::new();

    for (index, blow) in race.blows.iter().enumerate() {
        if rolls.len() >= max || blow.method.is_none() {
            break;
        }
        if let Some(roll) = build_monster_attack(player, race, index) {
            rolls.push(roll);
        }
    }
    rolls
}

/// Backstab power against a monster: 2 if asleep or held, 1 if slowed,
/// afraid, or stunned, otherwise 0.
pub fn backstab_power(monster: &Monster) -> i32 {
    let timed = &monster.timed;
    if timed.is_active(MonsterTimedKind::Sleep) || timed.is_active(MonsterTimedKind::Hold) {
        2
    } else if timed.is_active(MonsterTimedKind::Slow)
        || timed.is_active(MonsterTimedKind::Fear)
        || timed.is_active(MonsterTimedKind::Stun)
    {
        1
    } else {
        0
    }
}

/// Scales a melee roll for a backstab. Returns whether anything changed.
///
/// `level` is the player's backstab power level.
pub fn backstab_mod_attack(roll: &mut AttackRoll, power: i32, level: i32) -> bool {
    if power == 0 || roll.attack_skill != Skill::ToHitMelee {
        return false;
    }

    let dsm = level + 25 * power;
    if dsm <= 25 {
        return false;
    }

    roll.dice.sides = (roll.dice.sides * dsm + 24) / 25;
    roll.to_hit += level_bonus(level, 10);
    roll.to_dam += level_bonus(level, 10);
    true
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::state::{
        BlowEffect, BlowMethod, ItemHandle, MonsterBlow, MonsterId, Position, SlotKind,
    };
    use crate::stats::PowerLevels;

    fn bite() -> BlowMethod {
        BlowMethod {
            name: "bite".into(),
            skill: Skill::ToHitMelee,
            equip_slot: SlotKind::Hat,
            projection: Element::Piercing,
            message: "bite".into(),
        }
    }

    fn gaze() -> BlowMethod {
        BlowMethod {
            name: "gaze".into(),
            skill: Skill::Search,
            equip_slot: SlotKind::Amulet,
            projection: Element::Bludgeoning,
            message: "gaze at".into(),
        }
    }

    fn blow(method: Option<BlowMethod>, count: i32, sides: i32) -> MonsterBlow {
        MonsterBlow {
            method,
            effect: BlowEffect::hurt(),
            dice: Dice::new(count, sides),
        }
    }

    #[test]
    fn neutral_unarmed_attack_is_one_d_one() {
        let player = Player::new(1);
        let roll = build_weapon_attack(&player, None);
        assert_eq!(roll.dice, Dice::new(1, 1));
        assert_eq!(roll.to_hit, 0);
        assert_eq!(roll.to_dam, 0);
        assert_eq!(roll.message, "punch");
        assert_eq!(roll.status_chance(MonsterTimedKind::Stun), 0);
    }

    #[test]
    fn unarmed_strike_power_scales_the_fist() {
        let mut player = Player::new(30);
        player.powers = PowerLevels::new().with(PowerKind::UnarmedStrike, 30);
        let roll = build_weapon_attack(&player, None);

        // base: 3 dice (lev >= 30), sides 1 + (270 + 49) / 50 = 7, then +6
        assert_eq!(roll.dice, Dice::new(3, 13));
        assert_eq!(roll.to_hit, 15);
        assert_eq!(roll.to_dam, 3);
        // (750 + 49) / 50 + (1500 + 49) / 50
        assert_eq!(roll.status_chance(MonsterTimedKind::Stun), 15 + 30);
    }

    #[test]
    fn weapon_attack_folds_damage_into_sides() {
        let mut player = Player::new(10);
        player.state.to_h = 2;
        player.state.to_d = 1;
        player.state = player.state.with_skill(Skill::ToHitMelee, 33);
        let sword = Item::new(ItemHandle(4), "Long Sword", ItemClass::Sword)
            .with_dice(2, 5)
            .with_bonuses(3, 5);

        let roll = build_weapon_attack(&player, Some(&sword));
        // sides 5 + 5/2 + state.to_d; dice doubled by skill 33
        assert_eq!(roll.dice, Dice::new(4, 8));
        assert_eq!(roll.to_dam, 3);
        assert_eq!(roll.to_hit, 5);
        assert_eq!(roll.source, Some(ItemHandle(4)));
        assert_eq!(roll.projection, Element::Slashing);
    }

    #[test]
    fn specialization_only_applies_to_matching_class() {
        let mut player = Player::new(20);
        player.powers = PowerLevels::new().with(PowerKind::HaftedSpecialization, 50);
        let mace = Item::new(ItemHandle(1), "Mace", ItemClass::Hafted).with_dice(2, 4);
        let sword = Item::new(ItemHandle(2), "Dagger", ItemClass::Sword).with_dice(1, 4);

        let mace_roll = build_weapon_attack(&player, Some(&mace));
        let sword_roll = build_weapon_attack(&player, Some(&sword));

        assert_eq!(mace_roll.to_hit, 15);
        assert_eq!(mace_roll.to_dam, 10);
        assert_eq!(mace_roll.dice.sides, 14);
        assert_eq!(sword_roll.to_hit, 0);
        assert_eq!(sword_roll.dice.sides, 4);
    }

    #[test]
    fn dice_never_drop_below_one() {
        let mut player = Player::new(1);
        player.state.to_d = -20;
        player.state.to_h = -20;
        player.state = player.state.with_stat(Stat::Str, 0);
        let club = Item::new(ItemHandle(1), "Club", ItemClass::Hafted)
            .with_dice(0, 1)
            .with_bonuses(0, -9);
        let roll = build_weapon_attack(&player, Some(&club));
        assert_eq!(roll.dice, Dice::new(1, 1));
    }

    #[test]
    fn empty_first_method_yields_no_rolls() {
        let player = Player::new(10);
        let race = MonsterRace::new("mimic", 10, 20)
            .with_blow(blow(None, 0, 0))
            .with_blow(blow(Some(bite()), 1, 8));
        assert!(get_monster_attacks(&player, &race, 4).is_empty());
    }

    #[test]
    fn monster_blow_halves_printed_sides() {
        let player = Player::new(10);
        let race = Arc::new(MonsterRace::new("wolf", 12, 30).with_blow(MonsterBlow {
            method: Some(bite()),
            effect: BlowEffect {
                name: "terrify".into(),
                projection: None,
                timed: Some(MonsterTimedKind::Fear),
            },
            dice: Dice::new(1, 9),
        }));

        let roll = build_monster_attack(&player, &race, 0).unwrap();
        assert_eq!(roll.dice, Dice::new(1, 5));
        assert_eq!(roll.blows, Blows::ONE);
        assert_eq!(roll.message, "bite");
        assert_eq!(roll.projection, Element::Piercing);
        assert_eq!(roll.status_chance(MonsterTimedKind::Fear), 62);
        assert_eq!(roll.damage_stat, Stat::Str);
    }

    #[test]
    fn zero_sided_blow_keeps_zero_sides() {
        let player = Player::new(10);
        let race = MonsterRace::new("floating eye", 1, 6).with_blow(blow(Some(gaze()), 1, 0));
        let roll = build_monster_attack(&player, &race, 0).unwrap();
        assert_eq!(roll.dice, Dice::new(1, 0));
    }

    #[test]
    fn blocked_slot_and_blindness_disable_blows() {
        let mut player = Player::new(10);
        player.equip(SlotKind::Hat, Item::new(ItemHandle(9), "Cap", ItemClass::Other));
        let race = MonsterRace::new("wolf", 12, 30).with_blow(blow(Some(bite()), 1, 6));
        assert!(build_monster_attack(&player, &race, 0).is_none());

        let mut blind = Player::new(10);
        blind.timed |= PlayerTimed::BLIND;
        let eye = MonsterRace::new("floating eye", 1, 6).with_blow(blow(Some(gaze()), 1, 2));
        assert!(build_monster_attack(&blind, &eye, 0).is_none());
        assert!(build_monster_attack(&Player::new(10), &eye, 0).is_some());
    }

    #[test]
    fn search_blows_use_weaker_mental_stat() {
        let mut player = Player::new(10);
        player.state = player
            .state
            .with_stat(Stat::Int, 12)
            .with_stat(Stat::Wis, 9);
        assert_eq!(monster_blow_damage_stat(&player, Skill::Search), Stat::Wis);

        player.state = player.state.with_stat(Stat::Wis, 12);
        assert_eq!(monster_blow_damage_stat(&player, Skill::Search), Stat::Int);
    }

    #[test]
    fn monster_attacks_respect_max() {
        let player = Player::new(10);
        let race = MonsterRace::new("hydra", 20, 40)
            .with_blow(blow(Some(bite()), 1, 6))
            .with_blow(blow(Some(bite()), 1, 6))
            .with_blow(blow(Some(bite()), 1, 6));
        assert_eq!(get_monster_attacks(&player, &race, 2).len(), 2);
        assert_eq!(get_monster_attacks(&player, &race, 10).len(), 3);
    }

    #[test]
    fn backstab_power_reads_target_state() {
        let race = Arc::new(MonsterRace::new("orc", 5, 20));
        let monster = Monster::new(MonsterId(1), race, 30, Position::ORIGIN);
        assert_eq!(backstab_power(&monster), 0);
        assert_eq!(
            backstab_power(&monster.clone().with_timed(MonsterTimedKind::Sleep, 5)),
            2
        );
        assert_eq!(
            backstab_power(&monster.with_timed(MonsterTimedKind::Stun, 5)),
            1
        );
    }

    #[test]
    fn backstab_needs_more_than_base_multiplier() {
        let mut roll = AttackRoll {
            dice: Dice::new(2, 10),
            ..AttackRoll::default()
        };
        assert!(!backstab_mod_attack(&mut roll, 1, 0));
        assert!(!backstab_mod_attack(&mut roll, 0, 50));

        assert!(backstab_mod_attack(&mut roll, 2, 20));
        // (10 * 70 + 24) / 25 = 28
        assert_eq!(roll.dice.sides, 28);
        assert_eq!(roll.to_hit, 4);
        assert_eq!(roll.to_dam, 4);

        let mut ranged = AttackRoll {
            attack_skill: Skill::ToHitBow,
            ..AttackRoll::default()
        };
        assert!(!backstab_mod_attack(&mut ranged, 2, 50));
    }
}
