//! A single melee blow, from hit roll to after effects.

use strum::IntoEnumIterator;
use tracing::trace;

use crate::attack::AttackRoll;
use crate::env::{CombatEnv, CombatRng};
use crate::events::{CombatEvents, CombatMessage, Exertion, TimedIncrease};
use crate::resolve::critical::critical_melee;
use crate::resolve::damage::{improve_attack_modifier, melee_damage};
use crate::resolve::hit::{chance_of_melee_hit, test_hit};
use crate::resolve::{AttackResult, HitClass};
use crate::state::{
    ItemFlags, Monster, MonsterTimedKind, Player, PlayerFlags, PlayerTimed, Position,
};

/// Damage above which an impact weapon shakes the dungeon.
pub const QUAKE_THRESHOLD: i32 = 50;

/// Status chances must roll above this to stick.
pub const STATUS_POWER_THRESHOLD: i32 = 25;

/// What one blow did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlowOutcome {
    pub result: AttackResult,
    /// The target died or was moved out of reach; the attack is over.
    pub stop: bool,
}

impl BlowOutcome {
    fn continue_with(result: AttackResult) -> Self {
        Self {
            result,
            stop: false,
        }
    }
}

fn bloodlust_check<R, E>(rng: &mut R, events: &mut E, player: &Player, hit: bool)
where
    R: CombatRng + ?Sized,
    E: CombatEvents + ?Sized,
{
    if !player.timed.contains(PlayerTimed::BLOODLUST) || !rng.one_in(50) {
        return;
    }
    if hit {
        events.message(CombatMessage::BloodlustGiveWay);
        events.over_exert(Exertion::Constitution);
    } else {
        events.message(CombatMessage::BloodlustStrange);
        events.over_exert(Exertion::Scramble);
    }
}

/// Resolves one blow of `roll` against `monster`.
///
/// Touching the target wakes it and breaks any hold on it, whether or not
/// the blow lands. Blows from the wielded weapon can crit; bare hands and
/// monster-form blows cannot.
pub fn resolve_melee_blow<R, E>(
    env: CombatEnv<'_>,
    rng: &mut R,
    events: &mut E,
    player: &mut Player,
    monster: &mut Monster,
    roll: &AttackRoll,
) -> BlowOutcome
where
    R: CombatRng + ?Sized,
    E: CombatEvents + ?Sized,
{
    if player.state.has(PlayerFlags::AFRAID) {
        events.message(CombatMessage::Afraid);
        return BlowOutcome::continue_with(AttackResult::miss(roll.message.clone()));
    }

    monster.timed.set(MonsterTimedKind::Sleep, 0);
    monster.timed.set(MonsterTimedKind::Hold, 0);

    let chance = chance_of_melee_hit(&player.state, roll, monster);
    if !test_hit(rng, chance, monster.ac()) {
        trace!(chance, ac = monster.ac(), "melee miss");
        events.message(CombatMessage::Miss);
        bloodlust_check(rng, events, player, false);
        return BlowOutcome::continue_with(AttackResult::miss(roll.message.clone()));
    }

    let (mut result, quake) = {
        let view: &Player = player;
        let weapon = roll.source.and_then(|handle| view.item(handle));

        let mut verb = match (roll.message.is_empty(), weapon) {
            (false, _) => roll.message.clone(),
            (true, Some(_)) => "hit".to_owned(),
            (true, None) => "punch".to_owned(),
        };

        let modifier = view
            .off_weapon_items()
            .chain(weapon)
            .fold(None, |best, item| {
                improve_attack_modifier(best, item, &monster.race)
            });
        if let Some(modifier) = modifier {
            verb = modifier.verb(false).to_owned();
        }

        let mut dmg = melee_damage(rng, roll, modifier, &monster.race);
        let mut class = HitClass::Hit;
        if let Some(weapon) = weapon {
            let critical = critical_melee(
                rng,
                env.tables.melee_criticals(),
                view,
                monster,
                weapon.weight,
                weapon.to_h,
                dmg,
            );
            dmg = critical.damage;
            class = critical.class;
        }

        let impact = view.state.has(PlayerFlags::IMPACT)
            || weapon.is_some_and(|weapon| weapon.has(ItemFlags::IMPACT));
        (
            AttackResult::hit(dmg, class, verb),
            impact && dmg > QUAKE_THRESHOLD,
        )
    };
    result.floor_damage("fail to harm");

    events.message(CombatMessage::MeleeHit {
        verb: result.verb.clone(),
        class: result.hit_class,
        projection: roll.projection.player_message(),
        damage: result.damage,
    });

    if player.timed.contains(PlayerTimed::ATT_CONF) {
        player.timed.remove(PlayerTimed::ATT_CONF);
        events.message(CombatMessage::ConfusingTouchEnds);
        let amount = 10 + rng.randint0(player.level) / 10;
        events.inc_monster_timed(
            monster,
            MonsterTimedKind::Conf,
            amount,
            TimedIncrease {
                gets_save: false,
                notify: true,
            },
        );
    }

    let drain = monster.hp.min(result.damage).max(0);
    let slain = events.damage_monster(monster, result.damage);
    bloodlust_check(rng, events, player, true);

    if !slain {
        if player.timed.contains(PlayerTimed::ATT_VAMP) && monster.race.is_living() && drain > 0 {
            events.heal_player(drain);
        }
        apply_status_chances(rng, events, monster, roll);
    }

    let displaced = quake && earthquake(events, monster.position);

    trace!(
        damage = result.damage,
        class = %result.hit_class,
        slain,
        "melee hit"
    );

    BlowOutcome {
        result,
        stop: slain || displaced,
    }
}

fn earthquake<E: CombatEvents + ?Sized>(events: &mut E, center: Position) -> bool {
    trace!(%center, "impact earthquake");
    events.earthquake(center)
}

/// Rolls each status the blow can inflict; a roll above the threshold
/// applies that many turns, subject to the monster's saving throw.
fn apply_status_chances<R, E>(rng: &mut R, events: &mut E, monster: &mut Monster, roll: &AttackRoll)
where
    R: CombatRng + ?Sized,
    E: CombatEvents + ?Sized,
{
    for kind in MonsterTimedKind::iter() {
        let weight = roll.status_chance(kind);
        if weight <= 0 {
            continue;
        }
        let power = rng.randint1(weight);
        if power > STATUS_POWER_THRESHOLD {
            events.inc_monster_timed(
                monster,
                kind,
                power,
                TimedIncrease {
                    gets_save: true,
                    notify: false,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::CombatConfig;
    use crate::env::{CombatTables, ScriptedRng};
    use crate::events::{CombatEvent, CombatLog};
    use crate::state::{
        Brand, Element, Item, ItemClass, ItemHandle, MonsterId, MonsterRace, RaceFlags,
        SlotKind,
    };

    fn goblin(hp: i32) -> Monster {
        Monster::new(
            MonsterId(7),
            Arc::new(MonsterRace::new("goblin", 3, 10)),
            hp,
            Position::new(1, 0),
        )
    }

    fn fist() -> AttackRoll {
        AttackRoll {
            dice: crate::state::Dice::new(1, 4),
            message: "punch".into(),
            ..AttackRoll::default()
        }
    }

    #[test]
    fn afraid_players_do_not_roll() {
        let config = CombatConfig::default();
        let tables = CombatTables::default();
        let env = CombatEnv::new(&config, &tables);
        let mut player = Player::new(5);
        player.state.flags |= PlayerFlags::AFRAID;
        let mut monster = goblin(20).with_timed(MonsterTimedKind::Sleep, 10);
        let mut rng = ScriptedRng::new([0]);
        let mut log = CombatLog::new();

        let outcome = resolve_melee_blow(
            env,
            &mut rng,
            &mut log,
            &mut player,
            &mut monster,
            &fist(),
        );

        assert!(!outcome.result.success);
        assert!(!outcome.stop);
        assert_eq!(rng.draws(), 0);
        assert_eq!(log.messages().collect::<Vec<_>>(), [&CombatMessage::Afraid]);
        // still asleep: nothing touched it
        assert!(monster.timed.is_active(MonsterTimedKind::Sleep));
    }

    #[test]
    fn a_miss_still_wakes_the_target() {
        let config = CombatConfig::default();
        let tables = CombatTables::default();
        let env = CombatEnv::new(&config, &tables);
        let mut player = Player::new(5);
        let mut monster = goblin(20)
            .with_timed(MonsterTimedKind::Sleep, 10)
            .with_timed(MonsterTimedKind::Hold, 3);
        // hit chance with no skill vs AC 10: 41 - 16 + 12 = 37; roll 99 misses
        let mut rng = ScriptedRng::new([99]);
        let mut log = CombatLog::new();

        let outcome = resolve_melee_blow(
            env,
            &mut rng,
            &mut log,
            &mut player,
            &mut monster,
            &fist(),
        );

        assert!(!outcome.result.success);
        assert_eq!(outcome.result.hit_class, HitClass::Miss);
        assert!(!monster.timed.is_active(MonsterTimedKind::Sleep));
        assert!(!monster.timed.is_active(MonsterTimedKind::Hold));
        assert_eq!(monster.hp, 20);
    }

    #[test]
    fn bare_hands_hit_without_critical() {
        let config = CombatConfig::default();
        let tables = CombatTables::default();
        let env = CombatEnv::new(&config, &tables);
        let mut player = Player::new(5);
        let mut monster = goblin(20);
        // hit roll 0, then the die rolls 3
        let mut rng = ScriptedRng::new([0, 2]);
        let mut log = CombatLog::new();

        let outcome = resolve_melee_blow(
            env,
            &mut rng,
            &mut log,
            &mut player,
            &mut monster,
            &fist(),
        );

        assert_eq!(outcome.result, AttackResult::hit(3, HitClass::Hit, "punch"));
        assert_eq!(monster.hp, 17);
        assert_eq!(rng.draws(), 2);
        assert_eq!(log.total_damage(), 3);
    }

    #[test]
    fn harmless_blows_fail_to_harm() {
        let config = CombatConfig::default();
        let tables = CombatTables::default();
        let env = CombatEnv::new(&config, &tables);
        let mut player = Player::new(5);
        let mut monster = goblin(20);
        let roll = AttackRoll {
            to_dam: -10,
            ..fist()
        };
        let mut rng = ScriptedRng::new([0]);
        let mut log = CombatLog::new();

        let outcome = resolve_melee_blow(env, &mut rng, &mut log, &mut player, &mut monster, &roll);

        assert!(outcome.result.success);
        assert_eq!(outcome.result.damage, 0);
        assert_eq!(outcome.result.hit_class, HitClass::Miss);
        assert_eq!(outcome.result.verb, "fail to harm");
        assert_eq!(monster.hp, 20);
    }

    #[test]
    fn branded_weapon_uses_brand_verb_and_multiplier() {
        let config = CombatConfig::default();
        let mut tables = CombatTables::default();
        tables.melee.chance_range = 1;
        tables.melee.weight_scale = 0;
        tables.melee.to_h_scale = 0;
        tables.melee.level_scale = 0;
        let env = CombatEnv::new(&config, &tables);

        let mut player = Player::new(5);
        player.equip(
            SlotKind::Weapon,
            Item::new(ItemHandle(3), "Flaming Dagger", ItemClass::Sword)
                .with_dice(1, 4)
                .with_brand(Brand::new(Element::Fire, 3, "burn", "burns")),
        );
        let roll = AttackRoll {
            dice: crate::state::Dice::new(1, 4),
            source: Some(ItemHandle(3)),
            message: "hit".into(),
            ..AttackRoll::default()
        };
        let mut monster = goblin(30);
        // hit, die 2, critical roll (chance 0 < 1) fails
        let mut rng = ScriptedRng::new([0, 1, 0]);
        let mut log = CombatLog::new();

        let outcome = resolve_melee_blow(env, &mut rng, &mut log, &mut player, &mut monster, &roll);

        assert_eq!(outcome.result, AttackResult::hit(6, HitClass::Hit, "burn"));
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn confusing_touch_is_consumed() {
        let config = CombatConfig::default();
        let tables = CombatTables::default();
        let env = CombatEnv::new(&config, &tables);
        let mut player = Player::new(30);
        player.timed |= PlayerTimed::ATT_CONF;
        let mut monster = goblin(50);
        // hit, die, confusion duration roll 25 -> 10 + 2
        let mut rng = ScriptedRng::new([0, 0, 25]);
        let mut log = CombatLog::new();

        resolve_melee_blow(env, &mut rng, &mut log, &mut player, &mut monster, &fist());

        assert!(!player.timed.contains(PlayerTimed::ATT_CONF));
        assert_eq!(monster.timed.get(MonsterTimedKind::Conf), 12);
        assert!(log.events().iter().any(|event| matches!(
            event,
            CombatEvent::Timed {
                kind: MonsterTimedKind::Conf,
                how: TimedIncrease { notify: true, .. },
                ..
            }
        )));
    }

    #[test]
    fn vampiric_blows_heal_by_damage_dealt() {
        let config = CombatConfig::default();
        let tables = CombatTables::default();
        let env = CombatEnv::new(&config, &tables);
        let mut player = Player::new(5);
        player.timed |= PlayerTimed::ATT_VAMP;
        let mut log = CombatLog::new();

        let mut monster = goblin(20);
        resolve_melee_blow(
            env,
            &mut ScriptedRng::new([0, 3]),
            &mut log,
            &mut player,
            &mut monster,
            &fist(),
        );
        assert!(log.events().contains(&CombatEvent::Heal(4)));

        log.clear();
        let undead = MonsterRace::new("zombie", 3, 10).with_flags(RaceFlags::UNDEAD);
        let mut zombie = Monster::new(MonsterId(8), Arc::new(undead), 20, Position::new(1, 0));
        resolve_melee_blow(
            env,
            &mut ScriptedRng::new([0, 3]),
            &mut log,
            &mut player,
            &mut zombie,
            &fist(),
        );
        assert!(!log.events().iter().any(|event| matches!(event, CombatEvent::Heal(_))));
    }

    #[test]
    fn status_chances_need_power_above_threshold() {
        let config = CombatConfig::default();
        let tables = CombatTables::default();
        let env = CombatEnv::new(&config, &tables);
        let mut player = Player::new(5);
        let mut roll = fist();
        roll.add_status_chance(MonsterTimedKind::Stun, 40);
        roll.add_status_chance(MonsterTimedKind::Fear, 40);

        let mut monster = goblin(50);
        // hit, die, stun power 31, fear power 11
        let mut rng = ScriptedRng::new([0, 0, 30, 10]);
        let mut log = CombatLog::new();
        resolve_melee_blow(env, &mut rng, &mut log, &mut player, &mut monster, &roll);

        assert_eq!(monster.timed.get(MonsterTimedKind::Stun), 31);
        assert_eq!(monster.timed.get(MonsterTimedKind::Fear), 0);
    }

    #[test]
    fn heavy_impact_shakes_the_level() {
        let config = CombatConfig::default();
        let tables = CombatTables::default();
        let env = CombatEnv::new(&config, &tables);
        let mut player = Player::new(5);
        player.state.flags |= PlayerFlags::IMPACT;
        let roll = AttackRoll {
            to_dam: 60,
            ..fist()
        };
        let mut monster = goblin(500);
        let mut log = CombatLog::new();

        resolve_melee_blow(
            env,
            &mut ScriptedRng::new([0]),
            &mut log,
            &mut player,
            &mut monster,
            &roll,
        );
        assert!(log.events().contains(&CombatEvent::Earthquake(Position::new(1, 0))));
    }

    #[test]
    fn killing_blow_stops_the_attack() {
        let config = CombatConfig::default();
        let tables = CombatTables::default();
        let env = CombatEnv::new(&config, &tables);
        let mut player = Player::new(5);
        let mut monster = goblin(2);
        let mut log = CombatLog::new();

        let outcome = resolve_melee_blow(
            env,
            &mut ScriptedRng::new([0, 3]),
            &mut log,
            &mut player,
            &mut monster,
            &fist(),
        );
        assert!(outcome.stop);
        assert!(monster.is_dead());
    }
}
