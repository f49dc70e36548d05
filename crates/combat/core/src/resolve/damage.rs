//! Damage formulas and brand/slay selection.

use crate::attack::AttackRoll;
use crate::env::{CombatRng, DeadlinessTable, PercentCriticalParams};
use crate::resolve::HitClass;
use crate::resolve::critical::{Critical, percent_critical_shot};
use crate::state::{Brand, Item, ItemFlags, Monster, MonsterRace, PlayerState, RaceFlags, Slay};

/// The single brand or slay applied to an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackModifier<'a> {
    Brand(&'a Brand),
    Slay(&'a Slay),
}

impl<'a> AttackModifier<'a> {
    fn vulnerable(self, race: &MonsterRace) -> bool {
        match self {
            AttackModifier::Brand(brand) => RaceFlags::vulnerability_to(brand.element)
                .is_some_and(|flag| race.flags.contains(flag)),
            AttackModifier::Slay(_) => false,
        }
    }

    /// Damage multiplier against `race`. Vulnerability doubles a brand.
    pub fn multiplier(self, race: &MonsterRace) -> i32 {
        let base = match self {
            AttackModifier::Brand(brand) => brand.multiplier,
            AttackModifier::Slay(slay) => slay.multiplier,
        };
        if self.vulnerable(race) { base * 2 } else { base }
    }

    /// Multiplier for the percent damage model, in tenths.
    pub fn percent_multiplier(self, race: &MonsterRace) -> i32 {
        let base = match self {
            AttackModifier::Brand(brand) => brand.percent_multiplier,
            AttackModifier::Slay(slay) => slay.percent_multiplier,
        };
        if self.vulnerable(race) { base * 2 } else { base }
    }

    pub fn verb(self, ranged: bool) -> &'a str {
        match (self, ranged) {
            (AttackModifier::Brand(brand), false) => &brand.melee_verb,
            (AttackModifier::Brand(brand), true) => &brand.ranged_verb,
            (AttackModifier::Slay(slay), false) => &slay.melee_verb,
            (AttackModifier::Slay(slay), true) => &slay.ranged_verb,
        }
    }

    fn beats(self, other: AttackModifier<'_>, race: &MonsterRace) -> bool {
        let mine = self.multiplier(race);
        let theirs = other.multiplier(race);
        mine > theirs
            || (mine == theirs
                && matches!(self, AttackModifier::Slay(_))
                && matches!(other, AttackModifier::Brand(_)))
    }
}

/// A brand does nothing to a race immune to its element.
pub fn brand_applies(brand: &Brand, race: &MonsterRace) -> bool {
    RaceFlags::immunity_to(brand.element).is_none_or(|flag| !race.flags.contains(flag))
}

pub fn slay_applies(slay: &Slay, race: &MonsterRace) -> bool {
    race.flags.intersects(slay.race)
}

/// Folds `item`'s brands and slays into the best modifier found so far.
///
/// The highest multiplier wins; a slay beats a brand of equal strength.
pub fn improve_attack_modifier<'a>(
    best: Option<AttackModifier<'a>>,
    item: &'a Item,
    race: &MonsterRace,
) -> Option<AttackModifier<'a>> {
    let brands = item
        .brands
        .iter()
        .filter(|brand| brand_applies(brand, race))
        .map(AttackModifier::Brand);
    let slays = item
        .slays
        .iter()
        .filter(|slay| slay_applies(slay, race))
        .map(AttackModifier::Slay);

    brands.chain(slays).fold(best, |best, candidate| match best {
        Some(current) if !candidate.beats(current, race) => Some(current),
        _ => Some(candidate),
    })
}

/// Launcher multiplier for a shot: the player's derived might, falling back
/// to the launcher's own. Thrown objects have a multiplier of one.
pub fn launcher_multiplier(state: &PlayerState, launcher: Option<&Item>) -> i32 {
    match launcher {
        Some(_) if state.ammo_mult > 0 => state.ammo_mult,
        Some(bow) => bow.pval,
        None => 1,
    }
}

/// Melee damage before criticals: `(dice + to_dam) × modifier`.
pub fn melee_damage(
    rng: &mut (impl CombatRng + ?Sized),
    roll: &AttackRoll,
    modifier: Option<AttackModifier<'_>>,
    race: &MonsterRace,
) -> i32 {
    let dmg = roll.dice.roll(rng) + roll.to_dam;
    modifier.map_or(dmg, |modifier| dmg * modifier.multiplier(race))
}

/// Standard missile damage before criticals.
///
/// The brand or slay multiplier adds to the launcher multiplier rather than
/// stacking with it. Throwing weapons thrown by hand multiply by
/// `2 + weight / 12` instead of taking a launcher's to-dam.
pub fn ranged_damage(
    rng: &mut (impl CombatRng + ?Sized),
    state: &PlayerState,
    race: &MonsterRace,
    missile: &Item,
    launcher: Option<&Item>,
    modifier: Option<AttackModifier<'_>>,
) -> i32 {
    let mult = launcher_multiplier(state, launcher)
        + modifier.map_or(0, |modifier| modifier.multiplier(race));

    let mut dmg = missile.dice.roll(rng) + missile.to_d;
    match launcher {
        Some(bow) => dmg += bow.to_d,
        None if missile.has(ItemFlags::THROWING) => dmg *= 2 + missile.weight / 12,
        None => {}
    }
    dmg * mult
}

/// Scales a die average by the deadliness percentage of `deadliness`
/// plusses. The result carries an extra factor of 100.
///
/// Negative deadliness reduces the average, to zero once the table reaches
/// 100%.
pub fn apply_deadliness(table: &DeadlinessTable, die_average: i32, deadliness: i32) -> i32 {
    let deadliness = deadliness.clamp(-DeadlinessTable::MAX_PLUS, DeadlinessTable::MAX_PLUS);
    let percent = table.percent(deadliness);
    if deadliness >= 0 {
        die_average * (100 + percent)
    } else if percent >= 100 {
        0
    } else {
        die_average * (100 - percent)
    }
}

/// Percent-model missile damage, criticals included.
///
/// Launcher multiplier, brand or slay, and deadliness all inflate the
/// average of one die; the inflated average is turned back into a number of
/// sides, rounding up at random. Criticals add dice.
#[allow(clippy::too_many_arguments)]
pub fn percent_ranged_damage(
    rng: &mut (impl CombatRng + ?Sized),
    params: &PercentCriticalParams,
    deadliness_table: &DeadlinessTable,
    state: &PlayerState,
    monster: &Monster,
    missile: &Item,
    launcher: Option<&Item>,
    modifier: Option<AttackModifier<'_>>,
) -> Critical {
    let race = &monster.race;
    let mut dice = missile.dice.count;

    // x10
    let mut die_average = 10 * (missile.dice.sides + 1) / 2;
    die_average *= launcher_multiplier(state, launcher);

    // x100
    let mut add = 0;
    match modifier {
        Some(modifier) => {
            let mult = modifier.percent_multiplier(race);
            die_average *= mult;
            add = mult - 10;
        }
        None => die_average *= 10,
    }

    let mut deadliness = missile.to_d;
    match launcher {
        Some(bow) => deadliness += bow.to_d + state.to_d,
        None if missile.has(ItemFlags::THROWING) => deadliness += state.to_d,
        None => {}
    }
    // x10000
    let die_average = apply_deadliness(deadliness_table, die_average, deadliness.min(150));

    let sides = 2 * die_average - 10_000;
    let extra = rng.randint0(10_000) < sides % 10_000;
    let sides = sides / 10_000 + i32::from(extra);

    let mut class = HitClass::ShootHit;
    if launcher.is_some() || missile.has(ItemFlags::THROWING) {
        let critical = percent_critical_shot(rng, params, state, monster, missile, launcher);
        dice += critical.added_dice;
        class = critical.class;
        if launcher.is_none() {
            dice *= 2 + missile.weight / 12;
        }
    }

    Critical {
        damage: rng.damroll(dice, sides) + add,
        class,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::env::ScriptedRng;
    use crate::state::{Dice, Element, ItemClass, ItemHandle, MonsterId, Position};

    fn fire_brand(multiplier: i32) -> Brand {
        Brand::new(Element::Fire, multiplier, "burn", "burns")
    }

    fn orc_slay() -> Slay {
        Slay::new(RaceFlags::ORC, 3, "smite", "smites")
    }

    fn orc() -> MonsterRace {
        MonsterRace::new("snaga", 3, 32).with_flags(RaceFlags::ORC | RaceFlags::EVIL)
    }

    #[test]
    fn immune_races_ignore_brands() {
        let item = Item::new(ItemHandle(1), "Flaming Sword", ItemClass::Sword)
            .with_brand(fire_brand(3));
        let salamander = MonsterRace::new("salamander", 5, 20).with_flags(RaceFlags::IM_FIRE);

        assert!(improve_attack_modifier(None, &item, &salamander).is_none());
        assert!(improve_attack_modifier(None, &item, &orc()).is_some());
    }

    #[test]
    fn slay_beats_equal_brand() {
        let item = Item::new(ItemHandle(1), "Sword", ItemClass::Sword)
            .with_brand(fire_brand(3))
            .with_slay(orc_slay());

        let best = improve_attack_modifier(None, &item, &orc());
        assert!(matches!(best, Some(AttackModifier::Slay(_))));
        assert_eq!(best.map(|m| m.verb(false)), Some("smite"));
    }

    #[test]
    fn vulnerability_doubles_brands() {
        let item = Item::new(ItemHandle(1), "Sword", ItemClass::Sword)
            .with_brand(fire_brand(2))
            .with_slay(orc_slay());
        let frost_orc = orc().with_flags(RaceFlags::HURT_FIRE);

        let best = improve_attack_modifier(None, &item, &frost_orc);
        assert!(matches!(best, Some(AttackModifier::Brand(_))));
        assert_eq!(best.map(|m| m.multiplier(&frost_orc)), Some(4));
        assert_eq!(best.map(|m| m.verb(true)), Some("burns"));
    }

    #[test]
    fn earlier_best_survives_weaker_candidates() {
        let ring = Item::new(ItemHandle(1), "Ring of Flames", ItemClass::Other)
            .with_brand(fire_brand(3));
        let weapon = Item::new(ItemHandle(2), "Sword", ItemClass::Sword)
            .with_brand(Brand::new(Element::Cold, 2, "freeze", "freezes"));

        let best = improve_attack_modifier(None, &ring, &orc());
        let best = improve_attack_modifier(best, &weapon, &orc());
        assert_eq!(best.map(|m| m.verb(false)), Some("burn"));
    }

    #[test]
    fn melee_damage_multiplies_after_to_dam() {
        let roll = AttackRoll {
            dice: Dice::new(2, 6),
            to_dam: 3,
            ..AttackRoll::default()
        };
        let slay = orc_slay();
        // each die rolls 4
        let mut rng = ScriptedRng::new([3]);
        assert_eq!(melee_damage(&mut rng, &roll, None, &orc()), 11);
        let mut rng = ScriptedRng::new([3]);
        assert_eq!(
            melee_damage(&mut rng, &roll, Some(AttackModifier::Slay(&slay)), &orc()),
            33
        );
    }

    #[test]
    fn ranged_damage_adds_modifier_to_launcher() {
        let mut state = PlayerState::default();
        state.ammo_mult = 3;
        let arrow = Item::new(ItemHandle(1), "Arrow", ItemClass::Arrow)
            .with_dice(1, 9)
            .with_bonuses(0, 2);
        let bow = Item::new(ItemHandle(2), "Long Bow", ItemClass::Bow)
            .as_launcher(crate::state::AmmoKind::Arrow, 3)
            .with_bonuses(0, 1);
        let slay = orc_slay();

        // die rolls 5: (5 + 2 + 1) * (3 + 3)
        let mut rng = ScriptedRng::new([4]);
        let dmg = ranged_damage(
            &mut rng,
            &state,
            &orc(),
            &arrow,
            Some(&bow),
            Some(AttackModifier::Slay(&slay)),
        );
        assert_eq!(dmg, 48);
    }

    #[test]
    fn throwing_weapons_scale_with_weight() {
        let state = PlayerState::default();
        let spear = Item::new(ItemHandle(1), "Spear", ItemClass::Polearm)
            .with_dice(1, 6)
            .with_weight(50)
            .with_flags(ItemFlags::THROWING);
        let rock = Item::new(ItemHandle(2), "Rock", ItemClass::Other)
            .with_dice(1, 6)
            .with_weight(50);

        // die rolls 3; spear: 3 * (2 + 4)
        let mut rng = ScriptedRng::new([2]);
        assert_eq!(ranged_damage(&mut rng, &state, &orc(), &spear, None, None), 18);
        let mut rng = ScriptedRng::new([2]);
        assert_eq!(ranged_damage(&mut rng, &state, &orc(), &rock, None, None), 3);
    }

    #[test]
    fn deadliness_scales_and_floors() {
        let table = DeadlinessTable::default();
        assert_eq!(apply_deadliness(&table, 35, 0), 3500);
        assert_eq!(apply_deadliness(&table, 35, 10), 35 * 139);
        assert_eq!(apply_deadliness(&table, 35, -10), 35 * 61);
        assert_eq!(apply_deadliness(&table, 35, -40), 0);
        assert_eq!(
            apply_deadliness(&table, 35, 400),
            apply_deadliness(&table, 35, 150)
        );
    }

    #[test]
    fn percent_damage_inflates_sides() {
        let params = PercentCriticalParams::default();
        let table = DeadlinessTable::default();
        let state = PlayerState::default();
        let monster = Monster::new(MonsterId(1), Arc::new(orc()), 10, Position::new(3, 0));
        let rock = Item::new(ItemHandle(1), "Rock", ItemClass::Other).with_dice(2, 5);

        // average 30 (x10), times 10 = 300 (x100), no deadliness = 30000;
        // sides = (60000 - 10000) / 10000 = 5 exactly, so no extra side.
        // Thrown by hand and not a throwing weapon: no critical.
        // Draws: extra-side roll 0, then two dice of 5.
        let mut rng = ScriptedRng::new([0, 4, 4]);
        let result = percent_ranged_damage(
            &mut rng, &params, &table, &state, &monster, &rock, None, None,
        );
        assert_eq!(result.class, HitClass::ShootHit);
        assert_eq!(result.damage, 10);
        assert_eq!(rng.draws(), 3);
    }
}
