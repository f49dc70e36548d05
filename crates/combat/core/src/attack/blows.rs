//! Blow assignment and the player's full attack table.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::attack::{
    AttackRoll, Blows, build_ranged_attack, build_weapon_attack, get_monster_attacks,
};
use crate::config::CombatConfig;
use crate::state::{Item, MonsterRace, Player, PlayerFlags, PlayerState, SlotKind, Stat};
use crate::stats::{adj_stat_blow, adj_str_hold};

/// Blows per turn for `roll` with a source weighing `weight` tenth-pounds.
///
/// Lighter weapons and higher skill give more blows; the better of the
/// roll's two stats counts twice. Each point of `extra` adds a full blow.
pub fn calc_blows(state: &PlayerState, weight: i32, roll: &AttackRoll, extra: i32) -> Blows {
    let div = (weight * 2).max(25) + 100;

    let damage = state.stat(roll.damage_stat);
    let accuracy = state.stat(roll.accuracy_stat);
    let combined = (damage + accuracy + damage.max(accuracy)) / 3;

    let base = adj_stat_blow(combined).max(0);
    let blows = base * state.skill(roll.attack_skill) / div;

    Blows::from_hundredths(blows + 100 * extra)
}

/// How far `launcher` exceeds what the player's strength can draw, in
/// pounds. Zero or less means it is light enough.
fn launcher_excess(state: &PlayerState, launcher: &Item) -> i32 {
    launcher.weight / 10 - adj_str_hold(state.stat(Stat::Str))
}

/// Whether `launcher` is too heavy for the player's strength to draw.
pub fn is_heavy_launcher(state: &PlayerState, launcher: &Item) -> bool {
    launcher_excess(state, launcher) > 0
}

/// Shots per turn in tenths with `launcher` equipped.
///
/// One shot, plus `extra_shots` tenths and a tenth per three levels with
/// [`PlayerFlags::FAST_SHOT`]. A launcher too heavy to draw gets neither.
pub fn calc_shots(player: &Player, launcher: &Item, extra_shots: i32) -> (i32, bool) {
    let heavy = is_heavy_launcher(&player.state, launcher);
    let mut shots = 10;
    if !heavy {
        shots += extra_shots;
        if player.state.has(PlayerFlags::FAST_SHOT) {
            shots += player.level / 3;
        }
    }
    (shots.max(10), heavy)
}

/// Rebuilds `player.state.attacks` and `player.state.ranged`, and the shot
/// count when a launcher is equipped.
///
/// Wielded weapons come first, then blows of the monster form the player has
/// taken (if any). With neither, the player fights bare-handed. Every melee
/// attack gets one extra blow per attack in the table, so splitting blows
/// across several attacks never loses a turn's worth of striking.
pub fn derive_attacks(
    player: &mut Player,
    shape: Option<&MonsterRace>,
    extra_blows: i32,
    extra_shots: i32,
    config: &CombatConfig,
) {
    let view: &Player = player;

    let mut attacks: ArrayVec<AttackRoll, { CombatConfig::MAX_ATTACKS }> = view
        .slots_of(SlotKind::Weapon)
        .filter_map(|slot| slot.item.as_ref())
        .take(CombatConfig::MAX_ATTACKS - 1)
        .map(|weapon| build_weapon_attack(view, Some(weapon)))
        .collect();

    if let Some(race) = shape {
        let room = CombatConfig::MAX_ATTACKS - attacks.len();
        attacks.extend(get_monster_attacks(view, race, room));
    }

    if attacks.is_empty() {
        attacks.push(build_weapon_attack(view, None));
    }

    let attack_count = attacks.len() as i32;
    for roll in &mut attacks {
        roll.blows = if view.state.heavy_wield {
            Blows::ONE
        } else {
            let weight = roll
                .source
                .and_then(|handle| view.item(handle))
                .map(|item| item.weight)
                .unwrap_or(0);
            calc_blows(&view.state, weight, roll, extra_blows + attack_count)
        };
    }

    let shots = view
        .launcher()
        .map(|launcher| calc_shots(view, launcher, extra_shots));
    let ranged = view.launcher().map(|launcher| {
        let mut profile = build_ranged_attack(view, Some(launcher), config);
        profile.roll.blows = calc_blows(&view.state, launcher.weight, &profile.roll, extra_shots);
        let excess = launcher_excess(&view.state, launcher);
        if excess > 0 {
            profile.roll.to_hit -= 2 * excess;
        }
        profile
    });

    debug!(
        attacks = attacks.len(),
        heavy_wield = view.state.heavy_wield,
        ranged = ranged.is_some(),
        "derived attack table"
    );

    if let Some((num_shots, heavy)) = shots {
        player.state.num_shots = num_shots;
        player.state.heavy_shoot = heavy;
    } else {
        player.state.heavy_shoot = false;
    }
    player.state.attacks = attacks;
    player.state.ranged = ranged;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        AmmoKind, BlowEffect, BlowMethod, Dice, Element, Item, ItemClass, ItemHandle,
        MonsterBlow, Skill, Stat,
    };

    fn skilled_player() -> Player {
        let mut player = Player::new(20);
        player.state = player
            .state
            .with_skill(Skill::ToHitMelee, 100)
            .with_skill(Skill::ToHitBow, 60);
        player
    }

    #[test]
    fn calc_blows_weights_the_better_stat() {
        let state = PlayerState::default()
            .with_skill(Skill::ToHitMelee, 100)
            .with_stat(Stat::Str, 13)
            .with_stat(Stat::Dex, 7);
        let roll = AttackRoll::default();

        // combined (13 + 7 + 13) / 3 = 11, base 12 * 600 / 16 = 450
        // div = max(120, 25) + 100 = 220; 450 * 100 / 220 = 204
        assert_eq!(calc_blows(&state, 60, &roll, 0).hundredths(), 204);
        assert_eq!(calc_blows(&state, 60, &roll, 1).hundredths(), 304);
    }

    #[test]
    fn calc_blows_never_below_one() {
        let state = PlayerState::default();
        let roll = AttackRoll::default();
        assert_eq!(calc_blows(&state, 300, &roll, 0), Blows::ONE);
    }

    #[test]
    fn bare_hands_when_nothing_wielded() {
        let mut player = skilled_player();
        derive_attacks(&mut player, None, 0, 0, &CombatConfig::default());

        assert_eq!(player.state.attacks.len(), 1);
        let fist = &player.state.attacks[0];
        assert_eq!(fist.message, "punch");
        // neutral stats: 300 * 100 / 125 = 240, plus one blow for the single attack
        assert_eq!(fist.blows.hundredths(), 340);
        assert!(player.state.ranged.is_none());
    }

    #[test]
    fn weapons_and_shape_share_the_table() {
        let mut player = skilled_player();
        player.equip(
            SlotKind::Weapon,
            Item::new(ItemHandle(1), "Dagger", ItemClass::Sword)
                .with_dice(1, 4)
                .with_weight(12),
        );
        let race = MonsterRace::new("bear", 9, 35).with_blow(MonsterBlow {
            method: Some(BlowMethod {
                name: "claw".into(),
                skill: Skill::ToHitMelee,
                equip_slot: SlotKind::Gloves,
                projection: Element::Slashing,
                message: "claw".into(),
            }),
            effect: BlowEffect::hurt(),
            dice: Dice::new(1, 8),
        });

        derive_attacks(&mut player, Some(&race), 0, 0, &CombatConfig::default());

        assert_eq!(player.state.attacks.len(), 2);
        assert_eq!(player.state.attacks[0].message, "hit");
        assert_eq!(player.state.attacks[1].message, "claw");
        // dagger: 300 * 100 / 125 + 200; claw has no source, same divisor
        assert_eq!(player.state.attacks[0].blows.hundredths(), 440);
        assert_eq!(player.state.attacks[1].blows.hundredths(), 440);
    }

    #[test]
    fn heavy_wield_means_one_blow() {
        let mut player = skilled_player();
        player.state.heavy_wield = true;
        player.equip(
            SlotKind::Weapon,
            Item::new(ItemHandle(1), "Great Axe", ItemClass::Polearm)
                .with_dice(4, 4)
                .with_weight(230),
        );
        derive_attacks(&mut player, None, 2, 0, &CombatConfig::default());
        assert_eq!(player.state.attacks[0].blows, Blows::ONE);
    }

    #[test]
    fn launcher_fills_ranged_profile() {
        let mut player = skilled_player();
        player.equip(
            SlotKind::Bow,
            Item::new(ItemHandle(2), "Sling", ItemClass::Bow)
                .as_launcher(AmmoKind::Shot, 2)
                .with_weight(5),
        );
        derive_attacks(&mut player, None, 0, 1, &CombatConfig::default());

        let ranged = player.state.ranged.as_ref().unwrap();
        assert_eq!(ranged.ammo_kind, Some(AmmoKind::Shot));
        assert_eq!(ranged.multiplier, 2);
        // 300 * 60 / 125 = 144, plus one extra shot
        assert_eq!(ranged.roll.blows.hundredths(), 244);
        // one shot plus one tenth; roll blows do not feed the shot count
        assert_eq!(player.state.num_shots, 11);
        assert!(!player.state.heavy_shoot);
    }

    fn longbow() -> Item {
        Item::new(ItemHandle(3), "Long Bow", ItemClass::Bow)
            .as_launcher(AmmoKind::Arrow, 3)
            .with_weight(40)
    }

    #[test]
    fn fast_shooters_gain_a_tenth_per_three_levels() {
        let mut player = skilled_player();
        player.state.flags |= PlayerFlags::FAST_SHOT;
        player.equip(SlotKind::Bow, longbow());
        derive_attacks(&mut player, None, 0, 2, &CombatConfig::default());

        // level 20: 10 + 2 + 20 / 3
        assert_eq!(player.state.num_shots, 18);
    }

    #[test]
    fn a_launcher_too_heavy_to_draw_gets_one_shot() {
        let mut player = skilled_player();
        player.state = player.state.with_stat(Stat::Str, 0);
        player.state.flags |= PlayerFlags::FAST_SHOT;
        let ballista = longbow().with_weight(2000);
        assert!(is_heavy_launcher(&player.state, &ballista));
        let config = CombatConfig::default();
        let unburdened = build_ranged_attack(&player, Some(&ballista), &config).roll.to_hit;
        player.equip(SlotKind::Bow, ballista);
        derive_attacks(&mut player, None, 0, 5, &config);

        assert!(player.state.heavy_shoot);
        assert_eq!(player.state.num_shots, 10);
        let excess = 200 - adj_str_hold(0);
        let ranged = player.state.ranged.as_ref().unwrap();
        assert_eq!(ranged.roll.to_hit, unburdened - 2 * excess);
    }
}
