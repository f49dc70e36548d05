use crate::attack::AttackRoll;
use crate::config::CombatConfig;
use crate::resolve::launcher_multiplier;
use crate::state::{AmmoKind, Dice, Element, Item, Player, Skill, Stat};
use crate::stats::{adj_dex_th, adj_str_blow};

/// Longest throw of any object, in grids.
pub const MAX_THROW_RANGE: i32 = 10;

/// Summary of the player's missile attack with the current launcher (or by
/// hand when there is none).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangedProfile {
    /// Bonuses contributed by the launcher and the player; the ammunition
    /// supplies its own dice when fired.
    pub roll: AttackRoll,
    pub ammo_kind: Option<AmmoKind>,
    pub multiplier: i32,
    pub range: i32,
}

/// Range of a launcher with the given multiplier.
pub fn fire_range(ammo_mult: i32, config: &CombatConfig) -> i32 {
    (6 + 2 * ammo_mult).min(config.max_range)
}

/// Range of a thrown object: stronger throwers and lighter objects go further.
pub fn throw_range(str_index: i32, weight: i32) -> i32 {
    let weight = weight.max(10);
    ((adj_str_blow(str_index) + 20) * 10 / weight).min(MAX_THROW_RANGE)
}

/// Builds the missile profile for `launcher`, or for throwing by hand.
pub fn build_ranged_attack(
    player: &Player,
    launcher: Option<&Item>,
    config: &CombatConfig,
) -> RangedProfile {
    let state = &player.state;
    let mut roll = AttackRoll {
        dice: Dice::new(1, 1),
        accuracy_stat: Stat::Dex,
        damage_stat: Stat::Str,
        message: "hits".into(),
        ..AttackRoll::default()
    };
    roll.to_hit = state.to_h + adj_dex_th(state.stat(Stat::Dex));

    match launcher {
        Some(bow) => {
            let multiplier = launcher_multiplier(state, Some(bow));
            roll.attack_skill = Skill::ToHitBow;
            roll.to_hit += bow.to_h;
            roll.to_dam = bow.to_d;
            roll.source = Some(bow.handle);
            roll.projection = Element::Arrow;

            RangedProfile {
                roll,
                ammo_kind: bow.shoots.or(state.ammo_kind),
                multiplier,
                range: fire_range(multiplier, config),
            }
        }
        None => {
            roll.attack_skill = Skill::ToHitThrow;
            RangedProfile {
                roll,
                ammo_kind: None,
                multiplier: 1,
                range: MAX_THROW_RANGE,
            }
        }
    }
}
