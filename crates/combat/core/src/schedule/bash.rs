//! Opportunistic shield bashes at the start of a melee turn.

use tracing::debug;

use crate::env::{CombatEnv, CombatRng};
use crate::events::{CombatEvents, CombatMessage, TimedIncrease};
use crate::state::{Dice, Monster, MonsterTimedKind, Player, Skill, Stat};
use crate::stats::{adj_dex_th, adj_str_td};

/// Cap on shield bash damage.
pub const MAX_BASH_DAMAGE: i32 = 125;

/// What the bash attempt did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShieldBash {
    /// No shield, a pathetic target, a failed roll, or no damage.
    Skipped,
    Landed { damage: i32, slain: bool },
}

impl ShieldBash {
    pub fn slain(self) -> bool {
        matches!(self, ShieldBash::Landed { slain: true, .. })
    }
}

/// Numbers fixed before any roll is made.
struct BashSetup {
    chance: i32,
    quality: i32,
    dice: Dice,
}

fn bash_setup(player: &Player, monster: &Monster) -> Option<BashSetup> {
    let state = &player.state;
    let shield = player.shield()?;
    if monster.level() < player.level / 2 {
        return None;
    }

    let skill = state.skill(Skill::ToHitMelee);
    let dex = state.stat(Stat::Dex);
    let mut chance = skill / 8 + adj_dex_th(dex) / 2;

    match player.weapon() {
        None => chance *= 4,
        Some(weapon) => {
            let blows = state
                .attacks
                .iter()
                .find(|roll| roll.source == Some(weapon.handle))
                .map_or(1, |roll| roll.blows.hundredths() / 100);
            let weapon_dice = weapon.dice.count * weapon.dice.sides * blows;
            if weapon_dice < shield.dice.count * shield.dice.sides * 3 {
                chance *= 2;
            }
        }
    }

    let quality = skill / 4 + player.weight / 8 + player.total_weight / 80 + shield.weight / 2;
    Some(BashSetup {
        chance,
        quality,
        dice: shield.dice,
    })
}

/// Tries to open the turn with a shield bash.
///
/// Unarmed players, and players whose weapon is puny next to their shield,
/// bash more often. A landed bash may stun or confuse a surviving target,
/// and the player may stumble and lose part of the turn.
pub fn attempt_shield_bash<R, E>(
    env: CombatEnv<'_>,
    rng: &mut R,
    events: &mut E,
    player: &mut Player,
    monster: &mut Monster,
) -> ShieldBash
where
    R: CombatRng + ?Sized,
    E: CombatEvents + ?Sized,
{
    let Some(setup) = bash_setup(player, monster) else {
        return ShieldBash::Skipped;
    };

    let level = monster.level();
    if setup.chance <= rng.randint0(200 + level) {
        return ShieldBash::Skipped;
    }

    let mut damage = setup.dice.roll(rng);
    damage *= setup.quality / 40 + player.level / 14;
    damage += adj_str_td(player.state.stat(Stat::Str));
    if damage <= 0 {
        return ShieldBash::Skipped;
    }
    let damage = damage.min(MAX_BASH_DAMAGE);

    debug!(damage, quality = setup.quality, "shield bash");
    events.message(CombatMessage::ShieldBash { damage });
    let heft = rng.randint1(damage);
    if heft > 30 + rng.randint1(damage / 2) {
        events.message(CombatMessage::Whamm);
    }

    if events.damage_monster(monster, damage) {
        return ShieldBash::Landed { damage, slain: true };
    }

    let impact = setup.quality + player.level;
    if impact > rng.randint1(200 + level * 8) {
        let turns = rng.randint0(player.level / 5) + 4;
        events.inc_monster_timed(monster, MonsterTimedKind::Stun, turns, TimedIncrease::default());
    }
    if impact > rng.randint1(300 + level * 12) {
        let turns = rng.randint0(player.level / 5) + 4;
        events.inc_monster_timed(monster, MonsterTimedKind::Conf, turns, TimedIncrease::default());
    }

    if 35 + adj_dex_th(player.state.stat(Stat::Dex)) < rng.randint1(60) {
        let lost = rng.randint1(50) + 25;
        events.message(CombatMessage::Stumble);
        player.energy_use += lost * env.config.move_energy / 100;
    }

    ShieldBash::Landed {
        damage,
        slain: false,
    }
}
