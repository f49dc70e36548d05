//! Melee turns: spending one turn's energy on as many blows as it buys.
//!
//! The player never spends more than one full turn's worth of energy on a
//! melee attack, so slower monsters never see the player act twice.

mod bash;

pub use bash::{MAX_BASH_DAMAGE, ShieldBash, attempt_shield_bash};

use strum::IntoEnumIterator;
use tracing::debug;

use crate::attack::{backstab_mod_attack, backstab_power};
use crate::env::{CombatEnv, CombatRng};
use crate::events::{CombatEvents, CombatMessage};
use crate::resolve::resolve_melee_blow;
use crate::state::{Monster, MonsterTimedKind, Player, PlayerFlags};
use crate::stats::PowerKind;

/// Summary of one melee turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeleeTurn {
    /// Blows resolved (hits and misses), not counting a shield bash.
    pub blows: u32,
    pub bash: Option<ShieldBash>,
    /// The target died or was moved out of reach.
    pub slain: bool,
}

/// Attacks `monster` until the next blow would overspend the turn or the
/// target is gone.
///
/// Each blow picks one of the player's attacks uniformly at random and costs
/// `100 × move_energy / blows` energy. A blow that would push
/// `player.energy_use` past the energy available is not made. Sleeping,
/// held, slowed, frightened, or stunned targets are backstabbed.
pub fn melee_turn<R, E>(
    env: CombatEnv<'_>,
    rng: &mut R,
    events: &mut E,
    player: &mut Player,
    monster: &mut Monster,
) -> MeleeTurn
where
    R: CombatRng + ?Sized,
    E: CombatEvents + ?Sized,
{
    let move_energy = env.config.move_energy;
    let avail = player.energy.min(move_energy);
    let backstab = backstab_power(monster);
    let backstab_level = player.powers.level(PowerKind::Backstab);
    let before = monster.timed.as_array();
    let mut turn = MeleeTurn::default();

    player.energy_use = 0;

    if player.state.has(PlayerFlags::SHIELD_BASH) && monster.visible {
        let bash = attempt_shield_bash(env, rng, events, player, monster);
        turn.bash = Some(bash);
        if bash.slain() {
            turn.slain = true;
            return turn;
        }
    }

    let attack_count = player.state.attacks.len() as i32;
    if attack_count == 0 {
        debug!("no attacks derived; nothing to swing");
        return turn;
    }

    let mut backstab_announced = false;
    while !turn.slain {
        let which = rng.randint0(attack_count) as usize;
        let Some(mut roll) = player.state.attacks.get(which).cloned() else {
            break;
        };

        let cost = roll.blows.energy_per_blow(move_energy).max(1);
        if player.energy_use + cost > avail {
            debug!(
                energy_use = player.energy_use,
                cost, avail, "turn energy exhausted"
            );
            break;
        }

        let stabbed = backstab > 0 && backstab_mod_attack(&mut roll, backstab, backstab_level);
        if stabbed && !backstab_announced {
            backstab_announced = true;
            events.message(CombatMessage::Backstab);
        }

        let outcome = resolve_melee_blow(env, rng, events, player, monster, &roll);
        turn.blows += 1;
        turn.slain = outcome.stop;
        player.energy_use += cost;
        debug!(
            which,
            cost,
            energy_use = player.energy_use,
            damage = outcome.result.damage,
            "blow resolved"
        );
    }

    // a survivor shaken out of reach still gets its status report
    if !monster.is_dead() && monster.visible {
        for kind in MonsterTimedKind::iter() {
            let (was, now) = (before[kind as usize], monster.timed.get(kind));
            if was != now {
                events.message(CombatMessage::MonsterTimedChange {
                    kind,
                    before: was,
                    after: now,
                });
            }
        }
    }

    turn
}
