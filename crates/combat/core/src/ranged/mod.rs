//! Missiles: firing from a launcher and throwing by hand.
//!
//! A missile travels along its projection path one grid at a time. It stops
//! before a wall, strikes each monster it meets until its piercing runs out,
//! and stops after entering a grid that is passable but blocks projections.
//! Whatever happens, one item leaves the stack and is dropped (or breaks)
//! where the missile stopped.

mod breakage;
mod kind;
mod path;

pub use breakage::breakage_chance;
pub use kind::{EXPLODE_MULTIPLIER, RangedKind};
pub use path::project_path;

use tracing::{debug, trace};

use crate::attack::{fire_range, throw_range};
use crate::env::{CaveOracle, CombatEnv, CombatRng};
use crate::events::{CombatEvents, CombatMessage};
use crate::resolve::{AttackResult, launcher_multiplier};
use crate::state::{Item, Monster, MonsterId, Player, PlayerTimed, Position, Stat};

/// Shots per turn used for throws, in tenths.
pub const THROW_SHOTS: i32 = 10;

/// Why a fire command could not be carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireRefusal {
    NoLauncher,
    /// The launcher cannot fire this kind of ammunition.
    WrongAmmo,
    EmptyStack,
}

/// What one missile did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Volley {
    /// One entry per monster the missile reached, in path order.
    pub results: Vec<(MonsterId, AttackResult)>,
    pub hit_target: bool,
    /// Last grid the missile entered; it is dropped here.
    pub final_grid: Position,
    pub break_chance: i32,
    /// The stack the missile came from is now empty.
    pub none_left: bool,
}

/// Everything [`travel`] needs to know about one launch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Launch {
    pub kind: RangedKind,
    pub range: i32,
    /// Shots per turn, in tenths.
    pub shots: i32,
    pub target: Position,
}

/// Fires one piece of `ammo` from the equipped launcher toward `target`.
#[allow(clippy::too_many_arguments)]
pub fn fire<R, E, C>(
    env: CombatEnv<'_>,
    rng: &mut R,
    events: &mut E,
    cave: &C,
    player: &mut Player,
    monsters: &mut [Monster],
    ammo: &mut Item,
    target: Position,
) -> Result<Volley, FireRefusal>
where
    R: CombatRng + ?Sized,
    E: CombatEvents + ?Sized,
    C: CaveOracle + ?Sized,
{
    let launcher = player.launcher().ok_or(FireRefusal::NoLauncher)?;
    let shoots = launcher.shoots.or(player.state.ammo_kind);
    if shoots.is_none() || ammo.class.ammo_kind() != shoots {
        return Err(FireRefusal::WrongAmmo);
    }
    if ammo.number == 0 {
        return Err(FireRefusal::EmptyStack);
    }

    let range = fire_range(launcher_multiplier(&player.state, Some(launcher)), env.config);
    let launch = Launch {
        kind: RangedKind::Shot,
        range,
        shots: player.state.num_shots,
        target,
    };
    Ok(travel(env, rng, events, cave, player, monsters, ammo, launch))
}

/// Throws one of `item` toward `target`.
///
/// Throwing an equipped weapon is the caller's business: take it off first
/// and pass the resulting stack.
#[allow(clippy::too_many_arguments)]
pub fn throw<R, E, C>(
    env: CombatEnv<'_>,
    rng: &mut R,
    events: &mut E,
    cave: &C,
    player: &mut Player,
    monsters: &mut [Monster],
    item: &mut Item,
    target: Position,
) -> Result<Volley, FireRefusal>
where
    R: CombatRng + ?Sized,
    E: CombatEvents + ?Sized,
    C: CaveOracle + ?Sized,
{
    if item.number == 0 {
        return Err(FireRefusal::EmptyStack);
    }
    let launch = Launch {
        kind: RangedKind::Throw,
        range: throw_range(player.state.stat(Stat::Str), item.weight),
        shots: THROW_SHOTS,
        target,
    };
    Ok(travel(env, rng, events, cave, player, monsters, item, launch))
}

/// Moves one missile from `stack` along its path and resolves every impact.
///
/// Sets the player's energy use to `move_energy × 10 / shots`. A power shot
/// with an arrow or bolt pierces as many monsters as the launcher
/// multiplier; anything else stops at the first monster, hit or miss.
#[allow(clippy::too_many_arguments)]
pub fn travel<R, E, C>(
    env: CombatEnv<'_>,
    rng: &mut R,
    events: &mut E,
    cave: &C,
    player: &mut Player,
    monsters: &mut [Monster],
    stack: &mut Item,
    launch: Launch,
) -> Volley
where
    R: CombatRng + ?Sized,
    E: CombatEvents + ?Sized,
    C: CaveOracle + ?Sized,
{
    player.energy_use = env.config.move_energy * 10 / launch.shots.max(1);

    let path = project_path(
        cave,
        player.position,
        launch.target,
        launch.range,
        env.config.max_path,
    );

    let mut pierce = 1;
    if player.timed.contains(PlayerTimed::POWERSHOT) && stack.class.is_sharp_missile() {
        pierce = launcher_multiplier(&player.state, player.launcher()).max(1);
    }

    let mut grid = player.position;
    let mut hit_target = false;
    let mut results = Vec::new();

    for &step in &path {
        if !cave.is_passable(step) && !cave.is_projectable(step) {
            trace!(%step, "missile stopped by wall");
            break;
        }
        grid = step;

        let monster = match cave.monster_at(step) {
            Some(id) => monsters.iter_mut().find(|m| m.id == id && !m.is_dead()),
            None => None,
        };
        if let Some(monster) = monster {
            let mut result = launch.kind.resolve(env, rng, player, stack, monster);
            if result.success {
                hit_target = true;
                result.floor_damage("fails to harm");

                if monster.obvious {
                    events.message(CombatMessage::MissileHit {
                        item: stack.name.clone(),
                        verb: result.verb.clone(),
                        class: result.hit_class,
                        damage: result.damage,
                    });
                } else {
                    events.message(CombatMessage::FindsMark {
                        item: stack.name.clone(),
                    });
                }
                events.damage_monster(monster, result.damage);
            }
            results.push((monster.id, result));

            pierce -= 1;
            if pierce > 0 {
                continue;
            }
            trace!(%step, "missile spent");
            break;
        }

        if !cave.is_projectable(step) {
            trace!(%step, "missile stopped in blocking grid");
            break;
        }
    }

    let mut missile = stack.clone();
    missile.number = 1;
    stack.number = stack.number.saturating_sub(1);
    player.timed.remove(PlayerTimed::POWERSHOT);

    let break_chance = breakage_chance(&missile, hit_target);
    debug!(
        kind = %launch.kind,
        %grid,
        hit_target,
        break_chance,
        energy_use = player.energy_use,
        "missile landed"
    );
    events.drop_near(missile, break_chance, grid);

    Volley {
        results,
        hit_target,
        final_grid: grid,
        break_chance,
        none_left: stack.number == 0,
    }
}
