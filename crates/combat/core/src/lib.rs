pub mod attack;
pub mod config;
pub mod env;
pub mod error;
pub mod events;
pub mod ranged;
pub mod resolve;
pub mod schedule;
pub mod state;
pub mod stats;

pub use attack::{
    AttackRoll, Blows, MAX_THROW_RANGE, RangedProfile, backstab_mod_attack, backstab_power,
    build_monster_attack, build_ranged_attack, build_weapon_attack, calc_blows, calc_shots,
    derive_attacks, fire_range, get_monster_attacks, is_heavy_launcher, throw_range,
};
pub use config::{CombatConfig, DamageModel};
pub use env::{
    CaveOracle, CombatEnv, CombatRng, CombatTables, CriticalLevel, CriticalParams, CriticalTable,
    DeadlinessTable, GridCave, PcgRng, PercentCriticalLevel, PercentCriticalParams,
    PercentCriticalTable, RandomChance, ScriptedRng, TablesOracle, TerrainKind,
};
pub use error::{CombatError, ErrorSeverity, TableError};
pub use events::{
    CombatEvent, CombatEvents, CombatLog, CombatMessage, Exertion, TimedIncrease,
};
pub use ranged::{
    FireRefusal, Launch, RangedKind, Volley, breakage_chance, fire, project_path, throw, travel,
};
pub use resolve::{
    AttackModifier, AttackResult, BlowOutcome, HitClass, hit_chance, resolve_melee_blow, test_hit,
};
pub use schedule::{MeleeTurn, ShieldBash, attempt_shield_bash, melee_turn};
pub use state::{
    AmmoKind, BlowEffect, BlowMethod, BodySlot, Brand, Dice, Element, Item, ItemClass, ItemFlags,
    ItemHandle, Monster, MonsterBlow, MonsterId, MonsterRace, MonsterTimed, MonsterTimedKind,
    Player, PlayerFlags, PlayerState, PlayerTimed, Position, RaceFlags, Skill, Slay, SlotKind,
    Stat,
};
pub use stats::{PowerCurve, PowerKind, PowerLevels};
