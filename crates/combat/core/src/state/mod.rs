//! Records the combat core reads and mutates: player, monsters, items.
//!
//! These are views of data owned by the surrounding game. The core never
//! creates or destroys them; it reads derived numbers, adjusts timed
//! counters and HP through [`crate::events::CombatEvents`], and spends
//! energy on the player.

mod common;
mod item;
mod kinds;
mod monster;
mod player;

pub use common::{ItemHandle, MonsterId, Position};
pub use item::{AmmoKind, Brand, Dice, Item, ItemClass, ItemFlags, Slay};
pub use kinds::{Element, MonsterTimedKind, Skill, SlotKind, Stat};
pub use monster::{
    BlowEffect, BlowMethod, Monster, MonsterBlow, MonsterRace, MonsterTimed, RaceFlags,
};
pub use player::{BodySlot, Player, PlayerFlags, PlayerState, PlayerTimed};
