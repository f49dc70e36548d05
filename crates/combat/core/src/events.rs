//! Outputs of combat resolution.
//!
//! The core never formats text or owns the level. It reports what happened as
//! [`CombatMessage`]s and asks the surrounding game to carry out effects that
//! reach beyond the two combatants (healing, earthquakes, dropping missiles).
//! Damage and timed effects on the target go through the trait as well so a
//! game can hook death, fear, and saving throws; the default methods apply
//! them directly to the [`Monster`].

use crate::resolve::HitClass;
use crate::state::{Item, Monster, MonsterTimedKind, Position};

/// Things worth telling the player, in the order they happen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombatMessage {
    /// The player is too afraid to attack.
    Afraid,
    /// A melee blow missed.
    Miss,
    /// A melee blow landed (possibly for no damage).
    MeleeHit {
        verb: String,
        class: HitClass,
        /// Elemental follow-up ("burn", "freeze") from the blow's projection.
        projection: Option<&'static str>,
        damage: i32,
    },
    Backstab,
    ShieldBash {
        damage: i32,
    },
    /// A particularly heavy shield bash.
    Whamm,
    Stumble,
    /// A missile hit a visible target.
    MissileHit {
        item: String,
        verb: String,
        class: HitClass,
        damage: i32,
    },
    /// A missile hit something the player cannot see.
    FindsMark {
        item: String,
    },
    /// A timed status on the target changed during the turn.
    MonsterTimedChange {
        kind: MonsterTimedKind,
        before: i32,
        after: i32,
    },
    /// The confusing-touch effect was used up.
    ConfusingTouchEnds,
    /// Bloodlust side effect after a miss.
    BloodlustStrange,
    /// Bloodlust side effect after a hit.
    BloodlustGiveWay,
}

/// Why the player's body suffered from bloodlust.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exertion {
    /// Stats get scrambled.
    Scramble,
    /// Constitution is drained.
    Constitution,
}

/// How a timed increment was caused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimedIncrease {
    /// The monster gets a saving throw against it.
    pub gets_save: bool,
    /// The change should be announced immediately rather than summarised.
    pub notify: bool,
}

/// Sink for effects the core cannot carry out itself.
pub trait CombatEvents {
    fn message(&mut self, message: CombatMessage);

    /// Deals `damage` to `monster`. Returns whether it died.
    fn damage_monster(&mut self, monster: &mut Monster, damage: i32) -> bool {
        monster.take_hit(damage)
    }

    /// Adds `amount` to one of `monster`'s timed counters. Returns whether
    /// the counter changed.
    fn inc_monster_timed(
        &mut self,
        monster: &mut Monster,
        kind: MonsterTimedKind,
        amount: i32,
        _how: TimedIncrease,
    ) -> bool {
        monster.inc_timed(kind, amount)
    }

    fn heal_player(&mut self, amount: i32);

    /// Shakes the level around `center`. Returns whether the target of the
    /// current attack is no longer within reach.
    fn earthquake(&mut self, center: Position) -> bool;

    /// Drops `item` near `grid`; it breaks with `break_chance` percent.
    fn drop_near(&mut self, item: Item, break_chance: i32, grid: Position);

    fn over_exert(&mut self, _exertion: Exertion) {}
}

/// One recorded request, as captured by [`CombatLog`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombatEvent {
    Message(CombatMessage),
    Damage {
        target: crate::state::MonsterId,
        amount: i32,
        killed: bool,
    },
    Timed {
        target: crate::state::MonsterId,
        kind: MonsterTimedKind,
        amount: i32,
        how: TimedIncrease,
    },
    Heal(i32),
    Earthquake(Position),
    Drop {
        item: Item,
        break_chance: i32,
        grid: Position,
    },
    OverExert(Exertion),
}

/// [`CombatEvents`] implementation that applies effects to the monster and
/// records every request in order.
#[derive(Clone, Debug, Default)]
pub struct CombatLog {
    events: Vec<CombatEvent>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn messages(&self) -> impl Iterator<Item = &CombatMessage> {
        self.events.iter().filter_map(|event| match event {
            CombatEvent::Message(message) => Some(message),
            _ => None,
        })
    }

    /// Total damage dealt to monsters.
    pub fn total_damage(&self) -> i32 {
        self.events
            .iter()
            .map(|event| match event {
                CombatEvent::Damage { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }

    pub fn drops(&self) -> impl Iterator<Item = (&Item, i32, Position)> {
        self.events.iter().filter_map(|event| match event {
            CombatEvent::Drop {
                item,
                break_chance,
                grid,
            } => Some((item, *break_chance, *grid)),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl CombatEvents for CombatLog {
    fn message(&mut self, message: CombatMessage) {
        self.events.push(CombatEvent::Message(message));
    }

    fn damage_monster(&mut self, monster: &mut Monster, damage: i32) -> bool {
        let killed = monster.take_hit(damage);
        self.events.push(CombatEvent::Damage {
            target: monster.id,
            amount: damage,
            killed,
        });
        killed
    }

    fn inc_monster_timed(
        &mut self,
        monster: &mut Monster,
        kind: MonsterTimedKind,
        amount: i32,
        how: TimedIncrease,
    ) -> bool {
        self.events.push(CombatEvent::Timed {
            target: monster.id,
            kind,
            amount,
            how,
        });
        monster.inc_timed(kind, amount)
    }

    fn heal_player(&mut self, amount: i32) {
        self.events.push(CombatEvent::Heal(amount));
    }

    fn earthquake(&mut self, center: Position) -> bool {
        self.events.push(CombatEvent::Earthquake(center));
        false
    }

    fn drop_near(&mut self, item: Item, break_chance: i32, grid: Position) {
        self.events.push(CombatEvent::Drop {
            item,
            break_chance,
            grid,
        });
    }

    fn over_exert(&mut self, exertion: Exertion) {
        self.events.push(CombatEvent::OverExert(exertion));
    }
}
