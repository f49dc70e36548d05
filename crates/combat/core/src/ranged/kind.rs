use tracing::trace;

use crate::config::DamageModel;
use crate::env::{CombatEnv, CombatRng};
use crate::resolve::{
    AttackResult, HitClass, chance_of_missile_hit, critical_shot, improve_attack_modifier,
    percent_ranged_damage, ranged_damage, test_hit,
};
use crate::state::{Item, ItemFlags, Monster, Player};

/// Exploding thrown objects multiply their damage by this.
pub const EXPLODE_MULTIPLIER: i32 = 3;

/// How a missile leaves the player's hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RangedKind {
    /// Fired from the equipped launcher.
    Shot,
    /// Thrown by hand.
    Throw,
}

impl RangedKind {
    pub fn launcher(self, player: &Player) -> Option<&Item> {
        match self {
            RangedKind::Shot => player.launcher(),
            RangedKind::Throw => None,
        }
    }

    /// Resolves `missile` striking `monster`.
    ///
    /// The brand or slay is chosen from the missile, then the launcher.
    /// Damage follows the configured [`DamageModel`].
    pub fn resolve<R>(
        self,
        env: CombatEnv<'_>,
        rng: &mut R,
        player: &Player,
        missile: &Item,
        monster: &Monster,
    ) -> AttackResult
    where
        R: CombatRng + ?Sized,
    {
        let launcher = self.launcher(player);
        let chance = chance_of_missile_hit(player, missile, launcher, monster);
        if !test_hit(rng, chance, monster.ac()) {
            trace!(kind = %self, chance, "missile missed");
            return AttackResult::miss("hits");
        }

        let race = &monster.race;
        let modifier = std::iter::once(missile)
            .chain(launcher)
            .fold(None, |best, item| improve_attack_modifier(best, item, race));
        let verb = modifier.map_or("hits", |modifier| modifier.verb(true));

        let (mut damage, class) = match env.config.damage_model {
            DamageModel::Standard => {
                let dmg = ranged_damage(rng, &player.state, race, missile, launcher, modifier);
                let critical = critical_shot(
                    rng,
                    env.tables.ranged_criticals(),
                    player,
                    monster,
                    missile.weight,
                    missile.to_h,
                    dmg,
                    self == RangedKind::Shot,
                );
                (critical.damage, critical.class)
            }
            DamageModel::Percent => {
                let critical = percent_ranged_damage(
                    rng,
                    env.tables.percent_criticals(),
                    env.tables.deadliness(),
                    &player.state,
                    monster,
                    missile,
                    launcher,
                    modifier,
                );
                (critical.damage, critical.class)
            }
        };

        if self == RangedKind::Throw && missile.has(ItemFlags::EXPLODE) {
            damage *= EXPLODE_MULTIPLIER;
        }

        trace!(kind = %self, damage, class = %class, "missile hit");
        AttackResult::hit(damage, class, verb)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::CombatConfig;
    use crate::env::{CombatTables, ScriptedRng};
    use crate::state::{
        AmmoKind, ItemClass, ItemHandle, MonsterId, MonsterRace, Position, RaceFlags, Skill,
        Slay, SlotKind,
    };

    fn archer() -> Player {
        let mut player = Player::new(10);
        player.state = player.state.clone().with_skill(Skill::ToHitBow, 60);
        player.equip(
            SlotKind::Bow,
            Item::new(ItemHandle(1), "Sling", ItemClass::Bow).as_launcher(AmmoKind::Shot, 2),
        );
        player
    }

    fn troll() -> Monster {
        Monster::new(
            MonsterId(3),
            Arc::new(MonsterRace::new("stone troll", 25, 40).with_flags(RaceFlags::TROLL)),
            60,
            Position::new(4, 0),
        )
    }

    fn no_crits(tables: &mut CombatTables) {
        tables.ranged.chance_range = 1;
        tables.ranged.weight_scale = 0;
        tables.ranged.to_h_scale = 0;
        tables.ranged.level_scale = 0;
        tables.ranged.skill_scale = 0;
        tables.ranged.thrown_skill_scale = 0;
    }

    #[test]
    fn shot_multiplies_by_launcher() {
        let config = CombatConfig::default();
        let mut tables = CombatTables::default();
        no_crits(&mut tables);
        let env = CombatEnv::new(&config, &tables);
        let shot = Item::new(ItemHandle(5), "Iron Shot", ItemClass::Shot)
            .with_dice(1, 4)
            .with_bonuses(0, 1);

        // hit, die 3, crit roll fails: (3 + 1) * 2
        let mut rng = ScriptedRng::new([0, 2, 0]);
        let result = RangedKind::Shot.resolve(env, &mut rng, &archer(), &shot, &troll());
        assert_eq!(result, AttackResult::hit(8, HitClass::ShootHit, "hits"));
    }

    #[test]
    fn slays_change_the_verb() {
        let config = CombatConfig::default();
        let mut tables = CombatTables::default();
        no_crits(&mut tables);
        let env = CombatEnv::new(&config, &tables);
        let shot = Item::new(ItemHandle(5), "Iron Shot of Slay Troll", ItemClass::Shot)
            .with_dice(1, 4)
            .with_slay(Slay::new(RaceFlags::TROLL, 3, "smite", "smites"));

        let mut rng = ScriptedRng::new([0, 2, 0]);
        let result = RangedKind::Shot.resolve(env, &mut rng, &archer(), &shot, &troll());
        // 3 * (2 + 3)
        assert_eq!(result, AttackResult::hit(15, HitClass::ShootHit, "smites"));
    }

    #[test]
    fn thrown_flasks_explode() {
        let config = CombatConfig::default();
        let mut tables = CombatTables::default();
        no_crits(&mut tables);
        let env = CombatEnv::new(&config, &tables);
        let flask = Item::new(ItemHandle(6), "Flask of Oil", ItemClass::Flask)
            .with_dice(2, 6)
            .with_weight(10)
            .with_flags(ItemFlags::EXPLODE);

        // hit, dice 1 + 1, crit roll fails
        let mut rng = ScriptedRng::new([0]);
        let result = RangedKind::Throw.resolve(env, &mut rng, &Player::new(10), &flask, &troll());
        assert_eq!(result.damage, 6);
        assert!(result.success);
    }

    #[test]
    fn missed_shots_report_failure() {
        let config = CombatConfig::default();
        let tables = CombatTables::default();
        let env = CombatEnv::new(&config, &tables);
        let shot = Item::new(ItemHandle(5), "Iron Shot", ItemClass::Shot);

        let mut rng = ScriptedRng::new([99]);
        let result = RangedKind::Shot.resolve(env, &mut rng, &archer(), &shot, &troll());
        assert!(!result.success);
        assert_eq!(result.hit_class, HitClass::Miss);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn percent_model_is_selected_by_config() {
        let config = CombatConfig::default().with_damage_model(DamageModel::Percent);
        let tables = CombatTables::default();
        let env = CombatEnv::new(&config, &tables);
        let rock = Item::new(ItemHandle(7), "Rock", ItemClass::Other).with_dice(1, 5);

        // hit, extra-side roll, one die of 5 sides; no critical for plain throws
        let mut rng = ScriptedRng::new([0, 0, 4]);
        let result = RangedKind::Throw.resolve(env, &mut rng, &Player::new(10), &rock, &troll());
        assert_eq!(result, AttackResult::hit(5, HitClass::ShootHit, "hits"));
        assert_eq!(rng.draws(), 3);
    }
}
