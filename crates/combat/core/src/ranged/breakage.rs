use crate::state::{Item, ItemFlags};

/// Percent chance that `item` breaks after being fired or thrown.
///
/// Artifacts never break. Throwing weapons that do not explode are built to
/// survive and break 1% of the time. A missile that missed breaks with the
/// square of its normal chance (50% on a hit becomes 25% on a miss).
pub fn breakage_chance(item: &Item, hit_target: bool) -> i32 {
    if item.artifact {
        return 0;
    }

    let hand_thrown =
        item.has(ItemFlags::THROWING) && !item.has(ItemFlags::EXPLODE) && !item.is_ammo();
    let perc = if hand_thrown {
        1
    } else {
        item.break_percent
    };

    if hit_target { perc } else { perc * perc / 100 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ItemClass, ItemHandle};

    #[test]
    fn misses_square_the_chance() {
        let arrow = Item::new(ItemHandle(1), "Arrow", ItemClass::Arrow);
        assert_eq!(breakage_chance(&arrow, true), 35);
        assert_eq!(breakage_chance(&arrow, false), 12);

        let flask = Item::new(ItemHandle(2), "Flask of Oil", ItemClass::Flask)
            .with_flags(ItemFlags::THROWING | ItemFlags::EXPLODE);
        assert_eq!(breakage_chance(&flask, false), 100);
    }

    #[test]
    fn throwing_weapons_rarely_break() {
        let dagger = Item::new(ItemHandle(3), "Dagger", ItemClass::Sword)
            .with_flags(ItemFlags::THROWING)
            .with_break_percent(50);
        assert_eq!(breakage_chance(&dagger, true), 1);
        assert_eq!(breakage_chance(&dagger, false), 0);
    }

    #[test]
    fn artifacts_never_break() {
        let arrow = Item::new(ItemHandle(4), "Arrow of Power", ItemClass::Arrow)
            .with_break_percent(100)
            .as_artifact();
        assert_eq!(breakage_chance(&arrow, true), 0);
        assert_eq!(breakage_chance(&arrow, false), 0);
    }
}
