/// How well an attack connected.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HitClass {
    /// No contact, or contact that did no damage.
    Miss,
    /// Ordinary melee hit.
    #[default]
    Hit,
    /// Ordinary missile hit.
    ShootHit,
    Good,
    Great,
    Superb,
    HiGreat,
    HiSuperb,
}

impl HitClass {
    /// Sentence appended to the hit message, for critical classes.
    pub const fn flavor(self) -> Option<&'static str> {
        match self {
            HitClass::Good => Some("It was a good hit!"),
            HitClass::Great => Some("It was a great hit!"),
            HitClass::Superb => Some("It was a superb hit!"),
            HitClass::HiGreat => Some("It was a *GREAT* hit!"),
            HitClass::HiSuperb => Some("It was a *SUPERB* hit!"),
            HitClass::Miss | HitClass::Hit | HitClass::ShootHit => None,
        }
    }

    pub const fn is_critical(self) -> bool {
        self.flavor().is_some()
    }

    /// Whether a missile message exists for this class. Missile tables stop
    /// at superb hits.
    pub const fn is_ranged_class(self) -> bool {
        !matches!(self, HitClass::Hit | HitClass::HiGreat | HitClass::HiSuperb)
    }
}

/// Outcome of a single blow or missile impact.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    /// The hit roll succeeded (damage may still be zero).
    pub success: bool,
    pub damage: i32,
    pub hit_class: HitClass,
    pub verb: String,
}

impl AttackResult {
    pub fn miss(verb: impl Into<String>) -> Self {
        Self {
            success: false,
            damage: 0,
            hit_class: HitClass::Miss,
            verb: verb.into(),
        }
    }

    pub fn hit(damage: i32, hit_class: HitClass, verb: impl Into<String>) -> Self {
        Self {
            success: true,
            damage,
            hit_class,
            verb: verb.into(),
        }
    }

    /// Clamps damage at zero; a hit that does nothing becomes a `Miss` class
    /// with `harmless_verb`.
    pub(crate) fn floor_damage(&mut self, harmless_verb: &str) {
        if self.success && self.damage <= 0 {
            self.damage = 0;
            self.hit_class = HitClass::Miss;
            self.verb = harmless_verb.to_owned();
        }
    }
}
