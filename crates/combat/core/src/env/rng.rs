//! Random number generation for combat rolls.
//!
//! Combat draws from one shared generator in a fixed order per blow (hit roll,
//! damage dice, critical roll, then side effects). Implementations must be
//! deterministic given their seed so fights can be replayed and tested.

/// A probability expressed as `numerator / denominator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomChance {
    pub numerator: i32,
    pub denominator: i32,
}

impl RandomChance {
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// The chance scaled to a whole percentage, rounded down.
    pub fn percent(&self) -> i32 {
        if self.denominator <= 0 {
            return 0;
        }
        self.numerator * 100 / self.denominator
    }
}

/// Source of randomness for combat resolution.
///
/// Only [`CombatRng::next_u32`] must be provided; every helper derives from
/// it so a scripted generator in tests controls all rolls.
pub trait CombatRng {
    /// Next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `0..n`. Returns 0 when `n <= 0`.
    fn randint0(&mut self, n: i32) -> i32 {
        if n <= 0 {
            return 0;
        }
        (self.next_u32() % n as u32) as i32
    }

    /// Uniform value in `1..=n`. Returns 0 when `n <= 0`.
    fn randint1(&mut self, n: i32) -> i32 {
        if n <= 0 {
            return 0;
        }
        self.randint0(n) + 1
    }

    /// True with probability `1 / n`; always true for `n <= 1`.
    fn one_in(&mut self, n: i32) -> bool {
        n <= 1 || self.randint0(n) == 0
    }

    /// Sum of `count` dice with `sides` faces.
    fn damroll(&mut self, count: i32, sides: i32) -> i32 {
        if sides <= 0 {
            return 0;
        }
        (0..count.max(0)).map(|_| self.randint1(sides)).sum()
    }

    /// Rolls against a [`RandomChance`].
    fn check(&mut self, chance: RandomChance) -> bool {
        self.randint0(chance.denominator) < chance.numerator
    }
}

impl<R: CombatRng + ?Sized> CombatRng for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. The stream is fully
/// determined by the seed.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Seeds the generator. The seed is mixed once so nearby seeds diverge.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.state = Self::pcg_step(rng.state);
        rng
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl CombatRng for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

/// Generator that replays a fixed list of raw values, cycling at the end.
///
/// Useful for pinning down individual rolls in tests: `randint0(n)` returns
/// `value % n`, so scripting `k` forces any roll with `n > k` to `k`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// How many values have been drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl CombatRng for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
