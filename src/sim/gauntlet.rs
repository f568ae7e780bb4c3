//! Gauntlet generation
//!
//! A gauntlet is the fixed sequence of gate pairs the player runs through
//! before each boss. Structure is fixed, values are rolled from the seeded RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::modifier::Modifier;

/// Gate pairs per gauntlet
pub const GAUNTLET_LEN: usize = 10;
/// Leading warm-up pairs in every gauntlet
pub const WARMUP_PAIRS: usize = 3;

/// Modifiers for one gate pair, before it is placed on the track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateBlueprint {
    pub left: Modifier,
    pub right: Modifier,
}

/// Ordered blueprints for one difficulty level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gauntlet {
    pub level: u32,
    pairs: Vec<GateBlueprint>,
}

impl Gauntlet {
    /// Build a gauntlet from explicit blueprints (tests, scripted levels)
    pub fn from_pairs(level: u32, pairs: Vec<GateBlueprint>) -> Self {
        Self { level, pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GateBlueprint> {
        self.pairs.get(index)
    }

    pub fn pairs(&self) -> &[GateBlueprint] {
        &self.pairs
    }
}

/// Hard-level pair archetypes, picked uniformly
#[derive(Debug, Clone, Copy)]
enum Archetype {
    SqrtOrMidAdd,
    SumDigitsOrSmallAdd,
    ModOrFlatAdd,
    DoubleOrLargeAdd,
}

const ARCHETYPES: [Archetype; 4] = [
    Archetype::SqrtOrMidAdd,
    Archetype::SumDigitsOrSmallAdd,
    Archetype::ModOrFlatAdd,
    Archetype::DoubleOrLargeAdd,
];

fn small_add(rng: &mut impl Rng) -> Modifier {
    Modifier::add(rng.random_range(10..=50) as f64)
}

fn small_sub(rng: &mut impl Rng) -> Modifier {
    Modifier::sub(rng.random_range(10..=50) as f64)
}

fn mid_add(rng: &mut impl Rng) -> Modifier {
    Modifier::add(rng.random_range(50..=150) as f64)
}

fn large_add(rng: &mut impl Rng) -> Modifier {
    Modifier::add(rng.random_range(500..=999) as f64)
}

fn easy_pair(rng: &mut impl Rng) -> (Modifier, Modifier) {
    loop {
        let (a, b) = (small_add(rng), small_sub(rng));
        if a.label != b.label {
            return (a, b);
        }
    }
}

fn hard_pair(rng: &mut impl Rng) -> (Modifier, Modifier) {
    let archetype = ARCHETYPES[rng.random_range(0..ARCHETYPES.len())];
    match archetype {
        Archetype::SqrtOrMidAdd => (Modifier::sqrt(), mid_add(rng)),
        Archetype::SumDigitsOrSmallAdd => (Modifier::sum_digits(), small_add(rng)),
        Archetype::ModOrFlatAdd => (Modifier::modulo(100.0), Modifier::add(50.0)),
        Archetype::DoubleOrLargeAdd => (Modifier::mul(2.0), large_add(rng)),
    }
}

/// Generate the gauntlet for `level`
///
/// Level 0 is the easy add/subtract gauntlet; every later level draws from
/// the formula archetypes. The first [`WARMUP_PAIRS`] pairs are always small
/// additions.
pub fn generate(level: u32, rng: &mut impl Rng) -> Gauntlet {
    log::info!("Generating gauntlet for level {}", level + 1);

    let mut pairs = Vec::with_capacity(GAUNTLET_LEN);
    for i in 0..GAUNTLET_LEN {
        let (mut left, mut right) = if i < WARMUP_PAIRS {
            (Modifier::add((i + 2) as f64), Modifier::add((i + 3) as f64))
        } else if level == 0 {
            easy_pair(rng)
        } else {
            hard_pair(rng)
        };

        // Keep the better side from settling on one lane
        if rng.random_bool(0.5) {
            std::mem::swap(&mut left, &mut right);
        }
        pairs.push(GateBlueprint { left, right });
    }

    Gauntlet { level, pairs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::modifier::{MIN_DIV_OPERAND, ModifierKind};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn operands_sorted(pair: &GateBlueprint) -> (f64, f64) {
        let (a, b) = (pair.left.operand, pair.right.operand);
        (a.min(b), a.max(b))
    }

    #[test]
    fn test_warmup_pairs_ascend() {
        let mut rng = Pcg32::seed_from_u64(7);
        let g = generate(0, &mut rng);
        let mut last_lo = 0.0;
        for pair in &g.pairs()[..WARMUP_PAIRS] {
            assert_eq!(pair.left.kind, ModifierKind::Add);
            assert_eq!(pair.right.kind, ModifierKind::Add);
            let (lo, hi) = operands_sorted(pair);
            assert!(lo > last_lo);
            assert!(hi > lo);
            last_lo = lo;
        }
        assert_eq!(operands_sorted(&g.pairs()[0]), (2.0, 3.0));
        assert_eq!(operands_sorted(&g.pairs()[2]), (4.0, 5.0));
    }

    #[test]
    fn test_easy_level_is_add_versus_sub() {
        let mut rng = Pcg32::seed_from_u64(11);
        let g = generate(0, &mut rng);
        for pair in &g.pairs()[WARMUP_PAIRS..] {
            let kinds = [pair.left.kind, pair.right.kind];
            assert!(kinds.contains(&ModifierKind::Add));
            assert!(kinds.contains(&ModifierKind::Sub));
            assert_ne!(pair.left.label, pair.right.label);
            for m in [&pair.left, &pair.right] {
                assert!((10.0..=50.0).contains(&m.operand));
            }
        }
    }

    #[test]
    fn test_hard_level_uses_archetypes() {
        let mut rng = Pcg32::seed_from_u64(3);
        let g = generate(2, &mut rng);
        for pair in &g.pairs()[WARMUP_PAIRS..] {
            let formula = if pair.left.kind == ModifierKind::Add {
                &pair.right
            } else {
                &pair.left
            };
            assert!(matches!(
                formula.kind,
                ModifierKind::Sqrt | ModifierKind::SumDigits | ModifierKind::Mod | ModifierKind::Mul
            ));
        }
    }

    #[test]
    fn test_same_seed_same_gauntlet() {
        let a = generate(1, &mut Pcg32::seed_from_u64(42));
        let b = generate(1, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_always_ten_pairs(seed in any::<u64>(), level in 0u32..20) {
            let g = generate(level, &mut Pcg32::seed_from_u64(seed));
            prop_assert_eq!(g.len(), GAUNTLET_LEN);
            prop_assert_eq!(g.level, level);

            let mut last_lo = 0.0;
            for pair in &g.pairs()[..WARMUP_PAIRS] {
                prop_assert_eq!(pair.left.kind, ModifierKind::Add);
                prop_assert_eq!(pair.right.kind, ModifierKind::Add);
                let (lo, hi) = operands_sorted(pair);
                prop_assert!(lo > last_lo);
                prop_assert!(hi > lo);
                last_lo = lo;
            }
        }

        #[test]
        fn prop_div_operands_safe(seed in any::<u64>(), level in 0u32..20) {
            let g = generate(level, &mut Pcg32::seed_from_u64(seed));
            for pair in g.pairs() {
                for m in [&pair.left, &pair.right] {
                    if m.kind == ModifierKind::Div {
                        prop_assert!(m.operand >= MIN_DIV_OPERAND);
                    }
                }
            }
        }
    }
}
