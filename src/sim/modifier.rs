//! Gate modifiers and the arithmetic they apply to player power

use serde::{Deserialize, Serialize};

/// Smallest divisor a `Div` gate may carry
pub const MIN_DIV_OPERAND: f64 = 2.0;
/// Smallest modulus a `Mod` gate may carry
pub const MIN_MOD_OPERAND: f64 = 1.0;

/// Arithmetic transform a gate applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    Add,
    Sub,
    Mul,
    Div,
    Sqrt,
    SumDigits,
    Mod,
    /// Kind name not understood by this build (e.g. from a newer blueprint file)
    #[serde(other)]
    Unknown,
}

/// A labelled modifier shown on one side of a gate pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub operand: f64,
    pub label: String,
}

impl Modifier {
    pub fn add(v: f64) -> Self {
        Self::with_label(ModifierKind::Add, v, format!("+{v}"))
    }

    pub fn sub(v: f64) -> Self {
        Self::with_label(ModifierKind::Sub, v, format!("-{v}"))
    }

    pub fn mul(v: f64) -> Self {
        Self::with_label(ModifierKind::Mul, v, format!("x{v}"))
    }

    pub fn div(v: f64) -> Self {
        Self::with_label(ModifierKind::Div, v, format!("/{v}"))
    }

    pub fn sqrt() -> Self {
        Self::with_label(ModifierKind::Sqrt, 0.0, "√x".to_string())
    }

    pub fn sum_digits() -> Self {
        Self::with_label(ModifierKind::SumDigits, 0.0, "+ Σx".to_string())
    }

    pub fn modulo(v: f64) -> Self {
        Self::with_label(ModifierKind::Mod, v, format!("+ (x % {v})"))
    }

    fn with_label(kind: ModifierKind, operand: f64, label: String) -> Self {
        Self {
            kind,
            operand,
            label,
        }
    }
}

/// Sum of the decimal digits of `⌊|n|⌋`
pub fn sum_of_digits(n: f64) -> u64 {
    // `as` saturates, so huge powers just sum u64::MAX's digits
    let mut n = n.abs().floor() as u64;
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Round to one decimal place
#[inline]
pub fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Apply `modifier` to `power`
///
/// The result is rounded to one decimal and never lower than `floor`.
/// Unknown kinds leave power untouched.
pub fn apply(power: f64, modifier: &Modifier, floor: f64) -> f64 {
    let v = modifier.operand;
    let next = match modifier.kind {
        ModifierKind::Add => power + v,
        ModifierKind::Sub => power - v,
        ModifierKind::Mul => power * v,
        ModifierKind::Div => {
            if v < MIN_DIV_OPERAND {
                log::warn!("Div operand {v} below {MIN_DIV_OPERAND}, clamping");
            }
            power / v.max(MIN_DIV_OPERAND)
        }
        ModifierKind::Sqrt => power.sqrt(),
        ModifierKind::SumDigits => power + sum_of_digits(power) as f64,
        ModifierKind::Mod => {
            if v < MIN_MOD_OPERAND {
                log::warn!("Mod operand {v} below {MIN_MOD_OPERAND}, clamping");
            }
            power + power.floor() % v.max(MIN_MOD_OPERAND)
        }
        ModifierKind::Unknown => {
            log::warn!("Unknown modifier '{}' ignored", modifier.label);
            return power;
        }
    };

    if next.is_infinite() {
        log::warn!("Modifier '{}' overflowed power {power}", modifier.label);
        return power;
    }

    // NaN falls through `max` to the floor
    round_tenth(next).max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FLOOR: f64 = 1.0;

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(apply(10.0, &Modifier::add(5.0), FLOOR), 15.0);
        assert_eq!(apply(10.0, &Modifier::sub(3.0), FLOOR), 7.0);
        assert_eq!(apply(10.0, &Modifier::mul(2.0), FLOOR), 20.0);
        assert_eq!(apply(10.0, &Modifier::div(4.0), FLOOR), 2.5);
    }

    #[test]
    fn test_sqrt_rounds_to_tenth() {
        assert_eq!(apply(5.0, &Modifier::sqrt(), FLOOR), 2.2);
    }

    #[test]
    fn test_sum_digits() {
        assert_eq!(sum_of_digits(123.0), 6);
        assert_eq!(sum_of_digits(-45.9), 9);
        assert_eq!(apply(123.0, &Modifier::sum_digits(), FLOOR), 129.0);
    }

    #[test]
    fn test_mod_adds_remainder() {
        // 250 % 100 = 50
        assert_eq!(apply(250.7, &Modifier::modulo(100.0), FLOOR), 300.7);
    }

    #[test]
    fn test_sub_clamps_to_floor() {
        assert_eq!(apply(5.0, &Modifier::sub(50.0), FLOOR), FLOOR);
        assert_eq!(apply(5.0, &Modifier::sub(50.0), 0.1), 0.1);
    }

    #[test]
    fn test_div_below_minimum_is_clamped() {
        assert_eq!(apply(10.0, &Modifier::div(0.0), FLOOR), 5.0);
    }

    #[test]
    fn test_unknown_kind_is_identity() {
        let m: Modifier =
            serde_json::from_str(r#"{ "kind": "teleport", "operand": 3.0, "label": "?" }"#)
                .unwrap();
        assert_eq!(m.kind, ModifierKind::Unknown);
        assert_eq!(apply(7.25, &m, FLOOR), 7.25);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Modifier::add(12.0).label, "+12");
        assert_eq!(Modifier::sub(40.0).label, "-40");
        assert_eq!(Modifier::mul(2.0).label, "x2");
        assert_eq!(Modifier::div(5.0).label, "/5");
        assert_eq!(Modifier::modulo(100.0).label, "+ (x % 100)");
    }

    fn any_modifier() -> impl Strategy<Value = Modifier> {
        prop_oneof![
            (1u32..1000).prop_map(|v| Modifier::add(v as f64)),
            (1u32..1000).prop_map(|v| Modifier::sub(v as f64)),
            (2u32..6).prop_map(|v| Modifier::mul(v as f64)),
            (2u32..11).prop_map(|v| Modifier::div(v as f64)),
            Just(Modifier::sqrt()),
            Just(Modifier::sum_digits()),
            (1u32..200).prop_map(|v| Modifier::modulo(v as f64)),
        ]
    }

    proptest! {
        #[test]
        fn prop_never_below_floor(p in 1.0f64..1.0e9, m in any_modifier()) {
            prop_assert!(apply(p, &m, FLOOR) >= FLOOR);
        }

        #[test]
        fn prop_result_is_finite(p in 1.0f64..1.0e9, m in any_modifier()) {
            prop_assert!(apply(p, &m, FLOOR).is_finite());
        }
    }
}
