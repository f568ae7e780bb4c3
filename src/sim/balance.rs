//! Boss difficulty from the player's choices
//!
//! A flawless gauntlet always yields the base fight length; each bad choice
//! stretches the fight and scales the boss's HP with it, so difficulty
//! follows agency rather than raw power.

use serde::{Deserialize, Serialize};

use super::power::ChoiceQuality;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossStats {
    pub hp: f64,
    /// Seconds
    pub duration: f64,
    pub mistakes: u32,
}

pub fn count_mistakes(history: &[ChoiceQuality]) -> u32 {
    history
        .iter()
        .filter(|&&q| q == ChoiceQuality::Bad)
        .count() as u32
}

/// `duration = base + mistakes × penalty`,
/// `hp = round(max(1, power) × dps × duration)`
pub fn boss_stats(power: f64, mistakes: u32, tuning: &Tuning) -> BossStats {
    let duration = tuning.boss_base_duration + mistakes as f64 * tuning.boss_mistake_penalty;
    let hp = (power.max(1.0) * tuning.boss_assumed_dps * duration).round();
    BossStats {
        hp,
        duration,
        mistakes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ChoiceQuality::{Bad, Good};

    #[test]
    fn test_reference_numbers() {
        let stats = boss_stats(10.0, 2, &Tuning::default());
        assert_eq!(stats.duration, 12.0);
        assert_eq!(stats.hp, 600.0);
    }

    #[test]
    fn test_flawless_run_gets_base_duration() {
        let stats = boss_stats(1234.5, 0, &Tuning::default());
        assert_eq!(stats.duration, 4.0);
        assert_eq!(stats.hp, (1234.5f64 * 5.0 * 4.0).round());
    }

    #[test]
    fn test_power_below_one_is_lifted() {
        let stats = boss_stats(0.3, 0, &Tuning::default());
        assert_eq!(stats.hp, 20.0);
    }

    #[test]
    fn test_count_mistakes() {
        assert_eq!(count_mistakes(&[]), 0);
        assert_eq!(count_mistakes(&[Good, Bad, Good, Bad, Bad]), 3);
    }
}
