//! Boss hit points and countdown

use serde::{Deserialize, Serialize};

use super::modifier::round_tenth;

/// Lifecycle of the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BossPhase {
    #[default]
    Inactive,
    Active,
    Won,
    Lost,
}

/// Terminal result of a fight, reported exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossOutcome {
    /// HP reached zero before the countdown
    Won,
    /// Countdown ran out
    Lost,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Boss {
    pub phase: BossPhase,
    pub hp: f64,
    pub max_hp: f64,
    /// Seconds since the fight started
    pub elapsed: f32,
    /// Seconds the player has to win
    pub duration: f32,
}

impl Boss {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, hp: f64, duration: f32) {
        self.max_hp = hp;
        self.hp = hp;
        self.elapsed = 0.0;
        self.duration = duration;
        self.phase = BossPhase::Active;
    }

    pub fn is_active(&self) -> bool {
        self.phase == BossPhase::Active
    }

    /// Apply damage; returns `Won` on the hit that drops hp to zero
    ///
    /// HP is kept to one decimal, like power, so exact kills stay exact.
    pub fn hit(&mut self, damage: f64) -> Option<BossOutcome> {
        if !self.is_active() {
            return None;
        }
        self.hp = round_tenth(self.hp - damage);
        if self.hp <= 0.0 {
            self.phase = BossPhase::Won;
            return Some(BossOutcome::Won);
        }
        None
    }

    /// Advance the countdown; returns `Lost` when it runs out
    pub fn tick(&mut self, dt: f32) -> Option<BossOutcome> {
        if !self.is_active() {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed > self.duration {
            self.phase = BossPhase::Lost;
            return Some(BossOutcome::Lost);
        }
        None
    }

    /// HP for display (never negative, whole points)
    pub fn display_hp(&self) -> f64 {
        self.hp.max(0.0).floor()
    }

    /// Whole seconds left on the countdown
    pub fn time_left(&self) -> f32 {
        (self.duration - self.elapsed).ceil().max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_sets_stats() {
        let mut boss = Boss::new();
        assert_eq!(boss.phase, BossPhase::Inactive);
        boss.start(600.0, 12.0);
        assert!(boss.is_active());
        assert_eq!(boss.hp, 600.0);
        assert_eq!(boss.max_hp, 600.0);
        assert_eq!(boss.time_left(), 12.0);
    }

    #[test]
    fn test_inactive_ignores_hits_and_ticks() {
        let mut boss = Boss::new();
        assert_eq!(boss.hit(10.0), None);
        assert_eq!(boss.tick(100.0), None);
        assert_eq!(boss.phase, BossPhase::Inactive);
    }

    #[test]
    fn test_win_is_one_shot() {
        let mut boss = Boss::new();
        boss.start(10.0, 5.0);
        assert_eq!(boss.hit(4.0), None);
        assert_eq!(boss.hit(7.0), Some(BossOutcome::Won));
        assert_eq!(boss.hp, -1.0);
        assert_eq!(boss.display_hp(), 0.0);
        assert_eq!(boss.hit(7.0), None);
        assert_eq!(boss.tick(10.0), None);
        assert_eq!(boss.phase, BossPhase::Won);
    }

    #[test]
    fn test_timeout_is_one_shot() {
        let mut boss = Boss::new();
        boss.start(100.0, 1.0);
        assert_eq!(boss.tick(0.5), None);
        assert_eq!(boss.tick(0.6), Some(BossOutcome::Lost));
        assert_eq!(boss.tick(0.6), None);
        assert_eq!(boss.hit(1000.0), None);
        assert_eq!(boss.hp, 100.0);
    }

    #[test]
    fn test_tenth_hits_land_exactly_on_zero() {
        let mut boss = Boss::new();
        boss.start(6.0, 100.0);
        for _ in 0..59 {
            assert_eq!(boss.hit(0.1), None);
        }
        assert_eq!(boss.hp, 0.1);
        assert_eq!(boss.hit(0.1), Some(BossOutcome::Won));
        assert_eq!(boss.hp, 0.0);
    }

    #[test]
    fn test_hp_never_increases_while_active() {
        let mut boss = Boss::new();
        boss.start(50.0, 10.0);
        let mut last = boss.hp;
        for _ in 0..20 {
            boss.hit(3.0);
            boss.tick(0.1);
            assert!(boss.hp <= last);
            last = boss.hp;
        }
    }
}
