//! Level tiers derived from a learner's points.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Points per numeric level.
pub const POINTS_PER_LEVEL: u64 = 50;

/// Named tier shown next to the learner's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum LevelTier {
    #[strum(to_string = "শিক্ষানবিশ (Beginner)")]
    Beginner,
    #[strum(to_string = "উদ্যমী (Active)")]
    Active,
    #[strum(to_string = "অভিযাত্রী (Explorer)")]
    Explorer,
    #[strum(to_string = "মাস্টারমাইন্ড (Mastermind)")]
    Mastermind,
    #[strum(to_string = "লেজেন্ডারি ছাত্র (Legendary)")]
    Legendary,
}

impl LevelTier {
    /// Lowest point total that reaches this tier.
    pub fn floor(self) -> u64 {
        match self {
            LevelTier::Beginner => 0,
            LevelTier::Active => 100,
            LevelTier::Explorer => 200,
            LevelTier::Mastermind => 500,
            LevelTier::Legendary => 1000,
        }
    }

    /// Point total the progress bar fills towards.
    pub fn next_threshold(self) -> u64 {
        match self {
            LevelTier::Beginner => 100,
            LevelTier::Active => 200,
            LevelTier::Explorer => 500,
            LevelTier::Mastermind => 1000,
            LevelTier::Legendary => 5000,
        }
    }

    pub fn for_points(points: u64) -> Self {
        match points {
            p if p >= 1000 => LevelTier::Legendary,
            p if p >= 500 => LevelTier::Mastermind,
            p if p >= 200 => LevelTier::Explorer,
            p if p >= 100 => LevelTier::Active,
            _ => LevelTier::Beginner,
        }
    }
}

/// Summary shown on the home and profile screens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelStats {
    pub tier: LevelTier,
    pub level: u64,
    pub next_threshold: u64,
    /// Percent towards `next_threshold`, capped at 100.
    pub progress: f64,
}

impl LevelStats {
    pub fn from_points(points: u64) -> Self {
        let tier = LevelTier::for_points(points);
        let next_threshold = tier.next_threshold();
        let progress = ((points as f64 / next_threshold as f64) * 100.0).min(100.0);
        Self {
            tier,
            level: points / POINTS_PER_LEVEL + 1,
            next_threshold,
            progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(LevelTier::for_points(0), LevelTier::Beginner);
        assert_eq!(LevelTier::for_points(99), LevelTier::Beginner);
        assert_eq!(LevelTier::for_points(100), LevelTier::Active);
        assert_eq!(LevelTier::for_points(499), LevelTier::Explorer);
        assert_eq!(LevelTier::for_points(500), LevelTier::Mastermind);
        assert_eq!(LevelTier::for_points(12_000), LevelTier::Legendary);
    }

    #[test]
    fn test_floors_map_back_to_tier() {
        for tier in LevelTier::iter() {
            assert_eq!(LevelTier::for_points(tier.floor()), tier);
        }
    }

    #[test]
    fn test_stats_progress_and_level() {
        let stats = LevelStats::from_points(150);
        assert_eq!(stats.tier, LevelTier::Active);
        assert_eq!(stats.level, 4);
        assert_eq!(stats.next_threshold, 200);
        assert!((stats.progress - 75.0).abs() < f64::EPSILON);

        let capped = LevelStats::from_points(9_999);
        assert_eq!(capped.progress, 100.0);
    }

    #[test]
    fn test_tier_label() {
        assert!(LevelTier::Explorer.to_string().contains("Explorer"));
    }
}
