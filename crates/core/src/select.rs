//! Ranking and tiered selection of image candidates.
//!
//! Candidates are ordered by aspect band first and area second, then a single
//! pass over that order accepts candidates against a [`TierTable`]. Large
//! tiers carry small quotas, so a page with a couple of big images yields a
//! short list, while a page of small images still yields up to
//! [`TierTable::max_images`] results.
//!
//! # Example
//!
//! ```rust
//! use thumbscout_core::{AspectBand, ImageCandidate, TierTable, select};
//!
//! let band = AspectBand::default();
//! let candidates = vec![
//!     ImageCandidate::new("http://a.com/big.jpg", 90_000, 500, 300, &band).unwrap(),
//!     ImageCandidate::new("http://a.com/huge.jpg", 90_000, 500, 400, &band).unwrap(),
//! ];
//!
//! assert_eq!(select(&candidates, &TierTable::default()), vec!["http://a.com/huge.jpg"]);
//! ```

use std::cmp::Ordering;

use crate::candidate::ImageCandidate;
use crate::{Result, ThumbscoutError};

/// An area threshold and the number of selections it allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub area_threshold: u64,
    pub quota: usize,
}

impl Tier {
    pub const fn new(area_threshold: u64, quota: usize) -> Self {
        Self { area_threshold, quota }
    }
}

const DEFAULT_TIERS: [Tier; 4] = [
    Tier::new(100_000, 1),
    Tier::new(50_000, 3),
    Tier::new(20_000, 4),
    Tier::new(5_000, 8),
];

/// Tiers ordered from the largest threshold to the smallest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl Default for TierTable {
    fn default() -> Self {
        Self { tiers: DEFAULT_TIERS.to_vec() }
    }
}

impl TierTable {
    /// Builds a table, checking its ordering invariants.
    ///
    /// Thresholds must be strictly decreasing and quotas non-decreasing
    /// and non-zero.
    pub fn new(tiers: Vec<Tier>) -> Result<Self> {
        let table = Self { tiers };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(ThumbscoutError::ConfigError("tier table is empty".to_string()));
        }

        if self.tiers.iter().any(|t| t.quota == 0) {
            return Err(ThumbscoutError::ConfigError("tier quotas must be positive".to_string()));
        }

        for pair in self.tiers.windows(2) {
            let (upper, lower) = (pair[0], pair[1]);
            if lower.area_threshold >= upper.area_threshold {
                return Err(ThumbscoutError::ConfigError(format!(
                    "tier thresholds must strictly decrease ({} then {})",
                    upper.area_threshold, lower.area_threshold
                )));
            }
            if lower.quota < upper.quota {
                return Err(ThumbscoutError::ConfigError(format!(
                    "tier quotas must not decrease ({} then {})",
                    upper.quota, lower.quota
                )));
            }
        }

        Ok(())
    }

    /// The hard cap on selected thumbnails: the last tier's quota.
    pub fn max_images(&self) -> usize {
        self.tiers.last().map_or(0, |t| t.quota)
    }

    /// First tier, in declared order, whose threshold `area` meets.
    pub fn tier_for(&self, area: u64) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.area_threshold <= area)
    }
}

/// Orders two candidates: in-band first, then larger area first.
pub fn compare(a: &ImageCandidate, b: &ImageCandidate) -> Ordering {
    if a.in_aspect_band != b.in_aspect_band {
        return if a.in_aspect_band { Ordering::Less } else { Ordering::Greater };
    }
    b.area.cmp(&a.area)
}

/// Sorts candidates best-first. The sort is stable, so equal candidates
/// keep their incoming order.
pub fn rank(candidates: &mut [ImageCandidate]) {
    candidates.sort_by(compare);
}

/// Picks thumbnail URLs from candidates with one pass over their ranking.
///
/// Each candidate is matched against the first tier it qualifies for and
/// skipped if it qualifies for none. Once the running count reaches the
/// matched tier's quota the whole pass stops, even if later candidates
/// would fit a less selective tier.
pub fn select(candidates: &[ImageCandidate], tiers: &TierTable) -> Vec<String> {
    let mut ranked = candidates.to_vec();
    rank(&mut ranked);

    let mut selected = Vec::new();

    for candidate in &ranked {
        let Some(tier) = tiers.tier_for(candidate.area) else {
            continue;
        };

        selected.push(candidate.source_url.clone());

        if selected.len() >= tier.quota {
            break;
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::AspectBand;

    fn candidate(url: &str, width: u32, height: u32) -> ImageCandidate {
        ImageCandidate::new(url, 10_000, width, height, &AspectBand::default()).unwrap()
    }

    #[test]
    fn test_default_table_is_valid() {
        let table = TierTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.max_images(), 8);
        assert_eq!(table.tier_for(5_000), Some(&Tier::new(5_000, 8)));
    }

    #[test]
    fn test_invalid_tables() {
        assert!(TierTable::new(vec![]).is_err());
        assert!(TierTable::new(vec![Tier::new(100, 1), Tier::new(100, 2)]).is_err());
        assert!(TierTable::new(vec![Tier::new(100, 3), Tier::new(50, 2)]).is_err());
        assert!(TierTable::new(vec![Tier::new(100, 0)]).is_err());
        assert!(TierTable::new(vec![Tier::new(100, 1), Tier::new(50, 1)]).is_ok());
    }

    #[test]
    fn test_tier_for() {
        let table = TierTable::default();
        assert_eq!(table.tier_for(150_000).unwrap().quota, 1);
        assert_eq!(table.tier_for(100_000).unwrap().quota, 1);
        assert_eq!(table.tier_for(99_999).unwrap().quota, 3);
        assert_eq!(table.tier_for(20_000).unwrap().quota, 4);
        assert_eq!(table.tier_for(5_000).unwrap().quota, 8);
        assert!(table.tier_for(4_999).is_none());
    }

    #[test]
    fn test_aspect_band_beats_area() {
        // 1000x100 is far out of band but much larger
        let wide = candidate("wide", 1000, 100);
        let square = candidate("square", 80, 80);
        assert!(!wide.in_aspect_band);
        assert!(square.in_aspect_band);

        let mut ranked = vec![wide, square];
        rank(&mut ranked);
        assert_eq!(ranked[0].source_url, "square");
        assert_eq!(ranked[1].source_url, "wide");
    }

    #[test]
    fn test_area_breaks_ties_and_sort_is_stable() {
        let mut ranked = vec![
            candidate("small", 100, 100),
            candidate("first-big", 300, 300),
            candidate("second-big", 300, 300),
        ];
        rank(&mut ranked);

        let order: Vec<_> = ranked.iter().map(|c| c.source_url.as_str()).collect();
        assert_eq!(order, vec!["first-big", "second-big", "small"]);
    }

    #[test]
    fn test_early_stop_on_large_tier() {
        let candidates = vec![candidate("b", 400, 300), candidate("a", 500, 300)];
        assert_eq!(candidates[0].area, 120_000);
        assert_eq!(candidates[1].area, 150_000);

        assert_eq!(select(&candidates, &TierTable::default()), vec!["a"]);
    }

    #[test]
    fn test_graceful_degradation_small_images() {
        let candidates: Vec<_> = (0..8).map(|i| candidate(&format!("img{}", i), 100, 60)).collect();
        assert!(candidates.iter().all(|c| c.area == 6_000 && c.in_aspect_band));

        let selected = select(&candidates, &TierTable::default());
        assert_eq!(selected.len(), 8);
        assert_eq!(selected[0], "img0");
        assert_eq!(selected[7], "img7");
    }

    #[test]
    fn test_never_exceeds_max_images() {
        let candidates: Vec<_> = (0..20).map(|i| candidate(&format!("img{}", i), 100, 60)).collect();
        assert_eq!(select(&candidates, &TierTable::default()).len(), 8);
    }

    #[test]
    fn test_below_smallest_threshold_never_selected() {
        let candidates = vec![candidate("tiny", 60, 60), candidate("ok", 80, 80)];
        assert_eq!(select(&candidates, &TierTable::default()), vec!["ok"]);

        let only_tiny = vec![candidate("tiny", 10, 10)];
        assert!(select(&only_tiny, &TierTable::default()).is_empty());
    }

    #[test]
    fn test_mid_tier_quota() {
        // three 60k images fill the 50k tier's quota of 3
        let candidates = vec![
            candidate("a", 300, 200),
            candidate("b", 300, 200),
            candidate("c", 300, 200),
            candidate("d", 300, 200),
            candidate("e", 100, 100),
        ];
        assert_eq!(select(&candidates, &TierTable::default()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quota_checked_against_matched_tier_only() {
        // 60k counts 1 (<3), then 25k counts 2 (<4), 6k counts 3 (<8), ...
        let candidates = vec![
            candidate("60k", 300, 200),
            candidate("25k", 250, 100),
            candidate("6k-a", 100, 60),
            candidate("6k-b", 100, 60),
        ];
        assert!(!candidates[1].in_aspect_band);

        let selected = select(&candidates, &TierTable::default());
        assert_eq!(selected, vec!["60k", "6k-a", "6k-b", "25k"]);
    }

    #[test]
    fn test_stops_when_lower_route_reaches_higher_quota() {
        // the 4th pick lands in the 20k tier whose quota is 4: the pass ends
        // even though an 8-quota tier candidate is still pending
        let candidates = vec![
            candidate("a", 300, 200),
            candidate("b", 200, 150),
            candidate("c", 200, 150),
            candidate("d", 200, 150),
            candidate("e", 100, 60),
        ];

        let selected = select(&candidates, &TierTable::default());
        assert_eq!(selected, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(select(&[], &TierTable::default()).is_empty());
    }
}
