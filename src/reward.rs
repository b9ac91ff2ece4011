//! Reward tiers derived from the found count.
//!
//! Everything here is a pure function of `(found, total)`: no storage, no
//! stored state. [`CelebrationLatch`] is the exception that proves the rule. It
//! belongs to the caller, which keeps one per screen and resets it alongside
//! [`LocationStore::reset_all`](crate::location_store::LocationStore::reset_all).

use serde::{Deserialize, Serialize};

/// Found count at which the mid tier unlocks.
pub const MID_TIER_THRESHOLD: usize = 5;

pub const COMPLETION_MESSAGE: &str =
    "You've earned a 10% discount and an entry to the weekend getaway!";
pub const MID_TIER_MESSAGE: &str = "You've earned a 10% discount!";
pub const BASELINE_MESSAGE: &str = "Find more locations to earn rewards!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RewardTier {
    Baseline,
    Mid,
    Completion,
}

impl RewardTier {
    pub fn message(self) -> &'static str {
        match self {
            RewardTier::Baseline => BASELINE_MESSAGE,
            RewardTier::Mid => MID_TIER_MESSAGE,
            RewardTier::Completion => COMPLETION_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardMessage {
    pub tier: RewardTier,
    pub message: String,
}

impl From<RewardTier> for RewardMessage {
    fn from(tier: RewardTier) -> Self {
        RewardMessage { tier, message: tier.message().to_string() }
    }
}

/// True once every location of a non-empty catalog is found.
pub fn is_complete(found: usize, total: usize) -> bool {
    total > 0 && found == total
}

/// Picks the reward tier. Completion wins over the mid tier, and an empty
/// catalog never counts as complete.
///
/// ```rust
/// use treasure_hunt_core::reward::{compute_reward, RewardTier};
///
/// assert_eq!(compute_reward(0, 10).tier, RewardTier::Baseline);
/// assert_eq!(compute_reward(5, 10).tier, RewardTier::Mid);
/// assert_eq!(compute_reward(10, 10).tier, RewardTier::Completion);
/// assert_eq!(compute_reward(0, 0).tier, RewardTier::Baseline);
/// ```
pub fn compute_reward(found: usize, total: usize) -> RewardMessage {
    let tier = if is_complete(found, total) {
        RewardTier::Completion
    } else if found >= MID_TIER_THRESHOLD {
        RewardTier::Mid
    } else {
        RewardTier::Baseline
    };

    tier.into()
}

/// Snapshot of the hunt for the screen header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HuntProgress {
    pub found: usize,
    pub total: usize,
    pub reward: RewardMessage,
    pub complete: bool,
}

impl HuntProgress {
    pub fn new(found: usize, total: usize) -> Self {
        HuntProgress {
            found,
            total,
            reward: compute_reward(found, total),
            complete: is_complete(found, total),
        }
    }

    pub fn label(&self) -> String {
        format!("Found: {} / {}", self.found, self.total)
    }
}

/// Fires once when the hunt becomes complete, not on every observation.
///
/// The latch stays set while the hunt remains complete. Call [`reset`](Self::reset)
/// after resetting the store so the next completion fires again.
#[derive(Debug, Default, Clone)]
pub struct CelebrationLatch {
    fired: bool,
}

impl CelebrationLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly when the celebration should start.
    pub fn observe(&mut self, found: usize, total: usize) -> bool {
        if self.fired || !is_complete(found, total) {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn reset(&mut self) {
        self.fired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(compute_reward(4, 10).tier, RewardTier::Baseline);
        assert_eq!(compute_reward(5, 10).tier, RewardTier::Mid);
        assert_eq!(compute_reward(9, 10).tier, RewardTier::Mid);
        assert_eq!(compute_reward(10, 10).tier, RewardTier::Completion);
    }

    #[test]
    fn test_completion_beats_mid_tier_on_small_catalogs() {
        // Fewer locations than the mid threshold still complete.
        assert_eq!(compute_reward(3, 3).tier, RewardTier::Completion);
        assert_eq!(compute_reward(2, 3).tier, RewardTier::Baseline);
    }

    #[test]
    fn test_empty_catalog_is_never_complete() {
        assert!(!is_complete(0, 0));
        assert_eq!(compute_reward(0, 0).message, BASELINE_MESSAGE);
    }

    #[test]
    fn test_messages_match_tiers() {
        assert_eq!(compute_reward(0, 10).message, BASELINE_MESSAGE);
        assert_eq!(compute_reward(5, 10).message, MID_TIER_MESSAGE);
        assert_eq!(compute_reward(10, 10).message, COMPLETION_MESSAGE);
    }

    #[test]
    fn test_progress_label() {
        let progress = HuntProgress::new(3, 10);
        assert_eq!(progress.label(), "Found: 3 / 10");
        assert!(!progress.complete);
        assert_eq!(progress.reward.tier, RewardTier::Baseline);
    }

    #[test]
    fn test_latch_fires_once_per_completion() {
        let mut latch = CelebrationLatch::new();

        assert!(!latch.observe(9, 10));
        assert!(latch.observe(10, 10));
        assert!(!latch.observe(10, 10), "re-render must not fire again");
        assert!(latch.has_fired());

        latch.reset();
        assert!(!latch.observe(0, 10));
        assert!(latch.observe(10, 10));
    }

    #[test]
    fn test_latch_ignores_empty_catalog() {
        let mut latch = CelebrationLatch::new();
        assert!(!latch.observe(0, 0));
        assert!(!latch.has_fired());
    }

    #[test]
    fn test_reward_serializes_camel_case() {
        let json = serde_json::to_string(&HuntProgress::new(10, 10)).unwrap();
        assert!(json.contains(r#""tier":"completion""#));
        assert!(json.contains(r#""complete":true"#));
    }
}
