//! Percentage milestones reached or lost between two goal snapshots

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed completion thresholds surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Milestone {
    Quarter,
    Half,
    ThreeQuarters,
    Ninety,
    Complete,
}

impl Milestone {
    /// All milestones in ascending order
    pub const ALL: [Milestone; 5] = [
        Milestone::Quarter,
        Milestone::Half,
        Milestone::ThreeQuarters,
        Milestone::Ninety,
        Milestone::Complete,
    ];

    pub fn percent(&self) -> u8 {
        match self {
            Self::Quarter => 25,
            Self::Half => 50,
            Self::ThreeQuarters => 75,
            Self::Ninety => 90,
            Self::Complete => 100,
        }
    }
}

impl From<Milestone> for u8 {
    fn from(m: Milestone) -> u8 {
        m.percent()
    }
}

impl TryFrom<u8> for Milestone {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Milestone::ALL
            .into_iter()
            .find(|m| m.percent() == value)
            .ok_or_else(|| format!("{} is not a milestone percentage", value))
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossingDirection {
    /// Reached by a deposit
    Up,
    /// Dropped below by a withdrawal
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MilestoneCrossing {
    pub milestone: Milestone,
    pub direction: CrossingDirection,
}

/// Milestones crossed when progress moves from `before` to `after` percent
///
/// Upward crossings satisfy `before < m <= after`, downward ones
/// `after < m <= before`. Each milestone appears at most once, in the order
/// it was passed.
pub fn crossed_between(before: f64, after: f64) -> Vec<MilestoneCrossing> {
    if after > before {
        Milestone::ALL
            .into_iter()
            .filter(|m| {
                let p = f64::from(m.percent());
                before < p && p <= after
            })
            .map(|milestone| MilestoneCrossing {
                milestone,
                direction: CrossingDirection::Up,
            })
            .collect()
    } else if after < before {
        Milestone::ALL
            .into_iter()
            .rev()
            .filter(|m| {
                let p = f64::from(m.percent());
                after < p && p <= before
            })
            .map(|milestone| MilestoneCrossing {
                milestone,
                direction: CrossingDirection::Down,
            })
            .collect()
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reached(before: f64, after: f64) -> Vec<u8> {
        crossed_between(before, after)
            .into_iter()
            .map(|c| {
                assert_eq!(c.direction, CrossingDirection::Up);
                c.milestone.percent()
            })
            .collect()
    }

    #[test]
    fn test_single_crossing() {
        assert_eq!(reached(48.0, 52.0), vec![50]);
    }

    #[test]
    fn test_landing_exactly_on_milestone_counts_once() {
        assert_eq!(reached(40.0, 50.0), vec![50]);
        // Starting on the milestone means it was already reached
        assert!(reached(50.0, 60.0).is_empty());
    }

    #[test]
    fn test_multiple_crossings_in_order() {
        assert_eq!(reached(0.0, 100.0), vec![25, 50, 75, 90, 100]);
        assert_eq!(reached(80.0, 100.0), vec![90, 100]);
    }

    #[test]
    fn test_no_movement() {
        assert!(crossed_between(33.0, 33.0).is_empty());
    }

    #[test]
    fn test_downward_crossings() {
        let lost = crossed_between(92.0, 40.0);
        let percents: Vec<u8> = lost.iter().map(|c| c.milestone.percent()).collect();
        assert_eq!(percents, vec![90, 75, 50]);
        assert!(lost.iter().all(|c| c.direction == CrossingDirection::Down));
    }

    #[test]
    fn test_milestone_serializes_as_percent() {
        assert_eq!(serde_json::to_string(&Milestone::Half).unwrap(), "50");
        let m: Milestone = serde_json::from_str("90").unwrap();
        assert_eq!(m, Milestone::Ninety);
        assert!(serde_json::from_str::<Milestone>("60").is_err());
    }
}
