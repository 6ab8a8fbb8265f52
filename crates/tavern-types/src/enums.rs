//! Enumeration types for the Tavern runtime.

use serde::{Deserialize, Serialize};

/// The coarse game phase driven by the phase scheduler.
///
/// Exactly one phase is current at a time. The runtime boots in
/// [`Phase::Start`], is driven to [`Phase::Day`] at startup, and the day
/// timer carries it to [`Phase::Night`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Pre-game state before the first dawn.
    Start,
    /// Daylight: the tavern is open and visitors arrive.
    Day,
    /// Nightfall: visitors are reclaimed and the card game begins.
    Night,
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Day => "day",
            Self::Night => "night",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn phases_are_ordered_start_day_night() {
        assert!(Phase::Start < Phase::Day);
        assert!(Phase::Day < Phase::Night);
    }

    #[test]
    fn phase_serde_round_trip() {
        let json = serde_json::to_string(&Phase::Night).unwrap();
        let back: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Phase::Night);
    }
}
