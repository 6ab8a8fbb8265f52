//! Gameplay event topics broadcast on the tavern bus.
//!
//! One variant per topic. Phase transitions and presentation cues carry
//! no payload; visitor lifecycle topics carry the [`VisitorId`] they are
//! about. Subscribers match on the variants they care about and ignore
//! the rest.

use serde::{Deserialize, Serialize};

use crate::ids::VisitorId;

/// A single event on the tavern bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TavernEvent {
    /// The tavern heart was repaired; visitor spawning may begin.
    HeartRepaired,
    /// Day phase entered.
    DayStarted,
    /// Night phase entered.
    NightStarted,
    /// Presentation cue: show the day HUD.
    SwitchToDayCanvas,
    /// Presentation cue: show the night HUD.
    SwitchToNightCanvas,
    /// Presentation cue: camera follows the player.
    CameraSwitchToFollowPlayer,
    /// Presentation cue: camera frames the card table.
    CameraSwitchToCardGame,
    /// Presentation cue: deal the night's card hand.
    RenderCards,
    /// A visitor walked out of the tavern.
    VisitorLeftTavern(VisitorId),
    /// A visitor was promoted to the defender roster.
    DefenderAdded(VisitorId),
    /// Snapshot of the defender roster, published once at nightfall.
    DefendersToCards(Vec<VisitorId>),
}
