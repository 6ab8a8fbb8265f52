//! Coarse scene visibility driven by phase events.
//!
//! [`EnvironmentController`] mirrors the floor's scene split: scenery,
//! interactables, and the player rig. Day shows all three groups, the
//! night canvas hides all three. It subscribes like any other bus
//! consumer and keeps no other state.

use tavern_types::TavernEvent;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

/// Visibility switchboard for the three scene object groups.
#[derive(Debug, Clone)]
pub struct EnvironmentController {
    scenery: bool,
    interactables: bool,
    player: bool,
}

impl Default for EnvironmentController {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentController {
    /// Controller with every group visible, matching a freshly lit scene.
    pub const fn new() -> Self {
        Self {
            scenery: true,
            interactables: true,
            player: true,
        }
    }

    /// Apply one bus event to the visibility state.
    pub fn handle_event(&mut self, event: &TavernEvent) {
        match event {
            TavernEvent::DayStarted => self.set_all(true),
            TavernEvent::SwitchToNightCanvas => self.set_all(false),
            _ => {}
        }
    }

    /// Whether the scenery group is shown.
    pub const fn scenery_visible(&self) -> bool {
        self.scenery
    }

    /// Whether the interactable props are shown.
    pub const fn interactables_visible(&self) -> bool {
        self.interactables
    }

    /// Whether the player rig is shown.
    pub const fn player_visible(&self) -> bool {
        self.player
    }

    /// Drive the controller until the bus closes or `shutdown` flips.
    ///
    /// Returns the controller so the final visibility can be inspected.
    pub async fn run(
        mut self,
        mut events: broadcast::Receiver<TavernEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Self {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Ok(event) => self.handle_event(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Environment controller lagged behind the bus");
                    }
                    Err(RecvError::Closed) => break,
                },
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!(
            scenery = self.scenery,
            interactables = self.interactables,
            player = self.player,
            "Environment controller stopped"
        );
        self
    }

    fn set_all(&mut self, visible: bool) {
        self.scenery = visible;
        self.interactables = visible;
        self.player = visible;
        debug!(visible, "Environment visibility set");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::events::EventBus;

    #[test]
    fn starts_fully_visible() {
        let controller = EnvironmentController::new();
        assert!(controller.scenery_visible());
        assert!(controller.interactables_visible());
        assert!(controller.player_visible());
    }

    #[test]
    fn night_canvas_hides_every_group() {
        let mut controller = EnvironmentController::new();
        controller.handle_event(&TavernEvent::SwitchToNightCanvas);
        assert!(!controller.scenery_visible());
        assert!(!controller.interactables_visible());
        assert!(!controller.player_visible());
    }

    #[test]
    fn day_reshows_after_night() {
        let mut controller = EnvironmentController::new();
        controller.handle_event(&TavernEvent::SwitchToNightCanvas);
        controller.handle_event(&TavernEvent::DayStarted);
        assert!(controller.scenery_visible());
        assert!(controller.interactables_visible());
        assert!(controller.player_visible());
    }

    #[test]
    fn unrelated_events_leave_visibility_alone() {
        let mut controller = EnvironmentController::new();
        controller.handle_event(&TavernEvent::NightStarted);
        controller.handle_event(&TavernEvent::HeartRepaired);
        controller.handle_event(&TavernEvent::RenderCards);
        assert!(controller.scenery_visible());
        assert!(controller.player_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn run_applies_events_from_the_bus() {
        let bus = EventBus::new();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let events = bus.subscribe();
        let task = tokio::spawn(EnvironmentController::new().run(events, shutdown_rx));

        bus.publish(&TavernEvent::SwitchToNightCanvas);
        tokio::time::sleep(Duration::from_millis(1)).await;

        shutdown_tx.send(true).unwrap();
        let controller = task.await.unwrap();
        assert!(!controller.scenery_visible());
        assert!(!controller.interactables_visible());
        assert!(!controller.player_visible());
    }
}
