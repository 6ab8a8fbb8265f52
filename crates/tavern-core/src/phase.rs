//! Day/night phase scheduling.
//!
//! One [`PhaseScheduler`] owns the current [`Phase`] and the day timer.
//! Transitions publish their entry events synchronously on the bus; the
//! timed sequence (day timer, nightfall countdown) runs in
//! [`PhaseScheduler::run_cycle`], which holds `&mut self` for the whole
//! cycle, so a second overlapping cycle cannot exist. Entering the
//! phase that is already current is rejected rather than replayed.

use std::time::Duration;

use tavern_types::{Phase, TavernEvent};
use thiserror::Error;
use tokio::time::sleep;
use tracing::info;

use crate::config::GameConfig;
use crate::events::EventBus;

/// Length of the nightfall countdown, in one-second ticks.
pub const NIGHT_COUNTDOWN_SECONDS: u64 = 6;

/// Countdown ticks remaining when the night HUD switches on.
const NIGHT_CANVAS_AT_REMAINING: u64 = 3;

/// Countdown ticks remaining when the card hand is dealt.
const RENDER_CARDS_AT_REMAINING: u64 = 2;

/// Errors from phase transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhaseError {
    /// Transition into the phase that is already current.
    #[error("already in phase {phase}")]
    AlreadyInPhase {
        /// The current phase.
        phase: Phase,
    },
}

/// Owns the current game phase and drives the day/night cycle.
#[derive(Debug)]
pub struct PhaseScheduler {
    bus: EventBus,
    current: Phase,
    seconds_to_night: u64,
}

impl PhaseScheduler {
    /// Create a scheduler in [`Phase::Start`].
    ///
    /// The day length is captured from `config` once; later config
    /// changes never affect a running cycle.
    pub fn new(bus: EventBus, config: &GameConfig) -> Self {
        Self {
            bus,
            current: Phase::Start,
            seconds_to_night: config.seconds_to_night_starts,
        }
    }

    /// The current phase.
    pub const fn phase(&self) -> Phase {
        self.current
    }

    /// Transition to `next` and publish its entry events synchronously.
    ///
    /// Entry events, in order: [`Phase::Day`] publishes `DayStarted`,
    /// `CameraSwitchToFollowPlayer`, `SwitchToDayCanvas`;
    /// [`Phase::Night`] publishes `NightStarted`; [`Phase::Start`]
    /// publishes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::AlreadyInPhase`] when `next` is already the
    /// current phase.
    pub fn set_phase(&mut self, next: Phase) -> Result<(), PhaseError> {
        if next == self.current {
            return Err(PhaseError::AlreadyInPhase { phase: next });
        }
        self.current = next;
        info!(phase = %next, "Phase entered");
        match next {
            Phase::Start => {}
            Phase::Day => {
                self.bus.publish(&TavernEvent::DayStarted);
                self.bus.publish(&TavernEvent::CameraSwitchToFollowPlayer);
                self.bus.publish(&TavernEvent::SwitchToDayCanvas);
            }
            Phase::Night => {
                self.bus.publish(&TavernEvent::NightStarted);
            }
        }
        Ok(())
    }

    /// Run one full day: enter [`Phase::Day`], wait out the day length,
    /// enter [`Phase::Night`], then run the nightfall countdown.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::AlreadyInPhase`] when the scheduler is
    /// already in [`Phase::Day`].
    pub async fn run_cycle(&mut self) -> Result<(), PhaseError> {
        self.set_phase(Phase::Day)?;
        sleep(Duration::from_secs(self.seconds_to_night)).await;
        self.set_phase(Phase::Night)?;
        self.run_night_countdown().await;
        Ok(())
    }

    /// The nightfall countdown: camera cue immediately, night HUD with
    /// three ticks remaining, card render with two, silent to zero.
    async fn run_night_countdown(&self) {
        self.bus.publish(&TavernEvent::CameraSwitchToCardGame);
        let mut remaining = NIGHT_COUNTDOWN_SECONDS;
        while remaining > 0 {
            sleep(Duration::from_secs(1)).await;
            remaining = remaining.saturating_sub(1);
            if remaining == NIGHT_CANVAS_AT_REMAINING {
                self.bus.publish(&TavernEvent::SwitchToNightCanvas);
            }
            if remaining == RENDER_CARDS_AT_REMAINING {
                self.bus.publish(&TavernEvent::RenderCards);
            }
        }
        info!("Night countdown complete");
    }
}
