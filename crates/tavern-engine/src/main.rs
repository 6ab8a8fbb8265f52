//! Engine binary for the Tavern simulation.
//!
//! This is the main entry point that wires together the event bus, the
//! seating registry, the visitor scheduler, the environment controller,
//! and the phase scheduler, then runs one full in-game day.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `tavern-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the event bus and subscribe the consumers
//! 4. Build the floor plan, seating registry, and schedulers
//! 5. Spawn the consumer tasks and the scripted heart repair
//! 6. Run one day/night cycle
//! 7. Shut the tasks down and log the end-of-day summary

mod error;

use std::path::Path;
use std::time::Duration;

use tavern_core::config::TavernConfig;
use tavern_core::environment::EnvironmentController;
use tavern_core::events::EventBus;
use tavern_core::phase::PhaseScheduler;
use tavern_core::seating::{SeatingRegistry, default_floor_plan};
use tavern_core::visitors::VisitorScheduler;
use tavern_types::TavernEvent;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Config file looked up relative to the working directory.
const CONFIG_FILE: &str = "tavern-config.yaml";

/// How long after dawn the scripted player repairs the heart.
const HEART_REPAIR_DELAY: Duration = Duration::from_secs(1);

/// Application entry point for the Tavern engine.
///
/// Wires all subsystems together and runs one day/night cycle.
///
/// # Errors
///
/// Returns an error if configuration, wiring, or the cycle itself fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config_path = Path::new(CONFIG_FILE);
    let config_found = config_path.exists();
    let config = if config_found {
        TavernConfig::from_file(config_path)?
    } else {
        TavernConfig::default()
    };

    // 2. Initialize structured logging. RUST_LOG overrides the
    //    configured default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("tavern-engine starting");
    if config_found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }
    info!(
        seed = config.game.seed,
        seconds_to_night_starts = config.game.seconds_to_night_starts,
        max_visitors = config.game.max_visitors,
        spawn_delay_min = config.game.visitors_spawn_delay_min,
        spawn_delay_max = config.game.visitors_spawn_delay_max,
        "Game configuration"
    );

    // 3. Build the event bus. Consumers subscribe before anything
    //    publishes, so no event is missed.
    let bus = EventBus::new();
    let visitor_events = bus.subscribe();
    let environment_events = bus.subscribe();

    // 4. Build the floor and the schedulers. Visitor scheduler
    //    construction validates the spawn-delay window and fails fast.
    let plan = default_floor_plan();
    let seating = SeatingRegistry::new(&plan.seat_positions);
    info!(
        seats = seating.seat_count(),
        spawn_point = %plan.spawn_point,
        "Floor plan ready"
    );

    let visitors = VisitorScheduler::new(bus.clone(), seating, plan.spawn_point, &config.game)?;
    let environment = EnvironmentController::new();

    // 5. Spawn the consumer tasks and the scripted heart repair.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let visitors_task = tokio::spawn(visitors.run(visitor_events, shutdown_rx.clone()));
    let environment_task = tokio::spawn(environment.run(environment_events, shutdown_rx));

    let repair_bus = bus.clone();
    tokio::spawn(async move {
        tokio::time::sleep(HEART_REPAIR_DELAY).await;
        let subscribers = repair_bus.publish(&TavernEvent::HeartRepaired);
        info!(subscribers, "Heart repaired, the tavern is open");
    });

    // 6. Run one full day.
    let mut phases = PhaseScheduler::new(bus, &config.game);
    phases.run_cycle().await?;

    // 7. Shut down and report.
    let _ = shutdown_tx.send(true);
    let visitors = visitors_task.await?;
    let environment = environment_task.await?;

    info!(
        phase = %phases.phase(),
        visitors_hosted = visitors.pool().created(),
        active_visitors = visitors.active_count(),
        free_seats = visitors.seating().free_count(),
        defenders = visitors.defender_count(),
        scenery_visible = environment.scenery_visible(),
        "tavern-engine shutdown complete"
    );

    Ok(())
}
