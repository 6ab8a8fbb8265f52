//! Visitor spawning, seating, and the nightly reclamation.
//!
//! [`VisitorScheduler`] owns the seating registry, the visitor pool, the
//! active roster, and the defender roster. The synchronous core
//! ([`handle_event`], [`try_spawn_visitor`]) is directly unit-testable;
//! [`run`] wraps it in a single select loop that owns both the bus
//! subscription and the spawn cadence timer, so event handling and spawn
//! attempts never interleave and nightfall cancels the cadence before
//! anything else happens.
//!
//! [`handle_event`]: VisitorScheduler::handle_event
//! [`try_spawn_visitor`]: VisitorScheduler::try_spawn_visitor
//! [`run`]: VisitorScheduler::run

use std::collections::BTreeMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tavern_types::{GridPos, SeatId, TavernEvent, Visitor, VisitorId};
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::events::EventBus;
use crate::pool::{ObjectPool, PoolHandle, PoolLifecycle};
use crate::seating::SeatingRegistry;

/// Hit points a visitor spawns with.
pub const VISITOR_STARTING_HEALTH: u32 = 10;

/// Attack strength a visitor spawns with.
pub const VISITOR_STARTING_DAMAGE: u32 = 1;

/// Errors from visitor scheduler construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VisitorError {
    /// The configured spawn-delay window is empty.
    #[error("spawn delay window is empty: min {min} must be below max {max} (exclusive)")]
    InvalidSpawnDelay {
        /// Configured lower bound, seconds.
        min: u64,
        /// Configured upper bound, seconds.
        max: u64,
    },
}

// ---------------------------------------------------------------------------
// Pool lifecycle
// ---------------------------------------------------------------------------

/// Pool lifecycle for visitors.
///
/// Instances are created parked at the door, reset and activated on
/// acquire, deactivated on release. The reset mints a fresh
/// [`VisitorId`], so an identifier never survives recycling.
#[derive(Debug, Clone, Copy)]
pub struct VisitorLifecycle {
    spawn_point: GridPos,
}

impl VisitorLifecycle {
    /// Lifecycle spawning at the given door tile.
    pub const fn new(spawn_point: GridPos) -> Self {
        Self { spawn_point }
    }
}

impl PoolLifecycle<Visitor> for VisitorLifecycle {
    fn create(&mut self) -> Visitor {
        Visitor::inactive_at(self.spawn_point)
    }

    fn on_acquire(&mut self, item: &mut Visitor) {
        item.id = VisitorId::new();
        item.active = true;
        item.position = self.spawn_point;
        item.set_stats(VISITOR_STARTING_HEALTH, VISITOR_STARTING_DAMAGE);
        item.target = None;
        item.assigned_seat = None;
    }

    fn on_release(&mut self, item: &mut Visitor) {
        item.active = false;
    }
}

/// Result of one spawn attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// A visitor entered and claimed a seat.
    Spawned(VisitorId),
    /// Every seat is taken.
    NoFreeSeat,
    /// The visitor cap is reached.
    AtCapacity,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Spawns visitors on a cadence, tracks the active roster, and reclaims
/// everything at nightfall.
#[derive(Debug)]
pub struct VisitorScheduler {
    bus: EventBus,
    seating: SeatingRegistry,
    pool: ObjectPool<Visitor, VisitorLifecycle>,
    active: BTreeMap<VisitorId, PoolHandle>,
    defenders: Vec<VisitorId>,
    rng: StdRng,
    max_visitors: usize,
    spawn_delay_min: u64,
    spawn_delay_max: u64,
    next_attempt_at: Option<Instant>,
}

impl VisitorScheduler {
    /// Create a scheduler over the given floor.
    ///
    /// The spawn cadence draws its delay from the half-open window
    /// `[visitors_spawn_delay_min, visitors_spawn_delay_max)` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`VisitorError::InvalidSpawnDelay`] when that window is
    /// empty. The window is never clamped or reordered.
    pub fn new(
        bus: EventBus,
        seating: SeatingRegistry,
        spawn_point: GridPos,
        config: &GameConfig,
    ) -> Result<Self, VisitorError> {
        if config.visitors_spawn_delay_min >= config.visitors_spawn_delay_max {
            return Err(VisitorError::InvalidSpawnDelay {
                min: config.visitors_spawn_delay_min,
                max: config.visitors_spawn_delay_max,
            });
        }
        Ok(Self {
            bus,
            seating,
            pool: ObjectPool::new(VisitorLifecycle::new(spawn_point)),
            active: BTreeMap::new(),
            defenders: Vec::new(),
            rng: StdRng::seed_from_u64(config.seed),
            max_visitors: config.max_visitors,
            spawn_delay_min: config.visitors_spawn_delay_min,
            spawn_delay_max: config.visitors_spawn_delay_max,
            next_attempt_at: None,
        })
    }

    /// Dispatch one bus event to the matching handler.
    pub fn handle_event(&mut self, event: &TavernEvent) {
        match event {
            TavernEvent::HeartRepaired => self.start_spawning(),
            TavernEvent::VisitorLeftTavern(id) => self.visitor_left(*id),
            TavernEvent::DefenderAdded(id) => self.add_defender(*id),
            TavernEvent::NightStarted => self.night_reset(),
            _ => {}
        }
    }

    /// Arm the spawn cadence with an immediate first attempt.
    ///
    /// Re-arming while already armed keeps the existing schedule.
    pub fn start_spawning(&mut self) {
        if self.next_attempt_at.is_some() {
            debug!("Spawn cadence already armed");
            return;
        }
        self.next_attempt_at = Some(Instant::now());
        info!("Spawn cadence armed");
    }

    /// One spawn attempt: capacity gate, seat pick, pool acquire.
    ///
    /// The cap is checked on every attempt, so the active roster never
    /// exceeds `max_visitors` under any event interleaving.
    pub fn try_spawn_visitor(&mut self) -> SpawnOutcome {
        if self.active.len() >= self.max_visitors {
            debug!(
                active = self.active.len(),
                cap = self.max_visitors,
                "Visitor cap reached"
            );
            return SpawnOutcome::AtCapacity;
        }
        let Some(seat) = self.seating.find_free_seat(&mut self.rng) else {
            debug!("No empty chairs");
            return SpawnOutcome::NoFreeSeat;
        };
        if let Err(error) = self.seating.claim(seat.id) {
            warn!(%error, "Picked seat could not be claimed");
            return SpawnOutcome::NoFreeSeat;
        }

        let handle = self.pool.acquire();
        let spawned = self.pool.get_mut(handle).map(|visitor| {
            visitor.assigned_seat = Some(seat.id);
            visitor.set_target(seat.position);
            visitor.id
        });
        let Some(id) = spawned else {
            // a just-acquired slot is always live
            warn!(handle = ?handle, "Acquired pool slot is not live");
            self.pool.release(handle);
            self.rollback_claim(seat.id);
            return SpawnOutcome::NoFreeSeat;
        };

        self.active.insert(id, handle);
        info!(
            visitor = %id,
            seat = %seat.id,
            active = self.active.len(),
            "Visitor spawned"
        );
        SpawnOutcome::Spawned(id)
    }

    /// Handle a departure: drop the roster entry, free the seat, return
    /// the instance to the pool.
    ///
    /// IDs missing from the roster are ignored. Recycled pool slots mint
    /// fresh IDs, so a stale departure event matches nothing.
    pub fn visitor_left(&mut self, id: VisitorId) {
        let Some(handle) = self.active.remove(&id) else {
            debug!(visitor = %id, "Departure for unknown visitor ignored");
            return;
        };
        self.free_assigned_seat(handle);
        self.pool.release(handle);
        info!(visitor = %id, active = self.active.len(), "Visitor left the tavern");
    }

    /// Append a visitor to the defender roster. Duplicates are kept.
    pub fn add_defender(&mut self, id: VisitorId) {
        self.defenders.push(id);
        debug!(visitor = %id, defenders = self.defenders.len(), "Defender added");
    }

    /// Nightfall reclamation, in fixed order: disarm the cadence, free
    /// every seat, publish the defender snapshot, release every active
    /// visitor, clear both rosters.
    pub fn night_reset(&mut self) {
        self.next_attempt_at = None;
        self.seating.release_all();
        if !self.defenders.is_empty() {
            self.bus
                .publish(&TavernEvent::DefendersToCards(self.defenders.clone()));
        }
        for handle in self.active.values().copied() {
            self.pool.release(handle);
        }
        self.active.clear();
        self.defenders.clear();
        info!(pooled = self.pool.free_count(), "Night reset complete");
    }

    // ------- Accessors -------

    /// Number of visitors currently in the tavern.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// IDs of the active roster, in ID order.
    pub fn active_ids(&self) -> Vec<VisitorId> {
        self.active.keys().copied().collect()
    }

    /// Number of entries in the defender roster, duplicates included.
    pub const fn defender_count(&self) -> usize {
        self.defenders.len()
    }

    /// Whether the spawn cadence is armed.
    pub const fn is_spawning(&self) -> bool {
        self.next_attempt_at.is_some()
    }

    /// The seating registry.
    pub const fn seating(&self) -> &SeatingRegistry {
        &self.seating
    }

    /// The visitor pool.
    pub const fn pool(&self) -> &ObjectPool<Visitor, VisitorLifecycle> {
        &self.pool
    }

    /// The visitor backing a roster entry, if the ID is active.
    pub fn visitor(&self, id: VisitorId) -> Option<&Visitor> {
        self.active.get(&id).and_then(|handle| self.pool.get(*handle))
    }

    // ------- Async shell -------

    /// Drive the scheduler until the bus closes or `shutdown` flips.
    ///
    /// One select loop owns the bus subscription and the cadence
    /// deadline. A cadence fire makes one spawn attempt and re-arms with
    /// a fresh random delay; the loop persists through full-tavern and
    /// at-capacity attempts until nightfall disarms it. A lagged bus
    /// subscription logs a warning and skips ahead. Returns the
    /// scheduler for end-of-run inspection.
    pub async fn run(
        mut self,
        mut events: broadcast::Receiver<TavernEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Self {
        loop {
            let deadline = self.next_attempt_at.unwrap_or_else(Instant::now);
            tokio::select! {
                event = events.recv() => match event {
                    Ok(event) => self.handle_event(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Visitor scheduler lagged behind the bus");
                    }
                    Err(RecvError::Closed) => break,
                },
                () = sleep_until(deadline), if self.next_attempt_at.is_some() => {
                    let outcome = self.try_spawn_visitor();
                    debug!(?outcome, "Spawn attempt");
                    self.schedule_next_attempt();
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!(active = self.active.len(), "Visitor scheduler stopped");
        self
    }

    /// Re-arm the cadence with a delay drawn from `[min, max)` seconds.
    fn schedule_next_attempt(&mut self) {
        let delay = self
            .rng
            .random_range(self.spawn_delay_min..self.spawn_delay_max);
        let next = Instant::now()
            .checked_add(Duration::from_secs(delay))
            .unwrap_or_else(Instant::now);
        self.next_attempt_at = Some(next);
    }

    fn free_assigned_seat(&mut self, handle: PoolHandle) {
        let Some(seat) = self
            .pool
            .get(handle)
            .and_then(|visitor| visitor.assigned_seat)
        else {
            return;
        };
        if let Err(error) = self.seating.release(seat) {
            warn!(%error, "Seat release on departure failed");
        }
    }

    fn rollback_claim(&mut self, seat: SeatId) {
        if let Err(error) = self.seating.release(seat) {
            warn!(%error, "Seat rollback failed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scheduler_with(
        bus: &EventBus,
        seats: i32,
        cap: usize,
        delay_min: u64,
        delay_max: u64,
    ) -> VisitorScheduler {
        let positions: Vec<GridPos> = (0..seats).map(|x| GridPos::new(x, 1)).collect();
        let config = GameConfig {
            seed: 7,
            max_visitors: cap,
            visitors_spawn_delay_min: delay_min,
            visitors_spawn_delay_max: delay_max,
            ..GameConfig::default()
        };
        VisitorScheduler::new(
            bus.clone(),
            SeatingRegistry::new(&positions),
            GridPos::new(0, 0),
            &config,
        )
        .unwrap()
    }

    fn assert_seat_consistency(scheduler: &VisitorScheduler) {
        for seat in scheduler.seating().seats() {
            let holders = scheduler
                .active_ids()
                .into_iter()
                .filter(|id| {
                    scheduler.visitor(*id).and_then(|visitor| visitor.assigned_seat)
                        == Some(seat.id)
                })
                .count();
            if seat.occupied {
                assert_eq!(holders, 1, "occupied seat has exactly one holder");
            } else {
                assert_eq!(holders, 0, "free seat has no holder");
            }
        }
    }

    #[test]
    fn rejects_empty_spawn_delay_window() {
        let config = GameConfig {
            visitors_spawn_delay_min: 2,
            visitors_spawn_delay_max: 2,
            ..GameConfig::default()
        };
        let result = VisitorScheduler::new(
            EventBus::new(),
            SeatingRegistry::new(&[GridPos::new(1, 1)]),
            GridPos::new(0, 0),
            &config,
        );
        assert_eq!(
            result.err(),
            Some(VisitorError::InvalidSpawnDelay { min: 2, max: 2 })
        );
    }

    #[test]
    fn rejects_inverted_spawn_delay_window() {
        let config = GameConfig {
            visitors_spawn_delay_min: 5,
            visitors_spawn_delay_max: 2,
            ..GameConfig::default()
        };
        let result = VisitorScheduler::new(
            EventBus::new(),
            SeatingRegistry::new(&[GridPos::new(1, 1)]),
            GridPos::new(0, 0),
            &config,
        );
        assert!(result.is_err(), "bounds are never reordered");
    }

    #[test]
    fn spawn_seats_an_armed_visitor() {
        let bus = EventBus::new();
        let mut scheduler = scheduler_with(&bus, 3, 10, 1, 3);

        let SpawnOutcome::Spawned(id) = scheduler.try_spawn_visitor() else {
            unreachable!("tavern is empty");
        };

        assert_eq!(scheduler.active_count(), 1);
        assert_eq!(scheduler.seating().free_count(), 2);

        let visitor = scheduler.visitor(id).unwrap();
        assert!(visitor.active);
        assert_eq!(visitor.health, VISITOR_STARTING_HEALTH);
        assert_eq!(visitor.damage, VISITOR_STARTING_DAMAGE);
        let seat = visitor.assigned_seat.unwrap();
        assert_eq!(
            visitor.target,
            scheduler.seating().position_of(seat),
            "visitor walks to its seat"
        );
        assert_seat_consistency(&scheduler);
    }

    #[test]
    fn spawn_respects_the_visitor_cap() {
        let bus = EventBus::new();
        let mut scheduler = scheduler_with(&bus, 3, 1, 1, 3);

        assert!(matches!(
            scheduler.try_spawn_visitor(),
            SpawnOutcome::Spawned(_)
        ));
        assert_eq!(scheduler.try_spawn_visitor(), SpawnOutcome::AtCapacity);
        assert_eq!(scheduler.active_count(), 1);
    }

    #[test]
    fn spawn_with_full_seating_reports_no_free_seat() {
        let bus = EventBus::new();
        let mut scheduler = scheduler_with(&bus, 1, 10, 1, 3);

        assert!(matches!(
            scheduler.try_spawn_visitor(),
            SpawnOutcome::Spawned(_)
        ));
        assert_eq!(scheduler.try_spawn_visitor(), SpawnOutcome::NoFreeSeat);
        assert_seat_consistency(&scheduler);
    }

    #[test]
    fn failed_spawn_attempts_leave_no_residue() {
        let bus = EventBus::new();
        let mut scheduler = scheduler_with(&bus, 0, 10, 1, 3);

        assert_eq!(scheduler.try_spawn_visitor(), SpawnOutcome::NoFreeSeat);
        assert_eq!(scheduler.pool().created(), 0, "no instance built");
        assert_eq!(scheduler.pool().in_use(), 0);

        let mut scheduler = scheduler_with(&bus, 3, 1, 1, 3);
        assert!(matches!(
            scheduler.try_spawn_visitor(),
            SpawnOutcome::Spawned(_)
        ));
        assert_eq!(scheduler.try_spawn_visitor(), SpawnOutcome::AtCapacity);
        assert_eq!(scheduler.pool().in_use(), scheduler.active_count());
        assert_eq!(scheduler.seating().free_count(), 2, "no seat stays claimed");
        assert_seat_consistency(&scheduler);
    }

    #[test]
    fn departure_frees_seat_and_recycles_the_instance() {
        let bus = EventBus::new();
        let mut scheduler = scheduler_with(&bus, 2, 10, 1, 3);

        let SpawnOutcome::Spawned(first) = scheduler.try_spawn_visitor() else {
            unreachable!("tavern is empty");
        };
        scheduler.visitor_left(first);

        assert_eq!(scheduler.active_count(), 0);
        assert_eq!(scheduler.seating().free_count(), 2);
        assert_eq!(scheduler.pool().free_count(), 1);
        assert_seat_consistency(&scheduler);

        let SpawnOutcome::Spawned(second) = scheduler.try_spawn_visitor() else {
            unreachable!("a seat is free again");
        };
        assert_eq!(scheduler.pool().created(), 1, "instance is reused");
        assert_ne!(second, first, "recycled instance gets a fresh identity");
    }

    #[test]
    fn stale_departure_is_ignored() {
        let bus = EventBus::new();
        let mut scheduler = scheduler_with(&bus, 2, 10, 1, 3);

        let SpawnOutcome::Spawned(first) = scheduler.try_spawn_visitor() else {
            unreachable!("tavern is empty");
        };
        scheduler.visitor_left(first);
        let SpawnOutcome::Spawned(second) = scheduler.try_spawn_visitor() else {
            unreachable!("a seat is free again");
        };

        // The old ID hits the recycled slot's previous stay; nothing moves.
        scheduler.visitor_left(first);

        assert_eq!(scheduler.active_count(), 1);
        assert!(scheduler.visitor(second).unwrap().active);
        assert_seat_consistency(&scheduler);
    }

    #[test]
    fn capacity_freed_by_departure_is_reusable() {
        let bus = EventBus::new();
        let mut scheduler = scheduler_with(&bus, 2, 2, 1, 3);

        let SpawnOutcome::Spawned(first) = scheduler.try_spawn_visitor() else {
            unreachable!("tavern is empty");
        };
        assert!(matches!(
            scheduler.try_spawn_visitor(),
            SpawnOutcome::Spawned(_)
        ));
        assert_eq!(scheduler.try_spawn_visitor(), SpawnOutcome::AtCapacity);

        scheduler.visitor_left(first);
        assert!(
            matches!(scheduler.try_spawn_visitor(), SpawnOutcome::Spawned(_)),
            "third visitor enters once a seat and the cap free up"
        );
        assert_eq!(scheduler.active_count(), 2);
        assert_seat_consistency(&scheduler);
    }

    #[test]
    fn duplicate_defenders_are_kept() {
        let bus = EventBus::new();
        let mut scheduler = scheduler_with(&bus, 2, 10, 1, 3);

        let hero = VisitorId::new();
        scheduler.add_defender(hero);
        scheduler.add_defender(hero);
        assert_eq!(scheduler.defender_count(), 2);
    }

    #[test]
    fn night_reset_reclaims_everything() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let mut scheduler = scheduler_with(&bus, 3, 10, 1, 3);

        let SpawnOutcome::Spawned(first) = scheduler.try_spawn_visitor() else {
            unreachable!("tavern is empty");
        };
        assert!(matches!(
            scheduler.try_spawn_visitor(),
            SpawnOutcome::Spawned(_)
        ));
        scheduler.add_defender(first);

        scheduler.handle_event(&TavernEvent::NightStarted);

        assert!(!scheduler.is_spawning());
        assert_eq!(scheduler.active_count(), 0);
        assert_eq!(scheduler.defender_count(), 0);
        assert_eq!(
            scheduler.seating().free_count(),
            scheduler.seating().seat_count()
        );
        assert_eq!(scheduler.pool().free_count(), scheduler.pool().created());
        assert_eq!(
            rx.try_recv().unwrap(),
            TavernEvent::DefendersToCards(vec![first])
        );
        assert_seat_consistency(&scheduler);
    }

    #[test]
    fn night_reset_without_defenders_publishes_nothing() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let mut scheduler = scheduler_with(&bus, 2, 10, 1, 3);

        scheduler.try_spawn_visitor();
        scheduler.handle_event(&TavernEvent::NightStarted);

        assert!(rx.try_recv().is_err(), "no defender snapshot");
    }

    #[test]
    fn defender_snapshot_is_independent_of_the_roster() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let mut scheduler = scheduler_with(&bus, 2, 10, 1, 3);

        let hero = VisitorId::new();
        scheduler.add_defender(hero);
        scheduler.night_reset();

        // The roster is already cleared; the published snapshot is not.
        assert_eq!(scheduler.defender_count(), 0);
        assert_eq!(
            rx.try_recv().unwrap(),
            TavernEvent::DefendersToCards(vec![hero])
        );
    }

    #[tokio::test]
    async fn heart_repair_arms_the_cadence_once() {
        let bus = EventBus::new();
        let mut scheduler = scheduler_with(&bus, 2, 10, 1, 3);

        scheduler.handle_event(&TavernEvent::HeartRepaired);
        assert!(scheduler.is_spawning());

        // A duplicate repair keeps the existing schedule.
        scheduler.handle_event(&TavernEvent::HeartRepaired);
        assert!(scheduler.is_spawning());
    }

    #[tokio::test]
    async fn presentation_events_are_ignored() {
        let bus = EventBus::new();
        let mut scheduler = scheduler_with(&bus, 2, 10, 1, 3);

        scheduler.handle_event(&TavernEvent::SwitchToDayCanvas);
        scheduler.handle_event(&TavernEvent::RenderCards);

        assert_eq!(scheduler.active_count(), 0);
        assert!(!scheduler.is_spawning());
    }

    #[tokio::test(start_paused = true)]
    async fn cadence_fills_the_tavern_to_cap() {
        let bus = EventBus::new();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let scheduler = scheduler_with(&bus, 2, 2, 1, 3);
        let events = bus.subscribe();
        let task = tokio::spawn(scheduler.run(events, shutdown_rx));

        bus.publish(&TavernEvent::HeartRepaired);
        tokio::time::sleep(Duration::from_secs(10)).await;

        shutdown_tx.send(true).unwrap();
        let scheduler = task.await.unwrap();

        assert_eq!(scheduler.active_count(), 2);
        assert_eq!(scheduler.seating().free_count(), 0);
        assert_eq!(scheduler.pool().created(), 2, "cap holds under cadence");
        assert!(scheduler.is_spawning(), "cadence stays armed at capacity");
        assert_seat_consistency(&scheduler);
    }

    #[tokio::test(start_paused = true)]
    async fn nightfall_reclaims_everything_mid_run() {
        let bus = EventBus::new();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let scheduler = scheduler_with(&bus, 2, 2, 1, 3);
        let events = bus.subscribe();
        let mut monitor = bus.subscribe();
        let task = tokio::spawn(scheduler.run(events, shutdown_rx));

        bus.publish(&TavernEvent::HeartRepaired);
        tokio::time::sleep(Duration::from_secs(6)).await;

        let hero = VisitorId::new();
        bus.publish(&TavernEvent::DefenderAdded(hero));
        bus.publish(&TavernEvent::NightStarted);
        tokio::time::sleep(Duration::from_secs(1)).await;

        shutdown_tx.send(true).unwrap();
        let scheduler = task.await.unwrap();

        assert_eq!(scheduler.active_count(), 0);
        assert!(!scheduler.is_spawning());
        assert_eq!(
            scheduler.seating().free_count(),
            scheduler.seating().seat_count()
        );
        assert_eq!(scheduler.pool().free_count(), scheduler.pool().created());
        assert_eq!(scheduler.defender_count(), 0);

        let mut snapshot = None;
        while let Ok(event) = monitor.try_recv() {
            if let TavernEvent::DefendersToCards(ids) = event {
                snapshot = Some(ids);
            }
        }
        assert_eq!(snapshot, Some(vec![hero]));
    }

    #[tokio::test(start_paused = true)]
    async fn run_exits_on_shutdown() {
        let bus = EventBus::new();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let scheduler = scheduler_with(&bus, 2, 2, 1, 3);
        let events = bus.subscribe();
        let task = tokio::spawn(scheduler.run(events, shutdown_rx));

        shutdown_tx.send(true).unwrap();
        let scheduler = task.await.unwrap();
        assert_eq!(scheduler.active_count(), 0);
    }
}
