//! Runtime behavior for the Tavern simulation.
//!
//! This crate owns everything that moves during a day: the phase
//! scheduler that walks start, day, and night, the broadcast bus the
//! controllers listen on, the pooled visitor store, seat allocation,
//! and the coarse environment visibility.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `tavern-config.yaml` into
//!   strongly-typed structs.
//! - [`environment`] -- [`EnvironmentController`], scene visibility
//!   driven by phase events.
//! - [`events`] -- [`EventBus`], the broadcast channel every gameplay
//!   event travels on.
//! - [`phase`] -- [`PhaseScheduler`], the day timer and the night
//!   countdown.
//! - [`pool`] -- Generic grow-only [`ObjectPool`] with lifecycle hooks.
//! - [`seating`] -- [`SeatingRegistry`], seat claim and release over the
//!   floor plan.
//! - [`visitors`] -- [`VisitorScheduler`], the spawn cadence and the
//!   active and defender rosters.
//!
//! [`EnvironmentController`]: environment::EnvironmentController
//! [`EventBus`]: events::EventBus
//! [`ObjectPool`]: pool::ObjectPool
//! [`PhaseScheduler`]: phase::PhaseScheduler
//! [`SeatingRegistry`]: seating::SeatingRegistry
//! [`VisitorScheduler`]: visitors::VisitorScheduler

pub mod config;
pub mod environment;
pub mod events;
pub mod phase;
pub mod pool;
pub mod seating;
pub mod visitors;
