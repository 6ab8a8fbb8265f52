//! Shared type definitions for the Tavern runtime.
//!
//! This crate is the single vocabulary used across the tavern workspace:
//! typed identifiers, the game phase, the bus topics, and the entity
//! structs the schedulers move around. Behavior lives in `tavern-core`;
//! nothing here owns a timer or a task.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for visitors and seats
//! - [`enums`] -- The game [`Phase`]
//! - [`events`] -- [`TavernEvent`], the closed set of bus topics
//! - [`structs`] -- Entity structs ([`Visitor`], [`Seat`], [`GridPos`])

pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::Phase;
pub use events::TavernEvent;
pub use ids::{SeatId, VisitorId};
pub use structs::{GridPos, Seat, Visitor};
