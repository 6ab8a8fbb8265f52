//! Core entity structs for the Tavern runtime.

use serde::{Deserialize, Serialize};

use crate::ids::{SeatId, VisitorId};

// ---------------------------------------------------------------------------
// Grid position
// ---------------------------------------------------------------------------

/// An integer tile coordinate in the tavern floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    /// Column, increasing east.
    pub x: i32,
    /// Row, increasing north.
    pub y: i32,
}

impl GridPos {
    /// Create a position from column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for GridPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

/// One chair in the floor plan.
///
/// The seating registry owns all seats and is their single writer during
/// a run; `occupied` is plain mutable state, not a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Unique seat identifier.
    pub id: SeatId,
    /// Tile the chair stands on; arriving visitors path here.
    pub position: GridPos,
    /// Whether a visitor currently holds this seat.
    pub occupied: bool,
}

impl Seat {
    /// Create a free seat at the given position.
    pub fn new(position: GridPos) -> Self {
        Self {
            id: SeatId::new(),
            position,
            occupied: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Visitor
// ---------------------------------------------------------------------------

/// A pooled tavern visitor.
///
/// Parked instances keep their last stats; the pool lifecycle resets them
/// on the next acquire. `id` is re-minted every stay, so identifiers
/// never alias across stays of the same pooled instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
    /// Identity for the current stay.
    pub id: VisitorId,
    /// Hit points.
    pub health: u32,
    /// Attack strength.
    pub damage: u32,
    /// Current tile.
    pub position: GridPos,
    /// Tile the visitor is walking toward, if any.
    pub target: Option<GridPos>,
    /// Seat claimed for this stay, if any.
    pub assigned_seat: Option<SeatId>,
    /// Whether the visitor is in play. False while parked in the pool.
    pub active: bool,
}

impl Visitor {
    /// Create a deactivated visitor parked at `position`.
    pub fn inactive_at(position: GridPos) -> Self {
        Self {
            id: VisitorId::new(),
            health: 0,
            damage: 0,
            position,
            target: None,
            assigned_seat: None,
            active: false,
        }
    }

    /// Set combat stats.
    pub const fn set_stats(&mut self, health: u32, damage: u32) {
        self.health = health;
        self.damage = damage;
    }

    /// Set the tile the visitor walks toward.
    pub const fn set_target(&mut self, target: GridPos) {
        self.target = Some(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_seat_is_free() {
        let seat = Seat::new(GridPos::new(3, 1));
        assert!(!seat.occupied);
        assert_eq!(seat.position, GridPos::new(3, 1));
    }

    #[test]
    fn inactive_visitor_carries_no_assignment() {
        let visitor = Visitor::inactive_at(GridPos::new(0, 0));
        assert!(!visitor.active);
        assert!(visitor.target.is_none());
        assert!(visitor.assigned_seat.is_none());
    }

    #[test]
    fn set_stats_overwrites_both_fields() {
        let mut visitor = Visitor::inactive_at(GridPos::new(0, 0));
        visitor.set_stats(10, 1);
        assert_eq!(visitor.health, 10);
        assert_eq!(visitor.damage, 1);
    }

    #[test]
    fn grid_pos_display_is_coordinate_pair() {
        assert_eq!(GridPos::new(-2, 7).to_string(), "(-2, 7)");
    }
}
