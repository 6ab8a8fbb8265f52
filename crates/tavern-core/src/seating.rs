//! Seat allocation for the tavern floor plan.
//!
//! [`SeatingRegistry`] owns every seat and is the only writer during a
//! run. Free-seat selection is a uniform random pick over the free
//! subset: every free seat has the same probability regardless of its
//! index in the floor plan, and a full tavern yields `None` instead of
//! a retry loop.

use rand::Rng;
use tavern_types::{GridPos, Seat, SeatId};
use thiserror::Error;
use tracing::debug;

/// Errors from seat claim and release operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeatingError {
    /// The seat ID is not part of this floor plan.
    #[error("unknown seat {seat}")]
    UnknownSeat {
        /// The offending seat ID.
        seat: SeatId,
    },

    /// Claim attempted on a seat that is already occupied.
    #[error("seat {seat} is already occupied")]
    SeatOccupied {
        /// The offending seat ID.
        seat: SeatId,
    },

    /// Release attempted on a seat that is not occupied.
    #[error("seat {seat} is not occupied")]
    SeatNotOccupied {
        /// The offending seat ID.
        seat: SeatId,
    },
}

/// The fixed seat list for one tavern floor.
#[derive(Debug, Clone)]
pub struct SeatingRegistry {
    seats: Vec<Seat>,
}

impl SeatingRegistry {
    /// Build a registry with one free seat per position.
    pub fn new(positions: &[GridPos]) -> Self {
        Self {
            seats: positions.iter().copied().map(Seat::new).collect(),
        }
    }

    /// All seats in floor-plan order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Total number of seats.
    pub const fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Number of currently free seats.
    pub fn free_count(&self) -> usize {
        self.seats.iter().filter(|seat| !seat.occupied).count()
    }

    /// Position of a seat, if it exists.
    pub fn position_of(&self, seat: SeatId) -> Option<GridPos> {
        self.seats
            .iter()
            .find(|entry| entry.id == seat)
            .map(|entry| entry.position)
    }

    /// Whether a seat is occupied, if it exists.
    pub fn is_occupied(&self, seat: SeatId) -> Option<bool> {
        self.seats
            .iter()
            .find(|entry| entry.id == seat)
            .map(|entry| entry.occupied)
    }

    /// Pick a free seat uniformly at random.
    ///
    /// Returns a copy of the picked seat, or `None` when every seat is
    /// taken. The pick does not claim the seat.
    pub fn find_free_seat(&self, rng: &mut impl Rng) -> Option<Seat> {
        let free: Vec<Seat> = self
            .seats
            .iter()
            .filter(|seat| !seat.occupied)
            .copied()
            .collect();
        if free.is_empty() {
            return None;
        }
        let pick = rng.random_range(0..free.len());
        free.get(pick).copied()
    }

    /// Mark a seat occupied.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::UnknownSeat`] for a foreign ID and
    /// [`SeatingError::SeatOccupied`] when the seat is already taken.
    pub fn claim(&mut self, seat: SeatId) -> Result<(), SeatingError> {
        let Some(entry) = self.seats.iter_mut().find(|entry| entry.id == seat) else {
            return Err(SeatingError::UnknownSeat { seat });
        };
        if entry.occupied {
            return Err(SeatingError::SeatOccupied { seat });
        }
        entry.occupied = true;
        Ok(())
    }

    /// Mark a seat free.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::UnknownSeat`] for a foreign ID and
    /// [`SeatingError::SeatNotOccupied`] when the seat is already free.
    pub fn release(&mut self, seat: SeatId) -> Result<(), SeatingError> {
        let Some(entry) = self.seats.iter_mut().find(|entry| entry.id == seat) else {
            return Err(SeatingError::UnknownSeat { seat });
        };
        if !entry.occupied {
            return Err(SeatingError::SeatNotOccupied { seat });
        }
        entry.occupied = false;
        Ok(())
    }

    /// Free every seat unconditionally. The night reset.
    pub fn release_all(&mut self) {
        for seat in &mut self.seats {
            seat.occupied = false;
        }
        debug!(seats = self.seats.len(), "All seats released");
    }
}

// ---------------------------------------------------------------------------
// Default floor plan
// ---------------------------------------------------------------------------

/// Seat positions plus the door spawn point for one tavern floor.
#[derive(Debug, Clone)]
pub struct FloorPlan {
    /// Tile of each chair.
    pub seat_positions: Vec<GridPos>,
    /// Tile where new visitors appear, by the door.
    pub spawn_point: GridPos,
}

/// The built-in tavern floor: eight chairs at four tables, two per
/// table, with the door at the south-west corner.
pub fn default_floor_plan() -> FloorPlan {
    FloorPlan {
        seat_positions: vec![
            GridPos::new(2, 2),
            GridPos::new(3, 2),
            GridPos::new(5, 2),
            GridPos::new(6, 2),
            GridPos::new(2, 5),
            GridPos::new(3, 5),
            GridPos::new(5, 5),
            GridPos::new(6, 5),
        ],
        spawn_point: GridPos::new(0, 0),
    }
}
