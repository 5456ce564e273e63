//! Remaining-seat computation for a screening.
//!
//! The db layer supplies the room capacity and the aggregated seat count of
//! confirmed reservations; this module derives the payload served by
//! `GET /seances/{id}/disponibilite`.

use serde::Serialize;

/// Seat availability for a single screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeatAvailability {
    #[serde(rename = "capaciteTotal")]
    pub capacity: i32,
    #[serde(rename = "placesReservees")]
    pub reserved: i64,
    #[serde(rename = "placesRestantes")]
    pub remaining: i64,
    #[serde(rename = "pourcentageRempli")]
    pub percent_full: i64,
}

impl SeatAvailability {
    /// Derive availability from a room capacity and the summed seat count of
    /// confirmed reservations.
    ///
    /// No floor at zero is applied: overbooked screenings report a negative
    /// `remaining`. A zero capacity (impossible under the schema CHECK)
    /// reports 0% rather than dividing by zero.
    pub fn compute(capacity: i32, reserved: i64) -> SeatAvailability {
        let remaining = i64::from(capacity) - reserved;
        let percent_full = if capacity > 0 {
            (reserved as f64 * 100.0 / f64::from(capacity)).round() as i64
        } else {
            0
        };
        SeatAvailability { capacity, reserved, remaining, percent_full }
    }
}
