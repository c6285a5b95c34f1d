use crate::calc::normalize::NormalizedReservation;
use chrono::{Datelike, NaiveDate};

/// Half-open span of half-day slots a stay covers on screen.
///
/// Slot `2d` is the departure (morning) half of day `d`, slot `2d + 1` the
/// arrival (afternoon) half. A stay runs from the arrival half of check-in
/// through the departure half of check-out; a same-day stay takes both halves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Occupancy {
    pub start: i64,
    pub end: i64,
}

fn slot(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) * 2
}

impl Occupancy {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        if check_in == check_out {
            Occupancy {
                start: slot(check_in),
                end: slot(check_in) + 2,
            }
        } else {
            Occupancy {
                start: slot(check_in) + 1,
                end: slot(check_out) + 1,
            }
        }
    }

    pub fn of(reservation: &NormalizedReservation) -> Self {
        Occupancy::new(reservation.check_in, reservation.check_out)
    }

    /// A turnover (check-out and check-in on one date) does not overlap.
    pub fn overlaps(&self, other: &Occupancy) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }
}

/// Greedy first-fit lane assignment over a group in packing order.
/// Returns the row of each stay, index-aligned with `group`.
pub fn pack_rows(group: &[NormalizedReservation]) -> Vec<usize> {
    let mut lanes: Vec<Vec<Occupancy>> = Vec::new();
    let mut rows = Vec::with_capacity(group.len());

    for reservation in group {
        let occupancy = Occupancy::of(reservation);
        let row = match lanes
            .iter()
            .position(|lane| lane.iter().all(|o| !o.overlaps(&occupancy)))
        {
            Some(row) => row,
            None => {
                lanes.push(Vec::new());
                lanes.len() - 1
            }
        };
        lanes[row].push(occupancy);
        tracing::trace!(id = reservation.id, row, "placed stay");
        rows.push(row);
    }

    tracing::debug!(stays = group.len(), lanes = lanes.len(), "packed rows");
    rows
}
