use crate::data::RawReservation;
use serde::{Deserialize, Serialize};

/// The two user-facing toggles of the calendar screen.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutFilters {
    pub include_cancelled: bool,
    /// Room type or facility name; `None` shows every facility.
    pub facility: Option<String>,
}

impl LayoutFilters {
    pub fn keeps(&self, reservation: &RawReservation) -> bool {
        if !self.include_cancelled && reservation.is_cancelled() {
            return false;
        }
        match &self.facility {
            Some(key) => reservation.matches_facility(key),
            None => true,
        }
    }
}

/// Keeps the records passing `filters`, preserving input order.
pub fn filter_reservations<'a>(
    reservations: &'a [RawReservation],
    filters: &LayoutFilters,
) -> Vec<&'a RawReservation> {
    let kept: Vec<&RawReservation> = reservations.iter().filter(|r| filters.keeps(r)).collect();
    tracing::debug!(
        total = reservations.len(),
        kept = kept.len(),
        include_cancelled = filters.include_cancelled,
        facility = ?filters.facility,
        "filtered reservations"
    );
    kept
}
