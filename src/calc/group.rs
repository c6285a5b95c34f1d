use crate::calc::error::SkippedEntry;
use crate::calc::normalize::NormalizedReservation;
use crate::data::Facility;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

/// All stays of one facility, in packing order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacilityGroup {
    pub key: String,
    pub reservations: Vec<NormalizedReservation>,
}

/// Packing order: check-in date, then same-day stays before stays that run
/// past their check-in (a same-day stay occupies the whole first cell),
/// then input order.
pub fn stay_order(a: &NormalizedReservation, b: &NormalizedReservation) -> Ordering {
    a.check_in
        .cmp(&b.check_in)
        .then_with(|| b.is_same_day().cmp(&a.is_same_day()))
        .then_with(|| a.seq.cmp(&b.seq))
}

/// Partitions by facility key. Groups come back ordered by key.
pub fn group_by_facility(normalized: Vec<NormalizedReservation>) -> Vec<FacilityGroup> {
    let mut by_key: BTreeMap<String, Vec<NormalizedReservation>> = BTreeMap::new();
    for reservation in normalized {
        by_key
            .entry(reservation.facility_key.clone())
            .or_default()
            .push(reservation);
    }

    by_key
        .into_iter()
        .map(|(key, mut reservations)| {
            reservations.sort_by(stay_order);
            FacilityGroup { key, reservations }
        })
        .collect()
}

/// `unknown_facility` diagnostics for stays whose key names no known facility.
/// An empty `facilities` slice means no reference data was loaded, not that
/// every key is unknown, so it yields no diagnostics.
pub fn unknown_facilities(
    normalized: &[NormalizedReservation],
    facilities: &[Facility],
) -> Vec<SkippedEntry> {
    if facilities.is_empty() {
        return Vec::new();
    }
    let known: HashSet<&str> = facilities.iter().map(|f| f.name.as_str()).collect();
    normalized
        .iter()
        .filter(|r| !known.contains(r.facility_key.as_str()))
        .map(|r| {
            tracing::warn!(id = r.id, facility = %r.facility_key, "reservation for unknown facility");
            SkippedEntry::unknown_facility(r.id, &r.facility_key)
        })
        .collect()
}
