pub mod assemble;
pub mod conflict;
pub mod error;
pub mod filter;
pub mod group;
pub mod normalize;
pub mod rows;
pub mod segment;
pub mod window;

pub use assemble::{assemble_layout, Layout, LayoutEntry, PlacedReservation, WeekLanes};
pub use conflict::{detect_conflicts, ConflictFlags};
pub use error::{NormalizeError, SkipKind, SkippedEntry};
pub use filter::{filter_reservations, LayoutFilters};
pub use group::{group_by_facility, FacilityGroup};
pub use normalize::{normalize_reservations, parse_stay_date, NormalizedReservation};
pub use rows::{pack_rows, Occupancy};
pub use segment::{split_segments, Segment};
pub use window::{build_window, LayoutWindow, ViewMode, Week};

use crate::data::{Facility, RawReservation};
use chrono::NaiveDate;

/// Everything one layout pass reads. Nothing here is mutated.
#[derive(Clone, Debug)]
pub struct LayoutInput<'a> {
    pub reservations: &'a [RawReservation],
    /// Reference data for ordering and display names. An empty slice means
    /// "no reference data": every key is laid out and no `unknown_facility`
    /// diagnostics are produced.
    pub facilities: &'a [Facility],
    pub reference_date: NaiveDate,
    pub mode: ViewMode,
    pub filters: LayoutFilters,
    pub placeholder_name: &'a str,
}

/// Turns raw reservations into a drawable calendar layout.
///
/// Rows and turnover flags are computed over the whole filtered set, so a
/// stay keeps its row no matter which week or month is on screen. Records
/// that fail normalization are reported in `skipped`, never fatal.
#[tracing::instrument(skip_all, fields(reference_date = %input.reference_date, mode = ?input.mode))]
pub fn compute_layout(input: &LayoutInput) -> Layout {
    let window = build_window(input.reference_date, input.mode);
    let filtered = filter_reservations(input.reservations, &input.filters);
    let (normalized, mut skipped) = normalize_reservations(&filtered, input.placeholder_name);
    skipped.extend(group::unknown_facilities(&normalized, input.facilities));

    let mut placed = Vec::with_capacity(normalized.len());
    for group in group_by_facility(normalized) {
        let flags = detect_conflicts(&group.reservations);
        let rows = pack_rows(&group.reservations);
        for ((reservation, conflicts), row) in group.reservations.into_iter().zip(flags).zip(rows) {
            let segments = split_segments(reservation.check_in, reservation.check_out, &window);
            placed.push(PlacedReservation {
                reservation,
                row,
                conflicts,
                segments,
            });
        }
    }

    assemble_layout(window, placed, input.facilities, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ReservationStatus;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn res(id: u64, room: &str, check_in: &str, check_out: &str) -> RawReservation {
        RawReservation::new(id, &format!("Guest {id}"), room, check_in, check_out)
    }

    fn input<'a>(reservations: &'a [RawReservation], facilities: &'a [Facility]) -> LayoutInput<'a> {
        LayoutInput {
            reservations,
            facilities,
            reference_date: d(1, 15),
            mode: ViewMode::Month,
            filters: LayoutFilters::default(),
            placeholder_name: "Unknown",
        }
    }

    #[test]
    fn test_empty_input_gives_empty_layout() {
        let layout = compute_layout(&input(&[], &[]));
        assert!(layout.entries.is_empty());
        assert!(layout.skipped.is_empty());
        assert_eq!(layout.window.weeks.len(), 5);
    }

    #[test]
    fn test_rows_are_per_facility() {
        let reservations = vec![
            res(1, "A", "2025-01-05", "2025-01-08"),
            res(2, "B", "2025-01-05", "2025-01-08"),
            res(3, "A", "2025-01-06", "2025-01-07"),
        ];
        let layout = compute_layout(&input(&reservations, &[]));
        let row = |id| layout.entry(id).map(|e| e.row);
        assert_eq!(row(1), Some(0));
        assert_eq!(row(2), Some(0));
        assert_eq!(row(3), Some(1));
    }

    #[test]
    fn test_invalid_records_skipped_rest_laid_out() {
        let reservations = vec![
            res(1, "A", "garbage", "2025-01-08"),
            res(2, "A", "2025-01-09", "2025-01-05"),
            res(3, "A", "2025-01-05", "2025-01-08"),
        ];
        let layout = compute_layout(&input(&reservations, &[]));
        assert_eq!(layout.entries.len(), 1);
        let skipped: Vec<u64> = layout.skipped.iter().map(|s| s.reservation_id).collect();
        assert_eq!(skipped, vec![1, 2]);
        assert!(layout.skipped.iter().all(|s| s.kind == SkipKind::InvalidDate));
    }

    #[test]
    fn test_unknown_facility_reported_but_laid_out() {
        let facilities = vec![Facility::new(1, "A", None)];
        let reservations = vec![
            res(1, "A", "2025-01-05", "2025-01-08"),
            res(2, "Z", "2025-01-05", "2025-01-08"),
        ];
        let layout = compute_layout(&input(&reservations, &facilities));
        assert_eq!(layout.entries.len(), 2);
        assert_eq!(layout.skipped.len(), 1);
        assert_eq!(layout.skipped[0].kind, SkipKind::UnknownFacility);
        assert!(!layout.skipped[0].is_excluded());
        assert_eq!(layout.entries[1].facility_key, "Z");
    }

    #[test]
    fn test_no_facility_list_means_no_unknown_diagnostics() {
        let reservations = vec![
            res(1, "A", "2025-01-05", "2025-01-08"),
            res(2, "Z", "2025-01-05", "2025-01-08"),
        ];
        let layout = compute_layout(&input(&reservations, &[]));
        assert!(layout.skipped.is_empty());
        let keys: Vec<&str> = layout.entries.iter().map(|e| e.facility_key.as_str()).collect();
        assert_eq!(keys, vec!["A", "Z"]);
    }

    #[test]
    fn test_row_independent_of_window() {
        // the long stay in row 0 starts in December, outside the February view
        let reservations = vec![
            res(1, "A", "2024-12-20", "2025-02-10"),
            res(2, "A", "2025-02-03", "2025-02-05"),
        ];
        let mut layout_input = input(&reservations, &[]);
        layout_input.reference_date = d(2, 10);
        let layout = compute_layout(&layout_input);
        assert_eq!(layout.entry(2).map(|e| e.row), Some(1));
    }

    #[test]
    fn test_stays_outside_window_omitted() {
        let reservations = vec![
            res(1, "A", "2025-03-05", "2025-03-08"),
            res(2, "A", "2025-01-05", "2025-01-08"),
        ];
        let layout = compute_layout(&input(&reservations, &[]));
        assert!(layout.entry(1).is_none());
        assert!(layout.entry(2).is_some());
    }

    #[test]
    fn test_cancelled_shown_dimmed_when_requested() {
        let reservations = vec![
            res(1, "A", "2025-01-05", "2025-01-08").with_status(ReservationStatus::Cancelled),
        ];
        let mut layout_input = input(&reservations, &[]);
        assert!(compute_layout(&layout_input).entries.is_empty());

        layout_input.filters.include_cancelled = true;
        let layout = compute_layout(&layout_input);
        assert_eq!(layout.entries.len(), 1);
        assert!(layout.entries[0].dimmed);
    }

    #[test]
    fn test_placeholder_name_used() {
        let mut r = res(1, "A", "2025-01-05", "2025-01-08");
        r.guest_name = None;
        let reservations = vec![r];
        let mut layout_input = input(&reservations, &[]);
        layout_input.placeholder_name = "(no name)";
        let layout = compute_layout(&layout_input);
        assert_eq!(layout.entries[0].display_name, "(no name)");
    }
}
