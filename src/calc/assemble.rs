use crate::calc::conflict::ConflictFlags;
use crate::calc::error::SkippedEntry;
use crate::calc::normalize::NormalizedReservation;
use crate::calc::segment::Segment;
use crate::calc::window::LayoutWindow;
use crate::data::facility::display_order;
use crate::data::{Facility, ReservationStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// A stay after conflict detection, row packing and splitting.
#[derive(Clone, Debug)]
pub struct PlacedReservation {
    pub reservation: NormalizedReservation,
    pub row: usize,
    pub conflicts: ConflictFlags,
    pub segments: Vec<Segment>,
}

/// Everything the renderer needs to draw one stay.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LayoutEntry {
    pub reservation_id: u64,
    pub display_name: String,
    pub facility_key: String,
    pub facility_display_name: String,
    pub row: usize,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: ReservationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ota_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<u32>,
    /// Cancelled stay shown on request; drawn at reduced opacity.
    pub dimmed: bool,
    #[serde(flatten)]
    pub conflicts: ConflictFlags,
    pub segments: Vec<Segment>,
}

/// Lanes a facility needs inside one week row.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct WeekLanes {
    pub week_index: usize,
    pub facility_key: String,
    pub lanes: usize,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Layout {
    pub window: LayoutWindow,
    pub entries: Vec<LayoutEntry>,
    pub skipped: Vec<SkippedEntry>,
    pub week_lanes: Vec<WeekLanes>,
}

impl Layout {
    pub fn entries_in_week(&self, week_index: usize) -> impl Iterator<Item = &LayoutEntry> {
        self.entries
            .iter()
            .filter(move |e| e.segments.iter().any(|s| s.week_index == week_index))
    }

    pub fn entry(&self, reservation_id: u64) -> Option<&LayoutEntry> {
        self.entries.iter().find(|e| e.reservation_id == reservation_id)
    }
}

impl LayoutEntry {
    fn from_placed(placed: PlacedReservation, facility: Option<&Facility>) -> Self {
        let PlacedReservation {
            reservation,
            row,
            conflicts,
            segments,
        } = placed;
        let facility_display_name = match facility {
            Some(f) => f.display_name(),
            None => reservation.facility_key.clone(),
        };
        LayoutEntry {
            reservation_id: reservation.id,
            display_name: reservation.display_name,
            facility_key: reservation.facility_key,
            facility_display_name,
            row,
            check_in: reservation.check_in,
            check_out: reservation.check_out,
            dimmed: reservation.status == ReservationStatus::Cancelled,
            status: reservation.status,
            ota_name: reservation.ota_name,
            guest_count: reservation.guest_count,
            conflicts,
            segments,
        }
    }
}

fn lanes_per_week(entries: &[LayoutEntry]) -> Vec<WeekLanes> {
    // facility position follows the (already sorted) entry order
    let mut facility_pos: HashMap<&str, usize> = HashMap::new();
    let mut lanes: BTreeMap<(usize, usize), (&str, usize)> = BTreeMap::new();
    for entry in entries {
        let next = facility_pos.len();
        let pos = *facility_pos.entry(entry.facility_key.as_str()).or_insert(next);
        for segment in &entry.segments {
            let slot = lanes
                .entry((segment.week_index, pos))
                .or_insert((entry.facility_key.as_str(), 0));
            slot.1 = slot.1.max(entry.row + 1);
        }
    }
    lanes
        .into_iter()
        .map(|((week_index, _), (key, lanes))| WeekLanes {
            week_index,
            facility_key: key.to_string(),
            lanes,
        })
        .collect()
}

/// Joins per-stay results into the exported layout. Stays with no segment in
/// the window are dropped; entries are ordered by facility display order,
/// then row, check-in and id.
pub fn assemble_layout(
    window: LayoutWindow,
    placed: Vec<PlacedReservation>,
    facilities: &[Facility],
    skipped: Vec<SkippedEntry>,
) -> Layout {
    let mut ordered: Vec<&Facility> = facilities.iter().collect();
    ordered.sort_by(|a, b| display_order(a, b));
    let known: HashMap<&str, (usize, &Facility)> = ordered
        .iter()
        .enumerate()
        .map(|(rank, f)| (f.name.as_str(), (rank, *f)))
        .collect();

    let mut entries: Vec<LayoutEntry> = placed
        .into_iter()
        .filter(|p| !p.segments.is_empty())
        .map(|p| {
            let facility = known.get(p.reservation.facility_key.as_str()).map(|(_, f)| *f);
            LayoutEntry::from_placed(p, facility)
        })
        .collect();

    entries.sort_by(|a, b| {
        let rank_a = known.get(a.facility_key.as_str()).map(|(rank, _)| *rank);
        let rank_b = known.get(b.facility_key.as_str()).map(|(rank, _)| *rank);
        (rank_a.is_none(), rank_a, &a.facility_key, a.row, a.check_in, a.reservation_id).cmp(&(
            rank_b.is_none(),
            rank_b,
            &b.facility_key,
            b.row,
            b.check_in,
            b.reservation_id,
        ))
    });

    let week_lanes = lanes_per_week(&entries);
    tracing::debug!(
        entries = entries.len(),
        skipped = skipped.len(),
        "assembled layout"
    );

    Layout {
        window,
        entries,
        skipped,
        week_lanes,
    }
}
