use crate::calc::window::{LayoutWindow, Week};
use chrono::NaiveDate;
use serde::Serialize;

const CELL: f64 = 1.0 / 7.0;

/// The part of a stay's bar inside one week row.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Segment {
    pub week_index: usize,
    /// Inclusive day-of-week offsets, 0 = Sunday.
    pub start_day_index: usize,
    pub end_day_index: usize,
    /// This segment starts on the real check-in date.
    pub is_first_day: bool,
    /// This segment ends on the real check-out date.
    pub is_last_day: bool,
    /// Bar position as fractions of the week row width.
    pub left: f64,
    pub width: f64,
}

impl Segment {
    /// Absolute dates covered by this segment.
    pub fn dates(&self, window: &LayoutWindow) -> (NaiveDate, NaiveDate) {
        let week = &window.weeks[self.week_index];
        (week.days[self.start_day_index], week.days[self.end_day_index])
    }
}

/// Horizontal extent of a bar: check-in starts at mid-cell (arrival half),
/// check-out ends at mid-cell (departure half). A same-day stay spans the
/// whole cell.
fn bar_extent(start: usize, end: usize, is_first: bool, is_last: bool, same_day: bool) -> (f64, f64) {
    let mut left = start as f64 * CELL;
    let mut right = (end + 1) as f64 * CELL;
    if !same_day {
        if is_first {
            left += CELL / 2.0;
        }
        if is_last {
            right -= CELL / 2.0;
        }
    }
    (left, right - left)
}

fn clip_to_week(week: &Week, check_in: NaiveDate, check_out: NaiveDate) -> Option<Segment> {
    if check_out < week.start() || check_in > week.end() {
        return None;
    }
    let display_start = check_in.max(week.start());
    let display_end = check_out.min(week.end());
    let start_day_index = week.day_index(display_start)?;
    let end_day_index = week.day_index(display_end)?;
    let is_first_day = display_start == check_in;
    let is_last_day = display_end == check_out;
    let (left, width) = bar_extent(
        start_day_index,
        end_day_index,
        is_first_day,
        is_last_day,
        check_in == check_out,
    );

    Some(Segment {
        week_index: week.index,
        start_day_index,
        end_day_index,
        is_first_day,
        is_last_day,
        left,
        width,
    })
}

/// One segment per window week the stay intersects, in week order.
pub fn split_segments(
    check_in: NaiveDate,
    check_out: NaiveDate,
    window: &LayoutWindow,
) -> Vec<Segment> {
    debug_assert!(check_in <= check_out);
    window
        .weeks
        .iter()
        .filter_map(|week| clip_to_week(week, check_in, check_out))
        .collect()
}
