use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
}

/// One Sunday-to-Saturday row of the grid.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Week {
    pub index: usize,
    pub days: [NaiveDate; 7],
}

impl Week {
    pub fn start(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn end(&self) -> NaiveDate {
        self.days[6]
    }

    /// Day-of-week offset of `date` within this week (0 = Sunday).
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        if date < self.start() || date > self.end() {
            return None;
        }
        Some((date - self.start()).num_days() as usize)
    }
}

/// The contiguous run of days a layout is computed for, always whole weeks.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LayoutWindow {
    pub mode: ViewMode,
    pub reference_date: NaiveDate,
    pub days: Vec<NaiveDate>,
    pub weeks: Vec<Week>,
}

impl LayoutWindow {
    pub fn first_day(&self) -> NaiveDate {
        self.weeks[0].start()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.weeks[self.weeks.len() - 1].end()
    }

    pub fn intersects(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.last_day() && end >= self.first_day()
    }
}

/// Reference dates are clamped into this range so every grid day exists.
/// Forty days covers the month containing the date plus the partial weeks
/// on either side.
const EDGE_MARGIN: Days = Days::new(40);

/// The Sunday on or before `date`, or `NaiveDate::MIN` when that Sunday is
/// not representable.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(date.weekday().num_days_from_sunday() as u64))
        .unwrap_or(NaiveDate::MIN)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next_month| next_month.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

fn supported_reference(date: NaiveDate) -> NaiveDate {
    let earliest = NaiveDate::MIN
        .checked_add_days(EDGE_MARGIN)
        .unwrap_or(NaiveDate::MIN);
    let latest = NaiveDate::MAX
        .checked_sub_days(EDGE_MARGIN)
        .unwrap_or(NaiveDate::MAX);
    date.clamp(earliest, latest)
}

fn six_days_after(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX)
}

/// Builds the grid for `reference_date`. Total over every `NaiveDate`: dates
/// within a month of chrono's range limits are clamped inward first, and the
/// window reports the clamped reference date.
pub fn build_window(reference_date: NaiveDate, mode: ViewMode) -> LayoutWindow {
    let reference = supported_reference(reference_date);
    if reference != reference_date {
        tracing::warn!(%reference_date, %reference, "reference date clamped into supported range");
    }

    let (grid_start, grid_end) = match mode {
        ViewMode::Month => (
            week_start(first_of_month(reference)),
            six_days_after(week_start(last_of_month(reference))),
        ),
        ViewMode::Week => {
            let start = week_start(reference);
            (start, six_days_after(start))
        }
    };

    let days: Vec<NaiveDate> = grid_start
        .iter_days()
        .take_while(|d| *d <= grid_end)
        .collect();
    let weeks: Vec<Week> = days
        .chunks_exact(7)
        .filter_map(|chunk| <[NaiveDate; 7]>::try_from(chunk).ok())
        .enumerate()
        .map(|(index, days)| Week { index, days })
        .collect();

    debug_assert!(!days.is_empty(), "layout window has no days");
    debug_assert_eq!(days.len() % 7, 0, "layout window is not whole weeks");
    debug_assert_eq!(weeks.len() * 7, days.len());

    tracing::debug!(
        ?mode,
        %reference,
        first = %grid_start,
        last = %grid_end,
        weeks = weeks.len(),
        "built layout window"
    );

    LayoutWindow {
        mode,
        reference_date: reference,
        days,
        weeks,
    }
}
