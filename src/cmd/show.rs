use super::ViewArgs;
use anyhow::Result;
use staygrid::calc::{Layout, LayoutEntry, Segment, ViewMode};
use std::path::Path;

pub fn run(dir: &Path, args: &ViewArgs) -> Result<()> {
    let layout = super::compute(dir, args)?;
    write_summary(&layout, &mut std::io::stdout())
}

fn markers(entry: &LayoutEntry, segment: &Segment) -> String {
    let mut marks = Vec::new();
    if !segment.is_first_day {
        marks.push("<<");
    }
    if segment.is_first_day && entry.conflicts.has_check_in_conflict {
        marks.push("turnover-in");
    }
    if segment.is_last_day && entry.conflicts.has_check_out_conflict {
        marks.push("turnover-out");
    }
    if !segment.is_last_day {
        marks.push(">>");
    }
    if entry.dimmed {
        marks.push("(cancelled)");
    }
    marks.join(" ")
}

pub(crate) fn write_summary<W: std::io::Write>(layout: &Layout, out: &mut W) -> Result<()> {
    let window = &layout.window;
    let title = match window.mode {
        ViewMode::Month => window.reference_date.format("%B %Y").to_string(),
        ViewMode::Week => format!("week of {}", window.first_day()),
    };
    writeln!(out, "Reservations for {}", title)?;
    writeln!(
        out,
        "Range: [{} - {}]",
        window.first_day().format("%Y-%m-%d"),
        window.last_day().format("%Y-%m-%d")
    )?;

    for week in &window.weeks {
        writeln!(out, "---")?;
        writeln!(
            out,
            "Week {} ({} - {})",
            week.index + 1,
            week.start().format("%m-%d"),
            week.end().format("%m-%d")
        )?;
        let mut any = false;
        for entry in layout.entries_in_week(week.index) {
            for segment in entry.segments.iter().filter(|s| s.week_index == week.index) {
                let (start, end) = segment.dates(window);
                writeln!(
                    out,
                    "  {:<20} {:>4} {:<20} {} - {} {}",
                    entry.facility_display_name,
                    entry.row,
                    entry.display_name,
                    start.format("%m-%d"),
                    end.format("%m-%d"),
                    markers(entry, segment)
                )?;
                any = true;
            }
        }
        if !any {
            writeln!(out, "  (no stays)")?;
        }
    }

    if !layout.skipped.is_empty() {
        writeln!(out, "---")?;
        writeln!(out, "Skipped")?;
        for skipped in &layout.skipped {
            writeln!(out, "  #{:<8} {}", skipped.reservation_id, skipped.reason)?;
        }
    }

    let excluded = layout.skipped.iter().filter(|s| s.is_excluded()).count();
    writeln!(out, "---")?;
    writeln!(
        out,
        "Total: {} stay(s), {} skipped",
        layout.entries.len(),
        excluded
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use staygrid::calc::{compute_layout, LayoutFilters, LayoutInput};
    use staygrid::data::{Facility, RawReservation};

    fn summary(reservations: &[RawReservation], facilities: &[Facility], mode: ViewMode) -> String {
        let input = LayoutInput {
            reservations,
            facilities,
            reference_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            mode,
            filters: LayoutFilters::default(),
            placeholder_name: "Unknown",
        };
        let mut buf = Vec::new();
        write_summary(&compute_layout(&input), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_summary_empty() {
        let out = summary(&[], &[], ViewMode::Month);
        assert!(out.contains("Reservations for January 2025"));
        assert!(out.contains("Range: [2024-12-29 - 2025-02-01]"));
        assert!(out.contains("Week 5 (01-26 - 02-01)"));
        assert!(out.contains("(no stays)"));
        assert!(out.contains("Total: 0 stay(s), 0 skipped"));
    }

    #[test]
    fn test_write_summary_turnover_markers() {
        let reservations = vec![
            RawReservation::new(1, "Tanaka", "A", "2025-01-13", "2025-01-15"),
            RawReservation::new(2, "Sato", "A", "2025-01-15", "2025-01-17"),
        ];
        let out = summary(&reservations, &[], ViewMode::Week);
        assert!(out.contains("week of 2025-01-12"));
        assert!(out.contains("Tanaka"));
        assert!(out.contains("turnover-out"));
        assert!(out.contains("turnover-in"));
        assert!(out.contains("Total: 2 stay(s), 0 skipped"));
    }

    #[test]
    fn test_write_summary_continuation_markers() {
        let reservations = vec![RawReservation::new(1, "Long", "A", "2025-01-09", "2025-01-21")];
        let out = summary(&reservations, &[], ViewMode::Month);
        assert!(out.contains("01-09 - 01-11 >>"));
        assert!(out.contains("01-12 - 01-18 << >>"));
        assert!(out.contains("01-19 - 01-21 <<"));
    }

    #[test]
    fn test_write_summary_lists_skipped() {
        let facilities = vec![Facility::new(1, "A", Some("Villa"))];
        let reservations = vec![
            RawReservation::new(1, "Tanaka", "A", "2025-01-13", "2025-01-15"),
            RawReservation::new(2, "Sato", "A", "not-a-date", "2025-01-17"),
            RawReservation::new(3, "Kato", "Z", "2025-01-13", "2025-01-14"),
        ];
        let out = summary(&reservations, &facilities, ViewMode::Week);
        assert!(out.contains("[Villa] A"));
        assert!(out.contains("Skipped"));
        assert!(out.contains("not-a-date"));
        assert!(out.contains("no facility named \"Z\""));
        assert!(out.contains("Total: 2 stay(s), 1 skipped"));
    }
}
