use crate::calc::error::{DateField, NormalizeError, SkippedEntry};
use crate::data::{RawReservation, ReservationStatus};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// ISO 8601 offset forms outside RFC 3339: no seconds, `+hhmm`, `+hh`.
const OFFSET_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

const DATE_TIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// A reservation with comparable, day-precision dates. Built fresh per layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedReservation {
    pub id: u64,
    /// Position in the filtered input; breaks ordering ties.
    pub seq: usize,
    pub facility_key: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub display_name: String,
    pub status: ReservationStatus,
    pub ota_name: Option<String>,
    pub guest_count: Option<u32>,
}

impl NormalizedReservation {
    /// Check-in and check-out fall on the same calendar date.
    pub fn is_same_day(&self) -> bool {
        self.check_in == self.check_out
    }
}

/// Parses a date or date-time string, truncated to the calendar date.
/// Offsets are respected: the date is the one local to the given offset.
pub fn parse_stay_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = OFFSET_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date_naive());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Guest name, else the guest part of the title, else `placeholder`.
pub fn display_name(reservation: &RawReservation, placeholder: &str) -> String {
    let from_guest = reservation
        .guest_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let from_title = || {
        reservation
            .title
            .as_deref()
            .and_then(|t| t.split(" (").next())
            .map(str::trim)
            .filter(|n| !n.is_empty())
    };
    from_guest
        .or_else(from_title)
        .unwrap_or(placeholder)
        .to_string()
}

pub fn normalize_reservation(
    reservation: &RawReservation,
    seq: usize,
    placeholder: &str,
) -> Result<NormalizedReservation, NormalizeError> {
    let check_in =
        parse_stay_date(&reservation.check_in_raw).ok_or_else(|| NormalizeError::InvalidDate {
            field: DateField::CheckIn,
            raw: reservation.check_in_raw.clone(),
        })?;
    let check_out =
        parse_stay_date(&reservation.check_out_raw).ok_or_else(|| NormalizeError::InvalidDate {
            field: DateField::CheckOut,
            raw: reservation.check_out_raw.clone(),
        })?;
    if check_out < check_in {
        return Err(NormalizeError::InvertedRange {
            check_in,
            check_out,
        });
    }

    Ok(NormalizedReservation {
        id: reservation.id,
        seq,
        facility_key: reservation.facility_key().to_string(),
        check_in,
        check_out,
        display_name: display_name(reservation, placeholder),
        status: reservation.status,
        ota_name: reservation.ota_name.clone(),
        guest_count: reservation.guest_count,
    })
}

/// Normalizes every record; malformed ones come back as `invalid_date` entries.
pub fn normalize_reservations(
    filtered: &[&RawReservation],
    placeholder: &str,
) -> (Vec<NormalizedReservation>, Vec<SkippedEntry>) {
    let mut normalized = Vec::with_capacity(filtered.len());
    let mut skipped = Vec::new();

    for (seq, reservation) in filtered.iter().enumerate() {
        match normalize_reservation(reservation, seq, placeholder) {
            Ok(n) => normalized.push(n),
            Err(err) => {
                tracing::warn!(id = reservation.id, error = %err, "skipping reservation");
                skipped.push(SkippedEntry::invalid(reservation.id, &err));
            }
        }
    }

    tracing::debug!(
        normalized = normalized.len(),
        skipped = skipped.len(),
        "normalized reservations"
    );
    (normalized, skipped)
}
