use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    CheckIn,
    CheckOut,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::CheckIn => write!(f, "check-in"),
            DateField::CheckOut => write!(f, "check-out"),
        }
    }
}

/// Why a single reservation could not be normalized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("unparseable {field} date {raw:?}")]
    InvalidDate { field: DateField, raw: String },

    #[error("check-out {check_out} is before check-in {check_in}")]
    InvertedRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipKind {
    /// Excluded from the layout: unparseable date or check-out before check-in.
    InvalidDate,
    /// Still laid out under its raw key; reported for diagnostics only.
    UnknownFacility,
}

/// A diagnostic about one input record, surfaced to the UI as a warning.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SkippedEntry {
    pub reservation_id: u64,
    pub kind: SkipKind,
    pub reason: String,
}

impl SkippedEntry {
    pub fn invalid(reservation_id: u64, err: &NormalizeError) -> Self {
        SkippedEntry {
            reservation_id,
            kind: SkipKind::InvalidDate,
            reason: err.to_string(),
        }
    }

    pub fn unknown_facility(reservation_id: u64, facility_key: &str) -> Self {
        SkippedEntry {
            reservation_id,
            kind: SkipKind::UnknownFacility,
            reason: format!("no facility named {facility_key:?}"),
        }
    }

    /// False for diagnostics whose record is still part of the layout.
    pub fn is_excluded(&self) -> bool {
        self.kind == SkipKind::InvalidDate
    }
}
