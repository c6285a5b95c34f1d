use crate::data::facility::Facility;
use crate::data::persistence::Persistable;
use serde::{Deserialize, Serialize};

/// Booking state as delivered by the reservation feed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    #[serde(alias = "予約")]
    Booked,
    #[serde(alias = "キャンセル", alias = "canceled")]
    Cancelled,
    #[serde(alias = "変更")]
    Modified,
    #[serde(other)]
    Other,
}

/// One reservation exactly as fetched. Dates stay raw strings until normalization.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RawReservation {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    /// Calendar title in the form `"Guest (extra)"`, used when `guest_name` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub room_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility: Option<Facility>,
    #[serde(rename = "check_in_date", alias = "start", default)]
    pub check_in_raw: String,
    #[serde(rename = "check_out_date", alias = "end", default)]
    pub check_out_raw: String,
    #[serde(rename = "reservation_type", alias = "status", default)]
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ota_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<u32>,
}

impl RawReservation {
    pub fn new(id: u64, guest_name: &str, room_type: &str, check_in: &str, check_out: &str) -> Self {
        RawReservation {
            id,
            guest_name: Some(guest_name.to_string()),
            room_type: room_type.to_string(),
            check_in_raw: check_in.to_string(),
            check_out_raw: check_out.to_string(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// The linked facility's name when present, otherwise the room type.
    pub fn facility_key(&self) -> &str {
        match &self.facility {
            Some(f) if !f.name.is_empty() => &f.name,
            _ => &self.room_type,
        }
    }

    /// True if `key` names either the room type or the linked facility.
    pub fn matches_facility(&self, key: &str) -> bool {
        self.room_type == key || self.facility.as_ref().is_some_and(|f| f.name == key)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ReservationStatus::Cancelled
    }
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct ReservationData {
    pub reservations: Vec<RawReservation>,
}

impl Persistable for ReservationData {
    fn filename() -> &'static str {
        "reservations.json"
    }
}

impl ReservationData {
    pub fn add(&mut self, reservation: RawReservation) {
        self.reservations.push(reservation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_fields() {
        let r = RawReservation::new(7, "Tanaka", "Villa A", "2025-01-01", "2025-01-05");
        assert_eq!(r.id, 7);
        assert_eq!(r.guest_name.as_deref(), Some("Tanaka"));
        assert_eq!(r.room_type, "Villa A");
        assert_eq!(r.check_in_raw, "2025-01-01");
        assert_eq!(r.check_out_raw, "2025-01-05");
        assert_eq!(r.status, ReservationStatus::Booked);
    }

    #[test]
    fn test_facility_key_prefers_linked_facility() {
        let mut r = RawReservation::new(1, "A", "Ocean Room", "2025-01-01", "2025-01-02");
        assert_eq!(r.facility_key(), "Ocean Room");
        r.facility = Some(Facility::new(9, "Villa A", None));
        assert_eq!(r.facility_key(), "Villa A");
    }

    #[test]
    fn test_facility_key_ignores_blank_linked_name() {
        let mut r = RawReservation::new(1, "A", "Ocean Room", "2025-01-01", "2025-01-02");
        r.facility = Some(Facility::new(9, "", None));
        assert_eq!(r.facility_key(), "Ocean Room");
    }

    #[test]
    fn test_matches_facility_checks_both_names() {
        let mut r = RawReservation::new(1, "A", "Ocean Room", "2025-01-01", "2025-01-02");
        r.facility = Some(Facility::new(9, "Villa A", None));
        assert!(r.matches_facility("Ocean Room"));
        assert!(r.matches_facility("Villa A"));
        assert!(!r.matches_facility("Villa B"));
    }

    #[test]
    fn test_status_accepts_feed_labels() {
        let parse = |s: &str| -> ReservationStatus {
            serde_json::from_str(&format!("\"{s}\"")).unwrap()
        };
        assert_eq!(parse("booked"), ReservationStatus::Booked);
        assert_eq!(parse("予約"), ReservationStatus::Booked);
        assert_eq!(parse("cancelled"), ReservationStatus::Cancelled);
        assert_eq!(parse("canceled"), ReservationStatus::Cancelled);
        assert_eq!(parse("キャンセル"), ReservationStatus::Cancelled);
        assert_eq!(parse("変更"), ReservationStatus::Modified);
        assert_eq!(parse("no-show"), ReservationStatus::Other);
    }

    #[test]
    fn test_deserialize_feed_record() {
        let json = r#"{
            "id": 42,
            "guest_name": "Suzuki",
            "room_type": "Villa A",
            "start": "2025-01-28",
            "end": "2025-02-03T10:00:00",
            "reservation_type": "キャンセル",
            "ota_name": "Booking.com",
            "guest_count": 3
        }"#;
        let r: RawReservation = serde_json::from_str(json).unwrap();
        assert_eq!(r.id, 42);
        assert_eq!(r.check_in_raw, "2025-01-28");
        assert_eq!(r.check_out_raw, "2025-02-03T10:00:00");
        assert!(r.is_cancelled());
        assert_eq!(r.ota_name.as_deref(), Some("Booking.com"));
        assert_eq!(r.guest_count, Some(3));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let r: RawReservation = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(r.guest_name.is_none());
        assert!(r.check_in_raw.is_empty());
        assert_eq!(r.status, ReservationStatus::Booked);
    }

    #[test]
    fn test_add_inserts_reservation() {
        let mut data = ReservationData::default();
        data.add(RawReservation::new(1, "A", "Villa A", "2025-01-01", "2025-01-02"));
        assert_eq!(data.reservations.len(), 1);
    }
}
