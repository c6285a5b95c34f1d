pub mod app_settings;
pub mod facility;
pub mod persistence;
pub mod reservation;

pub use app_settings::AppSettings;
pub use facility::{Facility, FacilityData};
pub use persistence::Persistable;
pub use reservation::{RawReservation, ReservationData, ReservationStatus};
