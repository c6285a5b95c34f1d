use anyhow::Result;
use chrono::{Days, Local, NaiveDate};
use staygrid::calc::window::first_of_month;
use staygrid::data::{
    AppSettings, Facility, FacilityData, Persistable, RawReservation, ReservationData,
    ReservationStatus,
};
use std::fs;
use std::path::Path;

pub fn run(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    run_in_dir(dir, Local::now().date_naive())?;
    println!("Data files initialized successfully.");
    Ok(())
}

/// Writes all default data files into `dir`. Sample stays are placed in the
/// month containing `today` so the default view is not empty.
pub(crate) fn run_in_dir(dir: &Path, today: NaiveDate) -> Result<()> {
    AppSettings::default().save_to(dir)?;
    sample_facilities().save_to(dir)?;
    sample_reservations(first_of_month(today)).save_to(dir)?;
    tracing::info!(dir = %dir.display(), "wrote sample data files");
    Ok(())
}

fn sample_facilities() -> FacilityData {
    let mut data = FacilityData::default();
    data.add(Facility::new(1, "Ocean Villa", Some("Villa")));
    data.add(Facility::new(2, "Forest Villa", Some("Villa")));
    data.add(Facility::new(3, "Cabin", None));
    data
}

fn stay(id: u64, guest: &str, room: &str, month_start: NaiveDate, from: u64, nights: u64) -> RawReservation {
    let check_in = month_start + Days::new(from);
    let check_out = check_in + Days::new(nights);
    RawReservation::new(
        id,
        guest,
        room,
        &check_in.format("%Y-%m-%d").to_string(),
        &check_out.format("%Y-%m-%d").to_string(),
    )
}

fn sample_reservations(month_start: NaiveDate) -> ReservationData {
    let mut data = ReservationData::default();
    // turnover on the 5th
    data.add(stay(1001, "Tanaka", "Ocean Villa", month_start, 1, 3));
    data.add(stay(1002, "Sato", "Ocean Villa", month_start, 4, 3));
    data.add(stay(1003, "Suzuki", "Ocean Villa", month_start, 5, 4));
    data.add(stay(1004, "Kato", "Forest Villa", month_start, 8, 9));
    data.add(stay(1005, "Ito", "Cabin", month_start, 11, 0));
    data.add(stay(1006, "Yamada", "Cabin", month_start, 20, 2).with_status(ReservationStatus::Cancelled));

    let mut titled = stay(1007, "", "Cabin", month_start, 24, 3);
    titled.guest_name = None;
    titled.title = Some("Nakamura (Booking.com)".to_string());
    titled.ota_name = Some("Booking.com".to_string());
    titled.guest_count = Some(2);
    data.add(titled);
    data
}
