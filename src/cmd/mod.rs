pub mod facilities;
pub mod init;
pub mod layout;
pub mod show;

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use staygrid::calc::{compute_layout, Layout, LayoutFilters, LayoutInput, ViewMode};
use staygrid::data::{AppSettings, FacilityData, Persistable, ReservationData};
use std::path::Path;

/// Flags shared by every command that computes a layout.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,
    /// Grid to lay out; defaults to `default_mode` in config.yaml
    #[arg(long, value_enum)]
    pub mode: Option<ViewMode>,
    /// Include cancelled reservations, drawn dimmed
    #[arg(long)]
    pub show_cancelled: bool,
    /// Only show stays for this room type or facility name
    #[arg(long)]
    pub facility: Option<String>,
}

pub(crate) fn reference_date(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        None => Ok(Local::now().date_naive()),
        Some(raw) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Ok(date),
            Err(_) => bail!("Invalid --date '{}', expected YYYY-MM-DD.", raw),
        },
    }
}

/// Loads the data directory and computes the layout the flags ask for.
/// Flags win over config.yaml settings.
pub(crate) fn compute(dir: &Path, args: &ViewArgs) -> Result<Layout> {
    let settings = AppSettings::load_from(dir)?;
    let facility_data = FacilityData::load_from(dir)?;
    let reservation_data = ReservationData::load_from(dir)?;

    let input = LayoutInput {
        reservations: &reservation_data.reservations,
        facilities: &facility_data.facilities,
        reference_date: reference_date(args.date.as_deref())?,
        mode: args.mode.unwrap_or(settings.default_mode),
        filters: LayoutFilters {
            include_cancelled: args.show_cancelled || settings.show_cancelled,
            facility: args.facility.clone(),
        },
        placeholder_name: &settings.placeholder_name,
    };
    Ok(compute_layout(&input))
}
