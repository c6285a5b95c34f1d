use anyhow::Result;
use staygrid::data::{FacilityData, Persistable};
use std::path::Path;

pub fn run(dir: &Path) -> Result<()> {
    let facility_data = FacilityData::load_from(dir)?;
    write_facilities(&facility_data, &mut std::io::stdout())
}

pub(crate) fn write_facilities<W: std::io::Write>(data: &FacilityData, out: &mut W) -> Result<()> {
    writeln!(out, "Facilities")?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<6} {}", "Id", "Name")?;
    for f in data.sorted() {
        writeln!(out, "  {:<6} {}", f.id, f.display_name())?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} facility(ies)", data.facilities.len())?;
    Ok(())
}
