use super::ViewArgs;
use anyhow::Result;
use staygrid::calc::Layout;
use std::path::Path;

pub fn run(dir: &Path, args: &ViewArgs) -> Result<()> {
    let layout = super::compute(dir, args)?;
    write_layout_json(&layout, &mut std::io::stdout())
}

pub(crate) fn write_layout_json<W: std::io::Write>(layout: &Layout, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, layout)?;
    writeln!(out)?;
    Ok(())
}
