//! JSON Converter - writes a density report as pretty-printed JSON.

use std::io::Write;

use crate::density::DensityReport;
use crate::error::Result;

pub struct JsonConverter<'a, W: Write> {
    outfp: &'a mut W,
}

impl<'a, W: Write> JsonConverter<'a, W> {
    pub fn new(outfp: &'a mut W) -> Self {
        Self { outfp }
    }

    pub fn receive_report(&mut self, report: &DensityReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut *self.outfp, report)?;
        self.outfp.write_all(b"\n")?;
        self.outfp.flush()?;
        Ok(())
    }
}
