use crate::domain::voter::Voter;
use crate::error::Result;
use std::io::Write;

/// Writes the voter roll as CSV, one row per voter, including the issued
/// credential so the operator can hand it back to the registrant.
pub struct VoterWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> VoterWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_voters(&mut self, voters: Vec<Voter>) -> Result<()> {
        for voter in voters {
            self.writer.serialize(voter)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
