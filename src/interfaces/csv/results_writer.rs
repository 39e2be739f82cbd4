use crate::domain::tally::ElectionResults;
use crate::error::Result;
use std::io::Write;

/// Writes election results as CSV: the sorted tallies, then a final
/// `winner` row (`winner,<name>`, one row per tied candidate, or
/// `winner,none` when no votes were cast).
pub struct ResultsWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ResultsWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_results(&mut self, results: &ElectionResults) -> Result<()> {
        self.writer.write_record(["candidate", "votes"])?;
        for tally in &results.tallies {
            self.writer
                .write_record([tally.candidate_name.as_str(), &tally.votes.to_string()])?;
        }

        use crate::domain::tally::Winner;
        match &results.winner {
            Winner::None => self.writer.write_record(["winner", "none"])?,
            Winner::Single(name) => self.writer.write_record(["winner", name])?,
            Winner::Tie(names) => {
                for name in names {
                    self.writer.write_record(["winner", name])?;
                }
            }
        }

        self.writer.flush()?;
        Ok(())
    }
}
