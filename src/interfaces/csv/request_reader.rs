use crate::error::{Result, VotingError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Register,
    Vote,
}

/// One row of the batch request file.
///
/// `register` rows carry the four identity fields; `vote` rows carry a
/// credential and a candidate. Everything is optional at the CSV level and
/// validated when the row is dispatched.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct Request {
    pub action: RequestKind,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub external_id: Option<String>,
    pub credential: Option<String>,
    pub candidate: Option<String>,
}

/// Reads voting requests from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths,
/// yielding `Result<Request>` lazily so large files stream.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn requests(self) -> impl Iterator<Item = Result<Request>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(VotingError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "action, firstname, lastname, email, external_id, credential, candidate";

    #[test]
    fn test_reader_register_row() {
        let data = format!("{HEADER}\nregister, alice, smith, alice@x.edu, H001, , ");
        let reader = RequestReader::new(data.as_bytes());
        let rows: Vec<Result<Request>> = reader.requests().collect();

        assert_eq!(rows.len(), 1);
        let req = rows[0].as_ref().unwrap();
        assert_eq!(req.action, RequestKind::Register);
        assert_eq!(req.firstname.as_deref(), Some("alice"));
        assert_eq!(req.external_id.as_deref(), Some("H001"));
        assert_eq!(req.candidate, None);
    }

    #[test]
    fn test_reader_vote_row() {
        let data = format!("{HEADER}\nvote, , , , , a1b2c3d4e5f60718, Ian Park");
        let reader = RequestReader::new(data.as_bytes());
        let rows: Vec<Result<Request>> = reader.requests().collect();

        let req = rows[0].as_ref().unwrap();
        assert_eq!(req.action, RequestKind::Vote);
        assert_eq!(req.credential.as_deref(), Some("a1b2c3d4e5f60718"));
        assert_eq!(req.candidate.as_deref(), Some("Ian Park"));
    }

    #[test]
    fn test_reader_malformed_action() {
        let data = format!("{HEADER}\naudit, , , , , , ");
        let reader = RequestReader::new(data.as_bytes());
        let rows: Vec<Result<Request>> = reader.requests().collect();

        assert!(rows[0].is_err());
    }
}
