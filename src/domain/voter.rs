use serde::{Deserialize, Serialize};

/// A registered voter.
///
/// The record is immutable after creation except for the single
/// `has_voted` flip, which only ever goes from `false` to `true`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Voter {
    /// Surrogate identifier, assigned by the store on insert.
    pub id: u64,
    pub firstname: String,
    pub lastname: String,
    /// Unique across all voters.
    pub email: String,
    /// Institutional identifier, unique across all voters.
    pub external_id: String,
    /// Opaque secret token the voter presents to cast a vote.
    /// Unique across all voters, derived once at registration.
    pub credential: String,
    pub has_voted: bool,
}

/// Registration data plus the derived credential, as handed to the store.
/// The store assigns the surrogate id and sets `has_voted` to false.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NewVoter {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub external_id: String,
    pub credential: String,
}

impl NewVoter {
    pub fn into_voter(self, id: u64) -> Voter {
        Voter {
            id,
            firstname: self.firstname,
            lastname: self.lastname,
            email: self.email,
            external_id: self.external_id,
            credential: self.credential,
            has_voted: false,
        }
    }
}
