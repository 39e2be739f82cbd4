use super::tally::Tally;
use super::voter::{NewVoter, Voter};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait VoterStore: Send + Sync {
    /// Persists a new voter, assigning its surrogate id.
    ///
    /// Fails with `Conflict` if the email, external id, or credential is
    /// already taken.
    async fn insert(&self, voter: NewVoter) -> Result<Voter>;
    async fn find_by_credential(&self, credential: &str) -> Result<Option<Voter>>;
    async fn all_voters(&self) -> Result<Vec<Voter>>;
}

#[async_trait]
pub trait TallyStore: Send + Sync {
    async fn find_by_candidate(&self, name: &str) -> Result<Option<Tally>>;
    async fn all_tallies(&self) -> Result<Vec<Tally>>;
}

/// Both tables live in one transactional store so that the vote-casting
/// write spans them atomically.
#[async_trait]
pub trait BallotStore: VoterStore + TallyStore {
    /// Records a vote as one atomic unit: verifies the voter has not voted,
    /// increments the candidate's tally (creating the row if absent), and
    /// flips `has_voted`.
    ///
    /// This is the serialization point for concurrent votes with the same
    /// credential: exactly one caller wins, the rest get `AlreadyVoted`.
    /// Fails with `InvalidCredential` if the voter id is unknown. On any
    /// failure neither table is modified.
    async fn record_vote(&self, voter_id: u64, candidate: &str) -> Result<()>;
}

pub type BallotStoreBox = Box<dyn BallotStore>;
