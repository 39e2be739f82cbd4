use crate::domain::ports::{BallotStore, TallyStore, VoterStore};
use crate::domain::tally::Tally;
use crate::domain::voter::{NewVoter, Voter};
use crate::error::{ConflictField, Result, VotingError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct State {
    voters: HashMap<u64, Voter>,
    // BTreeMap keeps tally listings in a stable order.
    tallies: BTreeMap<String, u64>,
    next_id: u64,
}

/// A thread-safe in-memory ballot store.
///
/// A single `Arc<RwLock<State>>` covers both tables, so `record_vote` holds
/// one write guard across the voted-check, the tally increment, and the flag
/// flip. Ideal for tests and single-process deployments without persistence.
#[derive(Default, Clone)]
pub struct InMemoryBallotStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryBallotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoterStore for InMemoryBallotStore {
    async fn insert(&self, voter: NewVoter) -> Result<Voter> {
        let mut state = self.state.write().await;

        for existing in state.voters.values() {
            if existing.email == voter.email {
                return Err(VotingError::Conflict(ConflictField::Email));
            }
            if existing.external_id == voter.external_id {
                return Err(VotingError::Conflict(ConflictField::ExternalId));
            }
            if existing.credential == voter.credential {
                return Err(VotingError::Conflict(ConflictField::Credential));
            }
        }

        state.next_id += 1;
        let id = state.next_id;
        let voter = voter.into_voter(id);
        state.voters.insert(id, voter.clone());
        Ok(voter)
    }

    async fn find_by_credential(&self, credential: &str) -> Result<Option<Voter>> {
        let state = self.state.read().await;
        Ok(state
            .voters
            .values()
            .find(|v| v.credential == credential)
            .cloned())
    }

    async fn all_voters(&self) -> Result<Vec<Voter>> {
        let state = self.state.read().await;
        let mut voters: Vec<Voter> = state.voters.values().cloned().collect();
        voters.sort_by_key(|v| v.id);
        Ok(voters)
    }
}

#[async_trait]
impl TallyStore for InMemoryBallotStore {
    async fn find_by_candidate(&self, name: &str) -> Result<Option<Tally>> {
        let state = self.state.read().await;
        Ok(state.tallies.get(name).map(|&votes| Tally {
            candidate_name: name.to_string(),
            votes,
        }))
    }

    async fn all_tallies(&self) -> Result<Vec<Tally>> {
        let state = self.state.read().await;
        Ok(state
            .tallies
            .iter()
            .map(|(name, &votes)| Tally {
                candidate_name: name.clone(),
                votes,
            })
            .collect())
    }
}

#[async_trait]
impl BallotStore for InMemoryBallotStore {
    async fn record_vote(&self, voter_id: u64, candidate: &str) -> Result<()> {
        let mut state = self.state.write().await;

        match state.voters.get(&voter_id) {
            None => return Err(VotingError::InvalidCredential),
            Some(voter) if voter.has_voted => return Err(VotingError::AlreadyVoted),
            Some(_) => {}
        }

        // Both writes happen under the same guard; nothing partial is
        // ever observable.
        *state.tallies.entry(candidate.to_string()).or_insert(0) += 1;
        if let Some(voter) = state.voters.get_mut(&voter_id) {
            voter.has_voted = true;
        }
        Ok(())
    }
}
