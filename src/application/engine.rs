use crate::domain::candidate::CandidateRoster;
use crate::domain::credential;
use crate::domain::ports::BallotStoreBox;
use crate::domain::tally::ElectionResults;
use crate::domain::voter::{NewVoter, Voter};
use crate::error::{ConflictField, Result, VotingError};

/// How many fresh seeds to try when a derived credential collides with one
/// already in the store. Collisions on a 64-bit token are effectively
/// theoretical; this bound just keeps the loop finite.
const CREDENTIAL_RETRIES: usize = 5;

/// The main entry point for the voting application.
///
/// `VotingEngine` coordinates registration and vote casting against a single
/// transactional ballot store, validating requests before delegating the
/// atomic tally-increment-and-flag-flip to the store.
pub struct VotingEngine {
    store: BallotStoreBox,
    roster: CandidateRoster,
}

impl VotingEngine {
    /// Creates an engine over the given store with the default candidate
    /// roster.
    pub fn new(store: BallotStoreBox) -> Self {
        Self::with_roster(store, CandidateRoster::default())
    }

    pub fn with_roster(store: BallotStoreBox, roster: CandidateRoster) -> Self {
        Self { store, roster }
    }

    pub fn roster(&self) -> &CandidateRoster {
        &self.roster
    }

    /// Registers a voter and returns the stored record, including the issued
    /// credential for the registrant to save.
    ///
    /// Credential generation happens here, before the immutable record is
    /// built, and is retried internally with a fresh seed if the store
    /// reports a derived-credential collision. Duplicate email or external
    /// id surfaces as `Conflict` to the caller.
    pub async fn register(
        &self,
        firstname: &str,
        lastname: &str,
        email: &str,
        external_id: &str,
    ) -> Result<Voter> {
        for _ in 0..CREDENTIAL_RETRIES {
            let token = credential::generate(firstname, lastname, email, external_id);
            let voter = NewVoter {
                firstname: firstname.to_string(),
                lastname: lastname.to_string(),
                email: email.to_string(),
                external_id: external_id.to_string(),
                credential: token,
            };
            match self.store.insert(voter).await {
                // Derived-credential collision: draw a fresh seed and retry.
                Err(VotingError::Conflict(ConflictField::Credential)) => continue,
                other => return other,
            }
        }
        Err(VotingError::Conflict(ConflictField::Credential))
    }

    /// Lists all registered voters, for administrative display.
    pub async fn list_voters(&self) -> Result<Vec<Voter>> {
        self.store.all_voters().await
    }

    /// Casts a vote for `candidate` on behalf of the voter holding
    /// `credential`.
    ///
    /// Fails with `InvalidCredential` for an unknown credential,
    /// `AlreadyVoted` if the credential was already used (including losing a
    /// concurrent race, which the store decides), and `InvalidCandidate` for
    /// a choice outside the roster. No state changes on failure.
    pub async fn cast_vote(&self, credential: &str, candidate: &str) -> Result<()> {
        let voter = self
            .store
            .find_by_credential(credential)
            .await?
            .ok_or(VotingError::InvalidCredential)?;

        if voter.has_voted {
            return Err(VotingError::AlreadyVoted);
        }
        if !self.roster.contains(candidate) {
            return Err(VotingError::InvalidCandidate(candidate.to_string()));
        }

        // The store re-checks has_voted under its own write path, so two
        // racing calls with the same credential can both reach this point
        // but only one commits.
        self.store.record_vote(voter.id, candidate).await
    }

    /// Current tallies and winner. Ties are reported in full.
    pub async fn results(&self) -> Result<ElectionResults> {
        let tallies = self.store.all_tallies().await?;
        Ok(ElectionResults::from_tallies(tallies))
    }
}
