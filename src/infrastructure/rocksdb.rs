use crate::domain::ports::{BallotStore, TallyStore, VoterStore};
use crate::domain::tally::Tally;
use crate::domain::voter::{NewVoter, Voter};
use crate::error::{ConflictField, Result, VotingError};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for voter records, keyed by surrogate id.
pub const CF_VOTERS: &str = "voters";
/// Column Family for per-candidate tallies, keyed by candidate name.
pub const CF_TALLIES: &str = "tallies";
/// Column Family for store metadata (id counter).
pub const CF_META: &str = "meta";

const NEXT_VOTER_ID_KEY: &[u8] = b"next_voter_id";

/// A persistent ballot store backed by RocksDB.
///
/// Voters and tallies live in separate Column Families of one database, and
/// every read-check-then-write path (registration uniqueness, vote casting)
/// runs under a single mutex with the writes committed in one `WriteBatch`.
/// That gives the same all-or-nothing guarantee as the in-memory store's
/// write lock.
///
/// `Clone` shares the underlying `Arc<DB>` and the write mutex.
#[derive(Clone)]
pub struct RocksDbBallotStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDbBallotStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = vec![
            ColumnFamilyDescriptor::new(CF_VOTERS, Options::default()),
            ColumnFamilyDescriptor::new(CF_TALLIES, Options::default()),
            ColumnFamilyDescriptor::new(CF_META, Options::default()),
        ];

        let db = DB::open_cf_descriptors(&opts, path, cfs)?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            VotingError::Internal(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }

    fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| {
            VotingError::Internal(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Deserialization error: {e}"),
            )))
        })
    }

    fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| {
            VotingError::Internal(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {e}"),
            )))
        })
    }

    fn get_voter(&self, id: u64) -> Result<Option<Voter>> {
        let cf = self.cf(CF_VOTERS)?;
        match self.db.get_cf(cf, id.to_be_bytes())? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn next_voter_id(&self) -> Result<u64> {
        let cf = self.cf(CF_META)?;
        let current = match self.db.get_cf(cf, NEXT_VOTER_ID_KEY)? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    VotingError::Internal(Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "corrupt voter id counter",
                    )))
                })?;
                u64::from_be_bytes(raw)
            }
            None => 0,
        };
        Ok(current + 1)
    }
}

#[async_trait]
impl VoterStore for RocksDbBallotStore {
    async fn insert(&self, voter: NewVoter) -> Result<Voter> {
        let _guard = self.write_lock.lock().await;

        let cf = self.cf(CF_VOTERS)?;
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            let existing: Voter = Self::decode(&value)?;
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

        let id = self.next_voter_id()?;
        let voter = voter.into_voter(id);

        let mut batch = WriteBatch::default();
        batch.put_cf(cf, id.to_be_bytes(), Self::encode(&voter)?);
        batch.put_cf(self.cf(CF_META)?, NEXT_VOTER_ID_KEY, id.to_be_bytes());
        self.db.write(batch)?;

        Ok(voter)
    }

    async fn find_by_credential(&self, credential: &str) -> Result<Option<Voter>> {
        let cf = self.cf(CF_VOTERS)?;
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            let voter: Voter = Self::decode(&value)?;
            if voter.credential == credential {
                return Ok(Some(voter));
            }
        }
        Ok(None)
    }

    async fn all_voters(&self) -> Result<Vec<Voter>> {
        let cf = self.cf(CF_VOTERS)?;
        let mut voters = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            voters.push(Self::decode(&value)?);
        }
        Ok(voters)
    }
}

#[async_trait]
impl TallyStore for RocksDbBallotStore {
    async fn find_by_candidate(&self, name: &str) -> Result<Option<Tally>> {
        let cf = self.cf(CF_TALLIES)?;
        match self.db.get_cf(cf, name.as_bytes())? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn all_tallies(&self) -> Result<Vec<Tally>> {
        let cf = self.cf(CF_TALLIES)?;
        let mut tallies = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            tallies.push(Self::decode(&value)?);
        }
        Ok(tallies)
    }
}

#[async_trait]
impl BallotStore for RocksDbBallotStore {
    async fn record_vote(&self, voter_id: u64, candidate: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut voter = match self.get_voter(voter_id)? {
            None => return Err(VotingError::InvalidCredential),
            Some(voter) => voter,
        };
        if voter.has_voted {
            return Err(VotingError::AlreadyVoted);
        }

        let mut tally = self
            .find_by_candidate(candidate)
            .await?
            .unwrap_or_else(|| Tally {
                candidate_name: candidate.to_string(),
                votes: 0,
            });
        tally.votes += 1;
        voter.has_voted = true;

        // One batch commits both rows or neither.
        let mut batch = WriteBatch::default();
        batch.put_cf(self.cf(CF_TALLIES)?, candidate.as_bytes(), Self::encode(&tally)?);
        batch.put_cf(
            self.cf(CF_VOTERS)?,
            voter_id.to_be_bytes(),
            Self::encode(&voter)?,
        );
        self.db.write(batch)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn new_voter(n: u32) -> NewVoter {
        NewVoter {
            firstname: format!("first{n}"),
            lastname: format!("last{n}"),
            email: format!("v{n}@x.edu"),
            external_id: format!("H{n:04}"),
            credential: format!("{n:016x}"),
        }
    }

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDbBallotStore::open(dir.path()).expect("Failed to open RocksDB");

        assert!(store.db.cf_handle(CF_VOTERS).is_some());
        assert!(store.db.cf_handle(CF_TALLIES).is_some());
        assert!(store.db.cf_handle(CF_META).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_voter_round_trip() {
        let dir = tempdir().unwrap();
        let store = RocksDbBallotStore::open(dir.path()).unwrap();

        let voter = store.insert(new_voter(1)).await.unwrap();
        assert_eq!(voter.id, 1);

        let found = store
            .find_by_credential(&voter.credential)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, voter);
        assert_eq!(store.all_voters().await.unwrap(), vec![voter]);
    }

    #[tokio::test]
    async fn test_rocksdb_conflict_detection() {
        let dir = tempdir().unwrap();
        let store = RocksDbBallotStore::open(dir.path()).unwrap();
        store.insert(new_voter(1)).await.unwrap();

        let mut dup = new_voter(2);
        dup.external_id = "H0001".into();
        let err = store.insert(dup).await.unwrap_err();
        assert!(matches!(
            err,
            VotingError::Conflict(ConflictField::ExternalId)
        ));
    }

    #[tokio::test]
    async fn test_rocksdb_record_vote() {
        let dir = tempdir().unwrap();
        let store = RocksDbBallotStore::open(dir.path()).unwrap();
        let voter = store.insert(new_voter(1)).await.unwrap();

        store.record_vote(voter.id, "Ian Park").await.unwrap();
        let err = store.record_vote(voter.id, "Ian Park").await.unwrap_err();
        assert!(matches!(err, VotingError::AlreadyVoted));

        let tally = store.find_by_candidate("Ian Park").await.unwrap().unwrap();
        assert_eq!(tally.votes, 1);
    }

    #[tokio::test]
    async fn test_rocksdb_id_counter_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = RocksDbBallotStore::open(dir.path()).unwrap();
            store.insert(new_voter(1)).await.unwrap();
        }
        let store = RocksDbBallotStore::open(dir.path()).unwrap();
        let voter = store.insert(new_voter(2)).await.unwrap();
        assert_eq!(voter.id, 2);
    }
}
