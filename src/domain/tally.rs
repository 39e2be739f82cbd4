use serde::{Deserialize, Serialize};

/// Running vote count for one candidate. Rows are created lazily on the
/// first vote for that candidate and only ever incremented.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Tally {
    pub candidate_name: String,
    pub votes: u64,
}

/// Outcome of the winner computation over the current tallies.
///
/// Ties are reported in full rather than silently picking one candidate.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    /// No votes have been cast.
    None,
    Single(String),
    Tie(Vec<String>),
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct ElectionResults {
    /// Sorted by votes descending, then candidate name for determinism.
    pub tallies: Vec<Tally>,
    pub winner: Winner,
}

impl ElectionResults {
    pub fn from_tallies(mut tallies: Vec<Tally>) -> Self {
        tallies.sort_by(|a, b| {
            b.votes
                .cmp(&a.votes)
                .then_with(|| a.candidate_name.cmp(&b.candidate_name))
        });

        let winner = match tallies.first().map(|t| t.votes) {
            None | Some(0) => Winner::None,
            Some(top) => {
                let mut leaders: Vec<String> = tallies
                    .iter()
                    .take_while(|t| t.votes == top)
                    .map(|t| t.candidate_name.clone())
                    .collect();
                if leaders.len() == 1 {
                    Winner::Single(leaders.remove(0))
                } else {
                    Winner::Tie(leaders)
                }
            }
        };

        Self { tallies, winner }
    }

    pub fn total_votes(&self) -> u64 {
        self.tallies.iter().map(|t| t.votes).sum()
    }
}
