/// Default candidate list for the election. Abstain is an ordinary
/// candidate: it gets its own tally row and participates in the winner
/// computation like any other name.
pub const DEFAULT_CANDIDATES: [&str; 3] = ["Luka Pavikjevikj", "Ian Park", "Abstain"];

/// The fixed set of valid vote choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRoster {
    names: Vec<String>,
}

impl CandidateRoster {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for CandidateRoster {
    fn default() -> Self {
        Self::new(DEFAULT_CANDIDATES)
    }
}
