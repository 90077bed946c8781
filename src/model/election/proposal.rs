use serde::{Deserialize, Serialize};

/// Description of the placeholder proposal occupying index 0.
pub const GENESIS_DESCRIPTION: &str = "GENESIS";

/// Proposals are identified by their position in the election's proposal list.
pub type ProposalId = usize;

/// A named option voters may vote for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub description: String,
    pub vote_count: u64,
}

impl Proposal {
    /// Create a proposal with no votes.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            vote_count: 0,
        }
    }

    /// The placeholder inserted when proposal registration opens.
    pub fn genesis() -> Self {
        Self::new(GENESIS_DESCRIPTION)
    }
}

/// Find the plurality winner: the first proposal to reach the maximum vote count.
/// An empty list, or one where nobody has any votes, yields index 0.
pub fn plurality_winner(proposals: &[Proposal]) -> ProposalId {
    let mut winner = 0;
    let mut max_votes = 0;
    for (id, proposal) in proposals.iter().enumerate() {
        if proposal.vote_count > max_votes {
            max_votes = proposal.vote_count;
            winner = id;
        }
    }
    winner
}
