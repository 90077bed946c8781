use serde::{Deserialize, Serialize};

use crate::model::{
    election::{Election, ProposalId, WorkflowStatus},
    identity::Identity,
};

/// A public, at-a-glance view of the election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionSummary {
    /// The administrator identity.
    pub administrator: Identity,
    /// Current phase.
    pub status: WorkflowStatus,
    /// Number of registered voters.
    pub voter_count: usize,
    /// Number of proposals, including the genesis placeholder.
    pub proposal_count: usize,
    /// Winner; 0 until the votes are tallied.
    pub winning_proposal_id: ProposalId,
}

impl From<&Election> for ElectionSummary {
    fn from(election: &Election) -> Self {
        Self {
            administrator: election.administrator().clone(),
            status: election.status(),
            voter_count: election.voter_count(),
            proposal_count: election.proposals().len(),
            winning_proposal_id: election.winning_proposal_id(),
        }
    }
}
