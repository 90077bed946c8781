use serde::{Deserialize, Serialize};

use crate::model::election::{Proposal, ProposalId};

/// A proposal a voter wishes to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSpec {
    pub description: String,
}

/// An API-friendly proposal, carrying its ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDescription {
    pub proposal_id: ProposalId,
    #[serde(flatten)]
    pub proposal: Proposal,
}

impl ProposalDescription {
    pub fn new(proposal_id: ProposalId, proposal: Proposal) -> Self {
        Self {
            proposal_id,
            proposal,
        }
    }
}
