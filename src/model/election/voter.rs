use serde::{Deserialize, Serialize};

use super::ProposalId;

/// A participant's standing in the election.
///
/// `voted_proposal_id` defaults to 0 and is only meaningful once `has_voted`
/// is set; always check `has_voted` first.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voter {
    pub is_registered: bool,
    pub has_voted: bool,
    pub voted_proposal_id: ProposalId,
}

impl Voter {
    /// A freshly registered voter who has not voted yet.
    pub fn registered() -> Self {
        Self {
            is_registered: true,
            ..Default::default()
        }
    }

    /// The proposal this voter chose, if they have voted.
    pub fn ballot(&self) -> Option<ProposalId> {
        self.has_voted.then_some(self.voted_proposal_id)
    }
}
