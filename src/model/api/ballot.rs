use serde::{Deserialize, Serialize};

use crate::model::election::ProposalId;

/// A ballot the caller wishes to cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallotSpec {
    pub proposal_id: ProposalId,
}
