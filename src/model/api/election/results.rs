use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    election::{plurality_winner, Election, Proposal, ProposalId, WorkflowStatus},
    identity::Identity,
};

#[derive(Debug, Eq, PartialEq, Clone, Error)]
pub enum VerificationError {
    /// Results are only final once the votes are tallied.
    #[error("The votes have not been tallied yet (election is {status})")]
    NotTallied { status: WorkflowStatus },
    /// A ballot names a proposal that does not exist, or the genesis placeholder.
    #[error("Voter {voter} voted for unknown proposal {proposal_id}")]
    UnknownProposal {
        voter: Identity,
        proposal_id: ProposalId,
    },
    /// A proposal's claimed count does not match its ballots.
    #[error("The vote count for proposal {proposal_id} is incorrect")]
    Tally { proposal_id: ProposalId },
    /// The claimed winner is not the plurality winner.
    #[error("Proposal {claimed} was declared the winner, but proposal {actual} won")]
    Winner {
        claimed: ProposalId,
        actual: ProposalId,
    },
}

/// Everything needed to independently check an election's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionResults {
    /// Phase at the time of the dump.
    pub status: WorkflowStatus,
    /// All proposals with their claimed vote counts, by ID.
    pub proposals: Vec<Proposal>,
    /// The proposal each voter chose. Voters who never voted are absent.
    pub ballots: BTreeMap<Identity, ProposalId>,
    /// Claimed winner.
    pub winning_proposal_id: ProposalId,
}

impl From<&Election> for ElectionResults {
    fn from(election: &Election) -> Self {
        Self {
            status: election.status(),
            proposals: election.proposals().to_vec(),
            ballots: election
                .voters()
                .filter_map(|(identity, voter)| Some((identity.clone(), voter.ballot()?)))
                .collect(),
            winning_proposal_id: election.winning_proposal_id(),
        }
    }
}

impl ElectionResults {
    /// Verify the election results: recount the ballots, then re-run the
    /// plurality scan over the recounted proposals.
    pub fn verify(&self) -> Result<(), VerificationError> {
        if self.status != WorkflowStatus::VotesTallied {
            return Err(VerificationError::NotTallied {
                status: self.status,
            });
        }

        // Recount.
        let mut counts = vec![0_u64; self.proposals.len()];
        for (voter, &proposal_id) in self.ballots.iter() {
            match counts.get_mut(proposal_id) {
                Some(count) if proposal_id != 0 => *count += 1,
                _ => {
                    return Err(VerificationError::UnknownProposal {
                        voter: voter.clone(),
                        proposal_id,
                    })
                }
            }
        }
        for (proposal_id, (proposal, count)) in self.proposals.iter().zip(&counts).enumerate() {
            if proposal.vote_count != *count {
                return Err(VerificationError::Tally { proposal_id });
            }
        }

        // Counts are now known to be honest, so the claimed ones can be scanned.
        let actual = plurality_winner(&self.proposals);
        if actual != self.winning_proposal_id {
            return Err(VerificationError::Winner {
                claimed: self.winning_proposal_id,
                actual,
            });
        }

        Ok(())
    }
}
