use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::model::identity::Identity;

use super::{ProposalId, Transition, WorkflowStatus};

pub type Result<T> = std::result::Result<T, ElectionError>;

/// Every way an election operation can be refused. A refused operation never
/// changes any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectionError {
    #[error("Caller {caller} is not the administrator")]
    Unauthorized { caller: Identity },
    #[error("Cannot {action} while {current}; election must be {required}")]
    PhaseNotOpen {
        action: Action,
        required: WorkflowStatus,
        current: WorkflowStatus,
    },
    #[error("Voter {identity} is already registered")]
    AlreadyRegistered { identity: Identity },
    #[error("Caller {caller} is not a registered voter")]
    NotAVoter { caller: Identity },
    #[error("Voter {voter} has already voted")]
    AlreadyVoted { voter: Identity },
    #[error("Proposal description must not be empty")]
    EmptyProposal,
    /// No proposal with this ID can be read, or voted for. The genesis
    /// placeholder at ID 0 is readable but never votable, so votes for it
    /// are refused with this too.
    #[error("Proposal {proposal_id} not found")]
    ProposalNotFound { proposal_id: ProposalId },
}

/// The phase-gated operation that was attempted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Advance(Transition),
    RegisterVoter,
    AddProposal,
    CastVote,
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Advance(transition) => write!(f, "move to '{}'", transition.target()),
            Self::RegisterVoter => f.write_str("register voters"),
            Self::AddProposal => f.write_str("add proposals"),
            Self::CastVote => f.write_str("vote"),
        }
    }
}
