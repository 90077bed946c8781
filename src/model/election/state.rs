use std::fmt::{Display, Formatter};

use rocket::{
    http::{
        impl_from_uri_param_identity,
        uri::fmt::{Path, UriDisplay},
    },
    request::FromParam,
};
use serde::{Deserialize, Serialize};

/// Phases in the election lifecycle. Strictly linear and forward-only.
#[derive(
    Debug, Default, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum WorkflowStatus {
    /// The administrator is curating the voter list.
    #[default]
    RegisteringVoters,
    /// Registered voters may submit proposals.
    ProposalsRegistrationStarted,
    /// Proposals are frozen, voting has not started.
    ProposalsRegistrationEnded,
    /// Registered voters may cast their ballot.
    VotingSessionStarted,
    /// Ballots are frozen, awaiting the tally.
    VotingSessionEnded,
    /// The winner is known. Terminal.
    VotesTallied,
}

impl Display for WorkflowStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::RegisteringVoters => "registering voters",
            Self::ProposalsRegistrationStarted => "accepting proposals",
            Self::ProposalsRegistrationEnded => "closed for proposals",
            Self::VotingSessionStarted => "accepting votes",
            Self::VotingSessionEnded => "closed for votes",
            Self::VotesTallied => "tallied",
        })
    }
}

/// The five steps that move an election from one phase to the next.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Transition {
    StartProposalsRegistration,
    EndProposalsRegistration,
    StartVotingSession,
    EndVotingSession,
    TallyVotes,
}

impl Transition {
    /// Every transition, in the order they must be performed.
    pub const ALL: [Transition; 5] = [
        Self::StartProposalsRegistration,
        Self::EndProposalsRegistration,
        Self::StartVotingSession,
        Self::EndVotingSession,
        Self::TallyVotes,
    ];

    /// The phase the election must be in for this transition to apply.
    pub fn required(self) -> WorkflowStatus {
        match self {
            Self::StartProposalsRegistration => WorkflowStatus::RegisteringVoters,
            Self::EndProposalsRegistration => WorkflowStatus::ProposalsRegistrationStarted,
            Self::StartVotingSession => WorkflowStatus::ProposalsRegistrationEnded,
            Self::EndVotingSession => WorkflowStatus::VotingSessionStarted,
            Self::TallyVotes => WorkflowStatus::VotingSessionEnded,
        }
    }

    /// The phase the election is in once this transition has applied.
    pub fn target(self) -> WorkflowStatus {
        match self {
            Self::StartProposalsRegistration => WorkflowStatus::ProposalsRegistrationStarted,
            Self::EndProposalsRegistration => WorkflowStatus::ProposalsRegistrationEnded,
            Self::StartVotingSession => WorkflowStatus::VotingSessionStarted,
            Self::EndVotingSession => WorkflowStatus::VotingSessionEnded,
            Self::TallyVotes => WorkflowStatus::VotesTallied,
        }
    }

    /// URL-friendly name, as accepted by `/admin/workflow/<step>`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StartProposalsRegistration => "start-proposals",
            Self::EndProposalsRegistration => "end-proposals",
            Self::StartVotingSession => "start-voting",
            Self::EndVotingSession => "end-voting",
            Self::TallyVotes => "tally",
        }
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> FromParam<'a> for Transition {
    type Error = &'a str;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|transition| transition.as_str() == param)
            .ok_or(param)
    }
}

impl UriDisplay<Path> for Transition {
    fn fmt(&self, formatter: &mut rocket::http::uri::fmt::Formatter<'_, Path>) -> std::fmt::Result {
        formatter.write_value(self.as_str())
    }
}

impl_from_uri_param_identity!([Path] Transition);
