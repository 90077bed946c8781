use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::model::identity::Identity;

use super::error::{Action, ElectionError, Result};
use super::events::{ElectionEvent, ElectionObserver};
use super::proposal::{plurality_winner, Proposal, ProposalId};
use super::state::{Transition, WorkflowStatus};
use super::voter::Voter;

/// The election aggregate: the whole workflow state machine.
///
/// Every operation takes the caller's identity explicitly and either applies
/// fully or returns an error leaving the election untouched. Callers needing
/// concurrent access must serialise mutations themselves, e.g. behind a lock.
pub struct Election {
    /// Fixed at creation.
    administrator: Identity,
    status: WorkflowStatus,
    voters: HashMap<Identity, Voter>,
    /// Append-only; a proposal's ID is its index.
    proposals: Vec<Proposal>,
    /// Only meaningful once the votes are tallied.
    winning_proposal_id: ProposalId,
    observers: Vec<Arc<dyn ElectionObserver>>,
}

impl Election {
    /// Create a new election administered by `administrator`.
    pub fn new(administrator: Identity) -> Self {
        Self {
            administrator,
            status: WorkflowStatus::default(),
            voters: HashMap::new(),
            proposals: Vec::new(),
            winning_proposal_id: 0,
            observers: Vec::new(),
        }
    }

    /// Register an observer to be told about every subsequent change.
    pub fn subscribe(&mut self, observer: Arc<dyn ElectionObserver>) {
        self.observers.push(observer);
    }

    pub fn administrator(&self) -> &Identity {
        &self.administrator
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// The winning proposal. This is 0 until the votes have been tallied.
    pub fn winning_proposal_id(&self) -> ProposalId {
        self.winning_proposal_id
    }

    /// All proposals, including the genesis placeholder once it exists.
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// All known voters.
    pub fn voters(&self) -> impl Iterator<Item = (&Identity, &Voter)> {
        self.voters.iter()
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// The administrator identity check.
    pub fn is_administrator(&self, caller: &Identity) -> bool {
        *caller == self.administrator
    }

    /// Is `identity` allowed to propose and vote?
    pub fn is_voter(&self, identity: &Identity) -> bool {
        self.voters
            .get(identity)
            .map(|voter| voter.is_registered)
            .unwrap_or(false)
    }

    pub fn start_proposals_registration(&mut self, caller: &Identity) -> Result<()> {
        self.advance(caller, Transition::StartProposalsRegistration)
    }

    pub fn end_proposals_registration(&mut self, caller: &Identity) -> Result<()> {
        self.advance(caller, Transition::EndProposalsRegistration)
    }

    pub fn start_voting_session(&mut self, caller: &Identity) -> Result<()> {
        self.advance(caller, Transition::StartVotingSession)
    }

    pub fn end_voting_session(&mut self, caller: &Identity) -> Result<()> {
        self.advance(caller, Transition::EndVotingSession)
    }

    pub fn tally_votes(&mut self, caller: &Identity) -> Result<()> {
        self.advance(caller, Transition::TallyVotes)
    }

    /// Perform a phase transition. Only the administrator may do this, and
    /// only from the transition's required phase.
    pub fn advance(&mut self, caller: &Identity, transition: Transition) -> Result<()> {
        self.ensure_administrator(caller)?;
        self.ensure_phase(Action::Advance(transition), transition.required())?;

        match transition {
            Transition::StartProposalsRegistration => self.proposals.push(Proposal::genesis()),
            Transition::TallyVotes => self.winning_proposal_id = plurality_winner(&self.proposals),
            _ => {}
        }

        let previous = self.status;
        self.status = transition.target();
        self.emit(ElectionEvent::WorkflowStatusChanged {
            previous,
            next: self.status,
        });
        Ok(())
    }

    /// Add `identity` to the voter list.
    pub fn register_voter(&mut self, caller: &Identity, identity: Identity) -> Result<()> {
        self.ensure_administrator(caller)?;
        self.ensure_phase(Action::RegisterVoter, WorkflowStatus::RegisteringVoters)?;
        if self.is_voter(&identity) {
            return Err(ElectionError::AlreadyRegistered { identity });
        }

        self.voters.insert(identity.clone(), Voter::registered());
        self.emit(ElectionEvent::VoterRegistered { identity });
        Ok(())
    }

    /// Submit a new proposal, returning its ID.
    pub fn add_proposal(&mut self, caller: &Identity, description: &str) -> Result<ProposalId> {
        self.ensure_phase(
            Action::AddProposal,
            WorkflowStatus::ProposalsRegistrationStarted,
        )?;
        self.ensure_voter(caller)?;
        if description.trim().is_empty() {
            return Err(ElectionError::EmptyProposal);
        }

        let proposal_id = self.proposals.len();
        self.proposals.push(Proposal::new(description));
        self.emit(ElectionEvent::ProposalRegistered { proposal_id });
        Ok(proposal_id)
    }

    /// Look up a proposal. Restricted to registered voters.
    pub fn get_proposal(&self, caller: &Identity, proposal_id: ProposalId) -> Result<&Proposal> {
        self.ensure_voter(caller)?;
        self.proposals
            .get(proposal_id)
            .ok_or(ElectionError::ProposalNotFound { proposal_id })
    }

    /// Look up any identity's voter record. Restricted to registered voters.
    /// Unknown identities yield an unregistered, default record.
    pub fn get_voter(&self, caller: &Identity, identity: &Identity) -> Result<Voter> {
        self.ensure_voter(caller)?;
        Ok(self.voters.get(identity).cloned().unwrap_or_default())
    }

    /// Cast the caller's single vote. The genesis placeholder cannot be voted for.
    pub fn cast_vote(&mut self, caller: &Identity, proposal_id: ProposalId) -> Result<()> {
        self.ensure_phase(Action::CastVote, WorkflowStatus::VotingSessionStarted)?;
        self.ensure_voter(caller)?;
        if self.voters.get(caller).map_or(false, |voter| voter.has_voted) {
            return Err(ElectionError::AlreadyVoted {
                voter: caller.clone(),
            });
        }
        if proposal_id == 0 || proposal_id >= self.proposals.len() {
            return Err(ElectionError::ProposalNotFound { proposal_id });
        }

        // All checks passed; nothing below can fail.
        if let Some(voter) = self.voters.get_mut(caller) {
            voter.has_voted = true;
            voter.voted_proposal_id = proposal_id;
        }
        self.proposals[proposal_id].vote_count += 1;
        self.emit(ElectionEvent::VoteCast {
            voter: caller.clone(),
            proposal_id,
        });
        Ok(())
    }

    fn ensure_administrator(&self, caller: &Identity) -> Result<()> {
        if self.is_administrator(caller) {
            Ok(())
        } else {
            Err(ElectionError::Unauthorized {
                caller: caller.clone(),
            })
        }
    }

    fn ensure_phase(&self, action: Action, required: WorkflowStatus) -> Result<()> {
        if self.status == required {
            Ok(())
        } else {
            Err(ElectionError::PhaseNotOpen {
                action,
                required,
                current: self.status,
            })
        }
    }

    fn ensure_voter(&self, caller: &Identity) -> Result<()> {
        if self.is_voter(caller) {
            Ok(())
        } else {
            Err(ElectionError::NotAVoter {
                caller: caller.clone(),
            })
        }
    }

    fn emit(&self, event: ElectionEvent) {
        for observer in &self.observers {
            observer.notify(&event);
        }
    }
}

impl Debug for Election {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Election")
            .field("administrator", &self.administrator)
            .field("status", &self.status)
            .field("voters", &self.voters)
            .field("proposals", &self.proposals)
            .field("winning_proposal_id", &self.winning_proposal_id)
            .field("observers", &self.observers.len())
            .finish()
    }
}
