pub use election_core::Election;
pub use error::{Action, ElectionError};
pub use events::{ElectionEvent, ElectionObserver, EventLog, LoggedEvent};
pub use proposal::{plurality_winner, Proposal, ProposalId, GENESIS_DESCRIPTION};
pub use state::{Transition, WorkflowStatus};
pub use voter::Voter;

pub mod error;

mod election_core;
mod events;
mod proposal;
mod state;
mod voter;

/// The single election served by this backend, as held in managed state.
/// Reads share the lock; every mutation holds it exclusively, which keeps
/// operations linearizable.
pub type SharedElection = rocket::tokio::sync::RwLock<Election>;
