use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::identity::Identity;

use super::{ProposalId, WorkflowStatus};

/// Change notifications emitted by an [`super::Election`] after a successful operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ElectionEvent {
    #[serde(rename_all = "camelCase")]
    WorkflowStatusChanged {
        previous: WorkflowStatus,
        next: WorkflowStatus,
    },
    #[serde(rename_all = "camelCase")]
    VoterRegistered { identity: Identity },
    #[serde(rename_all = "camelCase")]
    ProposalRegistered { proposal_id: ProposalId },
    #[serde(rename_all = "camelCase")]
    VoteCast {
        voter: Identity,
        proposal_id: ProposalId,
    },
}

/// Something that wants to hear about election changes.
///
/// Observers are called synchronously while the election is being mutated,
/// so they must not block.
pub trait ElectionObserver: Send + Sync {
    fn notify(&self, event: &ElectionEvent);
}

/// An event, stamped with the time it was observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: ElectionEvent,
}

/// An in-memory history of every event the election has emitted.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Mutex<Vec<LoggedEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy out the history, oldest first.
    pub fn entries(&self) -> Vec<LoggedEvent> {
        // Entries are only ever pushed whole, so a poisoned lock is still consistent.
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Just the events, without timestamps.
    pub fn events(&self) -> Vec<ElectionEvent> {
        self.entries().into_iter().map(|entry| entry.event).collect()
    }
}

impl ElectionObserver for EventLog {
    fn notify(&self, event: &ElectionEvent) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LoggedEvent {
                at: Utc::now(),
                event: event.clone(),
            });
    }
}
