use serde::{Deserialize, Serialize};

use crate::model::{election::Voter, identity::Identity};

/// A voter the administrator wishes to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRegistration {
    pub identity: Identity,
}

/// An API-friendly voter record, carrying its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterDescription {
    pub identity: Identity,
    #[serde(flatten)]
    pub voter: Voter,
}
