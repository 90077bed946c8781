use serde::{Deserialize, Serialize};

use super::{
    auth::{Rights, User},
    identity::Identity,
};

/// Any authenticated caller. Whether they may actually propose or vote is
/// decided by the election's voter list, not by their token.
#[derive(Debug)]
pub struct Participant;

impl User for Participant {
    const RIGHTS: Rights = Rights::Participant;
}

/// The identity a participant signs in as.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParticipantCredentials {
    pub identity: Identity,
}
