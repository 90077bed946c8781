use std::fmt::Display;

use serde_repr::{Deserialize_repr, Serialize_repr};

/// A kind of authenticated user, determining what their token permits.
pub trait User {
    const RIGHTS: Rights;
}

/// Rights carried by an auth token. Higher rights include the lower ones.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Rights {
    Participant = 0,
    Admin = 1,
}

impl Display for Rights {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Participant => "participant",
                Self::Admin => "admin",
            }
        )
    }
}
