use std::fmt::{Display, Formatter};
use std::ops::Deref;

use rocket::{
    http::{
        impl_from_uri_param_identity,
        uri::fmt::{Path, UriDisplay},
    },
    request::FromParam,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A participant identity, e.g. an account address. Supplied externally and
/// compared by value; the election never interprets it beyond refusing blank
/// strings.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("Identity must not be blank")]
pub struct BlankIdentity;

impl Identity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identity {
    type Error = BlankIdentity;

    fn try_from(identity: String) -> Result<Self, Self::Error> {
        if identity.trim().is_empty() {
            Err(BlankIdentity)
        } else {
            Ok(Self(identity))
        }
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

impl Deref for Identity {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'a> FromParam<'a> for Identity {
    type Error = BlankIdentity;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        Self::try_from(param.to_string())
    }
}

impl UriDisplay<Path> for Identity {
    fn fmt(&self, formatter: &mut rocket::http::uri::fmt::Formatter<'_, Path>) -> std::fmt::Result {
        formatter.write_value(&self.0)
    }
}

impl_from_uri_param_identity!([Path] Identity);

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl Identity {
        pub fn admin_example() -> Self {
            Self("0xad41".to_string())
        }

        pub fn voter_example1() -> Self {
            Self("0x7e01".to_string())
        }

        pub fn voter_example2() -> Self {
            Self("0x7e02".to_string())
        }

        pub fn voter_example3() -> Self {
            Self("0x7e03".to_string())
        }

        pub fn outsider_example() -> Self {
            Self("0x0b5e".to_string())
        }
    }
}
