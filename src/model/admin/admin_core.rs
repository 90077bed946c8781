use argon2::Config;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Raw admin credentials, received from a user. These are never stored,
/// since the password is in plaintext.
#[derive(Clone, Deserialize, Serialize)]
pub struct AdminCredentials {
    pub password: String,
}

impl AdminCredentials {
    /// Check the password against an argon2 encoded hash.
    pub fn verify(&self, password_hash: &str) -> Result<bool, argon2::Error> {
        argon2::verify_encoded(password_hash, self.password.as_bytes())
    }
}

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,
    #[error(transparent)]
    Argon2(#[from] argon2::Error),
}

/// Hash a new administrator password, producing the encoded form expected
/// by the `admin_password_hash` setting.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }

    // 16 bytes is recommended for password hashing:
    //  https://en.wikipedia.org/wiki/Argon2
    let mut salt = [0_u8; 16];
    rand::thread_rng().fill(&mut salt);
    Ok(argon2::hash_encoded(
        password.as_bytes(),
        &salt,
        &Config::default(),
    )?)
}
