pub use admin_core::{hash_password, AdminCredentials, PasswordError, MIN_PASSWORD_LENGTH};

use super::auth::{Rights, User};

mod admin_core;

/// The administrator user type. There is exactly one administrator, whose
/// identity is fixed by the election.
#[derive(Debug)]
pub struct Admin;

impl User for Admin {
    const RIGHTS: Rights = Rights::Admin;
}
