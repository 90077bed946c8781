pub use token::{AuthToken, AUTH_TOKEN_COOKIE};
pub use user::{Rights, User};

mod token;
mod user;
