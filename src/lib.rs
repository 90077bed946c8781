#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

use crate::config::{ConfigFairing, ElectionFairing};
use crate::logging::LoggerFairing;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use config::Config;

/// Build the server from the default configuration sources.
pub fn build() -> Rocket<Build> {
    rocket_for(rocket::build())
}

/// Attach our fairings and routes to the given rocket.
pub(crate) fn rocket_for(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .attach(LoggerFairing)
        .attach(ConfigFairing)
        .attach(ElectionFairing)
        .mount("/", api::routes())
}

/// Build a server for testing, with a fixed administrator and password.
#[cfg(test)]
pub(crate) fn test_rocket() -> Rocket<Build> {
    use std::sync::OnceLock;

    use rocket::figment::Figment;

    use crate::model::{
        admin::{hash_password, AdminCredentials},
        identity::Identity,
    };

    // Hashing is deliberately slow, so only do it once per test binary.
    static PASSWORD_HASH: OnceLock<String> = OnceLock::new();
    let password_hash = PASSWORD_HASH
        .get_or_init(|| hash_password(&AdminCredentials::example().password).unwrap());

    log4rs_test_utils::test_logging::init_logging_once_for(["voting_backend"], None, None);

    let figment = Figment::from(rocket::Config::debug_default())
        .merge(("log_level", "off"))
        .merge(("admin_identity", Identity::admin_example()))
        .merge(("auth_ttl", 600))
        .merge(("jwt_secret", "test secret"))
        .merge(("admin_password_hash", password_hash.as_str()));
    rocket_for(rocket::custom(figment))
}
