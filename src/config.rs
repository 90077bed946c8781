use std::sync::Arc;

use chrono::Duration;
use log::{error, info};
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::logging::ElectionEventLogger;
use crate::model::{
    election::{Election, EventLog, SharedElection},
    identity::Identity,
};

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Deserialize)]
pub struct Config {
    // non-secrets
    admin_identity: Identity,
    auth_ttl: u32,
    // secrets
    jwt_secret: String,
    admin_password_hash: String,
}

impl Config {
    /// The identity that administers the election.
    pub fn admin_identity(&self) -> &Identity {
        &self.admin_identity
    }

    /// Valid lifetime of auth token cookies in seconds.
    pub fn auth_ttl(&self) -> Duration {
        Duration::seconds(self.auth_ttl.into())
    }

    /// Secret key used to encrypt JWTs.
    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Argon2 encoded hash of the administrator's password.
    pub fn admin_password_hash(&self) -> &str {
        &self.admin_password_hash
    }
}

/// A fairing that loads the application config and puts it in managed state.
/// This could easily be achieved using `AdHoc::config`, but is written out
/// explicitly for symmetry with the other fairings and control over error
/// messages.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// A fairing that creates the election for the configured administrator,
/// wires up its observers, and places both the election and its event log
/// into managed state. Must be attached after [`ConfigFairing`].
pub struct ElectionFairing;

#[rocket::async_trait]
impl Fairing for ElectionFairing {
    fn info(&self) -> Info {
        Info {
            name: "Election",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        let admin = match rocket.state::<Config>() {
            Some(config) => config.admin_identity().clone(),
            None => {
                error!("Cannot create the election without application config");
                return Err(rocket);
            }
        };

        let event_log = Arc::new(EventLog::new());
        let mut election = Election::new(admin);
        election.subscribe(event_log.clone());
        election.subscribe(Arc::new(ElectionEventLogger));
        info!(
            "Election created, administered by {}",
            election.administrator()
        );

        Ok(rocket
            .manage(SharedElection::new(election))
            .manage(event_log))
    }
}
