use rocket::{
    http::{Cookie, CookieJar, Status},
    serde::json::Json,
    Route, State,
};

use crate::{
    error::{Error, Result},
    model::{
        admin::{Admin, AdminCredentials},
        auth::{AuthToken, AUTH_TOKEN_COOKIE},
        participant::{Participant, ParticipantCredentials},
    },
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![authenticate_admin, authenticate_participant, logout]
}

#[post("/auth/admin", data = "<credentials>", format = "json")]
pub async fn authenticate_admin(
    cookies: &CookieJar<'_>,
    credentials: Json<AdminCredentials>,
    config: &State<Config>,
) -> Result<()> {
    if !credentials.verify(config.admin_password_hash())? {
        return Err(Error::Status(
            Status::Unauthorized,
            "Incorrect administrator password.".to_string(),
        ));
    }

    let token = AuthToken::<Admin>::new(config.admin_identity().clone());
    cookies.add(token.into_cookie(config)?);

    Ok(())
}

/// Participants are trusted to be who they say they are; only the voter list
/// decides what they may do. Blank identities never deserialize, and the
/// administrator identity is reserved for password sign-in.
#[post("/auth/participant", data = "<credentials>", format = "json")]
pub async fn authenticate_participant(
    cookies: &CookieJar<'_>,
    credentials: Json<ParticipantCredentials>,
    config: &State<Config>,
) -> Result<()> {
    let identity = credentials.0.identity;
    if &identity == config.admin_identity() {
        return Err(Error::Status(
            Status::Forbidden,
            format!("{identity} must sign in as administrator."),
        ));
    }

    let token = AuthToken::<Participant>::new(identity);
    cookies.add(token.into_cookie(config)?);

    Ok(())
}

#[delete("/auth")]
pub fn logout(cookies: &CookieJar) -> Status {
    cookies.remove(Cookie::named(AUTH_TOKEN_COOKIE));
    Status::Ok
}
