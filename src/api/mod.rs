use rocket::Route;

pub mod admin;
pub mod auth;
pub mod participant;
pub mod public;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(admin::routes());
    routes.extend(auth::routes());
    routes.extend(participant::routes());
    routes.extend(public::routes());
    routes
}
