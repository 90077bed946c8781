pub mod admin;
pub mod api;
pub mod auth;
pub mod election;
pub mod identity;
pub mod participant;
