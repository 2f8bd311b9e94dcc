//! # LearnJS host library
//!
//! Routes between in-page views by URL fragment and federates Google
//! Sign-In into cloud identity credentials that can be refreshed without
//! prompting the user again.
//!
//! Modules:
//! - `router`: fragment parsing, view registry, container, `hashchange` handling
//! - `views`: landing, problem and profile views
//! - `identity`: credentials broker, sign-in federation, silent session refresh
//! - `providers`: Cognito Identity and Google OAuth2 over HTTP
//! - `server`: HTTP surface and metrics endpoint

pub mod app;
pub mod config;
pub mod helpers;
pub mod identity;
pub mod observability;
pub mod providers;
pub mod router;
pub mod server;
pub mod utils;
pub mod views;

#[cfg(test)]
mod tests;

pub use crate::app::LearnApp;
pub use crate::config::service::ServiceConfig;
