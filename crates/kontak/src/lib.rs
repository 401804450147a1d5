//! # Kontak
//!
//! Server-rendered contact management: the HTTP surface over
//! [`kontak_core`]. Routes, view templates, session/cookie glue, and
//! configuration live here; domain rules live in the core crate.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod views;

use axum::extract::Request;
use axum::Router;
use tower::util::{MapRequest, MapRequestLayer};
use tower::Layer;

pub use config::Config;
pub use state::AppState;

/// The full application service: the router wrapped in the
/// method-override rewrite, which must run before routing.
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// Build the application service for the given state.
#[must_use]
pub fn app(state: AppState) -> App {
    MapRequestLayer::new(middleware::method_override as fn(Request) -> Request)
        .layer(routes::router(state))
}
