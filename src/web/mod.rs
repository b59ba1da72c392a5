//! JSON API exposing graph sessions, step traces and dispatcher statistics to a front-end.

pub mod api;
pub mod models;
pub mod server;
