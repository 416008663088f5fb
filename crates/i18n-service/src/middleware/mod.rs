//! Middleware layers for the HTTP pipeline.

pub mod auth;
