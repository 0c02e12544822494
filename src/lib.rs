pub mod app;
pub mod auth;
pub mod comments;
pub mod config;
pub mod error;
pub mod posts;
pub mod state;
