//! HTTP route handlers.

pub mod auth;
pub mod front;
pub mod helpers;
pub mod plugin_admin;
pub mod static_files;
