pub mod auth;
pub mod commands;
pub mod handlers;
pub mod reply;
pub mod router;
pub mod transport;
