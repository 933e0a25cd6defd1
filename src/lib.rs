//! # Refugee Help Bot
//!
//! A Telegram bot for chats of refugees from Ukraine in Germany.
//!
//! ## Features
//! - Informational commands backed by a static guidebook (city and country
//!   chats, evacuation, medical and legal resources, FAQ pages)
//! - Inline search over the same guidebook
//! - Per-chat reminders that re-post the pinned message on a fixed interval
//! - Removal of join/leave notices and processed command messages

/// Bot command handlers, routing and the messaging transport seam
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Guidebook content and the search index built from it
pub mod content;
/// Error taxonomy shared by all components
pub mod error;
/// Background services: reminders, search and health reporting
pub mod services;
/// Logging and formatting helpers
pub mod utils;
