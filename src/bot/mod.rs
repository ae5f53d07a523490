//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `commands`: Classifies `/command` tokens
//! - `transport`: Send-text capability and the inbound event shape
//! - `message_handler`: Routes commands and free text
//! - `dialogue_manager`: Advances recipe drafts and saves completed ones
//! - `ui_builder`: Formats recipe listings

pub mod commands;
pub mod dialogue_manager;
pub mod message_handler;
pub mod transport;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use message_handler::{finish_handling, handle_event, message_handler};

pub use commands::Command;
pub use transport::{InboundEvent, MessageSender};
pub use ui_builder::{format_recipe_messages, format_recipes, MESSAGE_LIMIT};
