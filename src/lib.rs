//! # Barkeep Telegram Bot
//!
//! A Telegram bot that collects cocktail recipes through a step-by-step
//! conversation and stores them in a normalized SQLite database.

pub mod bot;
pub mod config;
pub mod db;
pub mod dialogue;
pub mod errors;
pub mod localization;
pub mod recipe_model;
