//! # neko-core
//!
//! Core types, traits, configuration, and error handling for the Neko bot.

pub mod config;
pub mod error;
pub mod lang;
pub mod message;
pub mod prompts;
pub mod traits;
