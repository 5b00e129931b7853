//! # neko-channels
//!
//! Messaging platform integrations for Neko.

pub mod telegram;
