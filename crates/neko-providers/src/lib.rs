//! # neko-providers
//!
//! Completion API providers for Neko.

pub mod groq;

pub use groq::GroqProvider;
