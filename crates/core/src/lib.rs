//! Core domain types shared across the shroud crates.
//!
//! This crate defines the canonical data model used everywhere else:
//! - Supported file kinds and the code payload
//! - Application configuration
//! - Reply delivery limits

pub mod config;
pub mod payload;

pub use config::{AppConfig, BotConfig, ServerConfig};
pub use payload::{CodePayload, FileKind};

/// Maximum reply length in characters before a transformation result is
/// delivered as a file attachment instead of an inline code block.
pub const INLINE_REPLY_LIMIT: usize = 1900;
