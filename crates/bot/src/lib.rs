//! Chat-platform surface for the code transformation service.
//!
//! This crate provides:
//! - The `obf` slash command definition and its Discord adapter
//! - The platform-agnostic dispatcher: input resolution, extension
//!   validation, transformation, and size-based reply delivery
//! - The remote file fetcher seam

pub mod commands;
pub mod dispatch;
pub mod fetch;

pub use dispatch::{DispatchError, Dispatcher, ObfInput, ObfReply, RemoteFile};
pub use fetch::{FetchError, FileFetcher, HttpFetcher};

/// Source text of the `obf` command handler, embedded at compile time.
/// This is the fixed block the server's `/code` endpoint returns.
pub const OBF_COMMAND_SOURCE: &str = include_str!("commands/obf.rs");
