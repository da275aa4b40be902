//! HTTP request handlers.

mod code;
mod meta;

pub use code::get_code;
pub use meta::{health_check, index};
