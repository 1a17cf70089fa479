//! Nepali Spell - spelling verification for Nepali text
//!
//! Core library providing word identity, a write-once suggestion cache,
//! the remote suggestion client and the verification engine used by the
//! `nepali-spell` command line tool.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
