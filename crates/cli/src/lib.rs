//! `storyboard-cli` library crate.
//!
//! Holds the configuration, storage backend, login gate, and command
//! dispatcher so they can be exercised by integration tests. The binary
//! entrypoint lives in `main.rs`.

pub mod commands;
pub mod config;
pub mod file_store;
pub mod password;
pub mod session;
