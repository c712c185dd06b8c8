//! Storyboard domain logic.
//!
//! Pure logic with no filesystem or process I/O: the frame model, the
//! script parser, the persisted frame collection, the auth gate, and the
//! printable export. Storage backends and the command line live in
//! `storyboard-cli`.

pub mod auth;
pub mod collection;
pub mod error;
pub mod export;
pub mod frame;
pub mod parser;
pub mod seed;
pub mod store;
pub mod types;
