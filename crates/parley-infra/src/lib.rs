//! Infrastructure layer for Parley.
//!
//! Contains implementations of the ports defined in `parley-core`:
//! the SQLite history store and the HTTP inference client, plus the
//! config.toml loader and data directory resolution.

pub mod config;
pub mod llm;
pub mod sqlite;
