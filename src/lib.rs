//! Playlist Server Library
//!
//! A song catalog and an ordered playlist stored in SQLite, served over HTTP.
//! The modules are exposed for the binary and for the end-to-end tests.

pub mod catalog_store;
pub mod config;
pub mod error;
pub mod playlist;
pub mod server;
pub mod sqlite_persistence;
pub mod user;

pub use catalog_store::{CatalogStore, SqliteLibraryStore};
pub use error::{LibraryError, LibraryResult};
pub use playlist::PlaylistStore;
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use user::{SqliteUserStore, UserStore};
