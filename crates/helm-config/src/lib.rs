//! # helm-config
//!
//! Filesystem-backed implementations of the helm configuration and message
//! seams: a reloadable TOML store with dotted-path typed getters, and a
//! per-locale TOML message catalog.

pub mod catalog;
pub mod store;

pub use catalog::MessageCatalog;
pub use store::TomlStore;
