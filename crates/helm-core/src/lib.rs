//! # helm-core
//!
//! Core types and trait seams for the helm command framework.
//! This crate defines the shared vocabulary used by every other crate in the
//! workspace: the sender/actor capability traits, the message-source and
//! config-store seams, and the rich-text document a dispatcher produces.

pub mod complete;
pub mod config;
pub mod error;
pub mod message;
pub mod sender;
pub mod text;

pub use complete::filter_prefix;
pub use config::{ConfigStore, NullConfig};
pub use error::{HelmError, Result};
pub use message::{MessageSource, StaticMessages, apply_placeholders};
pub use sender::{Actor, Sender};
pub use text::{ClickAction, FormatRetention, TextDocument, TextRun};
