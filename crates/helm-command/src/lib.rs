//! # helm-command
//!
//! Permission-gated sub-command dispatch with paginated, clickable help.
//!
//! A [`CommandDispatcher`] owns an ordered registry of [`SubCommand`]
//! implementations. Incoming invocations are routed by their first argument,
//! validated against permission and player/held-item preconditions, and
//! forwarded; the built-in [`HelpCommand`] renders clickable multi-page help
//! from templates carrying `%prev_clickable%`/`%next_clickable%` markers.

pub mod dispatcher;
pub mod help;
pub mod pager;
pub mod sub;

pub use dispatcher::{AllowedEntry, CommandContext, CommandDispatcher};
pub use help::HelpCommand;
pub use pager::{NEXT_MARKER, PREV_MARKER};
pub use sub::SubCommand;
