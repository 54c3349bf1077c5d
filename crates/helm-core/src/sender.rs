use crate::text::TextDocument;

/// A principal issuing command invocations.
///
/// Permission checks are delegated entirely to the host: the framework never
/// interprets permission strings, it only asks. A sender may additionally be
/// backed by a physical actor (something with a locale and hands); senders
/// like a server console are not.
pub trait Sender {
    /// Display name of the sender.
    fn name(&self) -> &str;

    /// Whether this sender holds the given permission.
    fn has_permission(&self, permission: &str) -> bool;

    /// The physical actor behind this sender, if any.
    fn as_actor(&self) -> Option<&dyn Actor> {
        None
    }

    /// Deliver a rendered document to this sender. The host owns the actual
    /// transport (chat packet, terminal, websocket, ...).
    fn send(&self, doc: TextDocument);
}

/// A sender variant with a physical presence: a locale and an item in hand.
pub trait Actor {
    /// Locale tag used for message lookups, e.g. "en" or "it".
    fn locale(&self) -> Option<&str> {
        None
    }

    /// Whether the actor currently holds a non-empty item in hand.
    fn holds_item(&self) -> bool;
}
