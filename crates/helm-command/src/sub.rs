use helm_core::{ClickAction, Sender, TextDocument, TextRun};

use crate::dispatcher::CommandContext;

/// A named, independently permissioned unit of command logic under a root
/// dispatcher.
///
/// Implementors supply the capability set directly; there is no base type.
/// Config-derived state may be refreshed in `reload`, everything else is
/// fixed at registration time. The dispatcher owns registered sub-commands;
/// they reach shared configuration and messages through the
/// [`CommandContext`] handle passed into every call.
pub trait SubCommand {
    /// Lowercase name used for lookup, completion and help listing.
    fn name(&self) -> &str;

    /// Permission required to see and invoke this sub-command.
    fn permission(&self) -> &str;

    /// Whether only senders backed by a physical actor may invoke this.
    fn player_only(&self) -> bool {
        false
    }

    /// Whether the actor must hold an item in hand. Only meaningful together
    /// with `player_only`.
    fn requires_held_item(&self) -> bool {
        false
    }

    /// Run the sub-command. Internal failures are this command's own
    /// responsibility; the dispatcher neither catches nor interprets them.
    fn execute(&self, ctx: &CommandContext, sender: &dyn Sender, label: &str, args: &[String]);

    /// Tab-completion for tokens past the sub-command name. Must not panic.
    fn complete(
        &self,
        _ctx: &CommandContext,
        _sender: &dyn Sender,
        _args: &[String],
    ) -> Vec<String> {
        Vec::new()
    }

    /// Parameter hint shown in the usage line, e.g. "<player> <amount>".
    fn params(&self, ctx: &CommandContext, sender: &dyn Sender) -> String {
        ctx.lang(&format!("{}.params", self.name()), "", Some(sender), &[])
    }

    /// One-line description shown in help listings.
    fn description(&self, ctx: &CommandContext, sender: &dyn Sender) -> String {
        ctx.lang(&format!("{}.description", self.name()), "", Some(sender), &[])
    }

    /// Append this sub-command's help block to a document.
    fn append_help(
        &self,
        doc: &mut TextDocument,
        ctx: &CommandContext,
        sender: &dyn Sender,
        label: &str,
    ) {
        let params = self.params(ctx, sender);
        let description = self.description(ctx, sender);
        append_usage_block(doc, label, self.name(), &params, &description);
    }

    /// Refresh config-derived state after the dispatcher's store reloaded.
    fn reload(&mut self, _ctx: &CommandContext) {}
}

/// The standard help block: a clickable usage line, then the description.
pub(crate) fn append_usage_block(
    doc: &mut TextDocument,
    label: &str,
    name: &str,
    params: &str,
    description: &str,
) {
    let mut usage = format!("/{label} {name}");
    if !params.is_empty() {
        usage.push(' ');
        usage.push_str(params);
    }
    let mut run =
        TextRun::new(usage).with_click(ClickAction::SuggestCommand(format!("/{label} {name} ")));
    if !description.is_empty() {
        run = run.with_hover(description);
    }
    doc.push(run);
    if !description.is_empty() {
        doc.push_base("\n");
        doc.push_text(description);
    }
}
