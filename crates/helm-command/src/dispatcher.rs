use std::sync::Arc;

use tracing::{debug, warn};

use helm_core::{ConfigStore, MessageSource, Sender, TextDocument, filter_prefix};

use crate::help::HelpCommand;
use crate::sub::SubCommand;

/// Shared handle sub-commands use to reach their dispatcher's configuration
/// and message catalog.
///
/// The dispatcher owns its sub-commands and hands this out by reference,
/// never the other way around. Message and config keys are namespaced under
/// the dispatcher name (`<name>.<path>`).
pub struct CommandContext {
    name: String,
    config: Arc<dyn ConfigStore>,
    messages: Arc<dyn MessageSource>,
}

impl CommandContext {
    pub(crate) fn new(
        name: &str,
        config: Arc<dyn ConfigStore>,
        messages: Arc<dyn MessageSource>,
    ) -> Self {
        Self {
            name: name.to_lowercase(),
            config,
            messages,
        }
    }

    /// Lowercase name of the owning dispatcher.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve a message key namespaced under this dispatcher.
    pub fn lang(
        &self,
        path: &str,
        default: &str,
        sender: Option<&dyn Sender>,
        placeholders: &[(&str, &str)],
    ) -> String {
        self.messages.resolve(
            &format!("{}.{path}", self.name),
            default,
            sender,
            placeholders,
        )
    }

    /// List-valued variant of [`lang`](Self::lang).
    pub fn lang_list(
        &self,
        path: &str,
        default: &[&str],
        sender: Option<&dyn Sender>,
        placeholders: &[(&str, &str)],
    ) -> Vec<String> {
        self.messages.resolve_list(
            &format!("{}.{path}", self.name),
            default,
            sender,
            placeholders,
        )
    }

    /// Resolve a message key outside the dispatcher namespace.
    pub fn global(
        &self,
        key: &str,
        default: &str,
        sender: Option<&dyn Sender>,
        placeholders: &[(&str, &str)],
    ) -> String {
        self.messages.resolve(key, default, sender, placeholders)
    }

    pub fn conf_str(&self, path: &str) -> String {
        self.config.load_str(&format!("{}.{path}", self.name), "")
    }

    pub fn conf_int(&self, path: &str) -> i32 {
        self.config.load_int(&format!("{}.{path}", self.name), 0)
    }

    pub fn conf_long(&self, path: &str) -> i64 {
        self.config.load_long(&format!("{}.{path}", self.name), 0)
    }

    pub fn conf_bool(&self, path: &str) -> bool {
        self.config.load_bool(&format!("{}.{path}", self.name), true)
    }
}

/// An entry of the per-request allowed view: either a registered sub-command
/// or the built-in help pseudo-command.
pub enum AllowedEntry<'a> {
    Sub(&'a dyn SubCommand),
    Help(&'a HelpCommand),
}

impl<'a> AllowedEntry<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            AllowedEntry::Sub(sub) => sub.name(),
            AllowedEntry::Help(_) => HelpCommand::NAME,
        }
    }

    pub(crate) fn append_help(
        &self,
        doc: &mut TextDocument,
        ctx: &CommandContext,
        sender: &dyn Sender,
        label: &str,
    ) {
        match self {
            AllowedEntry::Sub(sub) => sub.append_help(doc, ctx, sender, label),
            AllowedEntry::Help(help) => help.append_help(doc, ctx, sender, label),
        }
    }
}

/// What a first-argument token resolved to.
pub(crate) enum Resolved<'a> {
    Sub(&'a dyn SubCommand),
    Help(&'a HelpCommand),
}

/// The root command: a registry of permission-gated sub-commands with
/// routing, precondition validation, help rendering and tab-completion.
///
/// Registration does not enforce name uniqueness; lookup returns the first
/// match in registration order, so registering a duplicate name creates an
/// unreachable shadow that still occupies a help-listing slot. The same rule
/// lets a user-registered "help" sub-command shadow the built-in one.
pub struct CommandDispatcher {
    ctx: CommandContext,
    subs: Vec<Box<dyn SubCommand>>,
    help: Option<HelpCommand>,
}

impl CommandDispatcher {
    /// Dispatcher without the paginated help pseudo-command: a no-argument
    /// invocation renders a single help screen instead.
    pub fn new(
        name: &str,
        config: Arc<dyn ConfigStore>,
        messages: Arc<dyn MessageSource>,
    ) -> Self {
        Self::build(name, config, messages, false)
    }

    /// Dispatcher with the built-in multi-page "help" pseudo-command.
    pub fn with_paged_help(
        name: &str,
        config: Arc<dyn ConfigStore>,
        messages: Arc<dyn MessageSource>,
    ) -> Self {
        Self::build(name, config, messages, true)
    }

    fn build(
        name: &str,
        config: Arc<dyn ConfigStore>,
        messages: Arc<dyn MessageSource>,
        paged_help: bool,
    ) -> Self {
        let ctx = CommandContext::new(name, config, messages);
        let help = paged_help.then(|| HelpCommand::new(&ctx));
        Self {
            ctx,
            subs: Vec::new(),
            help,
        }
    }

    pub fn name(&self) -> &str {
        self.ctx.name()
    }

    pub fn context(&self) -> &CommandContext {
        &self.ctx
    }

    /// The built-in help pseudo-command, when paged help is enabled.
    pub fn help_command(&self) -> Option<&HelpCommand> {
        self.help.as_ref()
    }

    /// Append a sub-command to the registry.
    pub fn register(&mut self, sub: Box<dyn SubCommand>) {
        self.subs.push(sub);
    }

    /// Register from a possibly-failing factory. A factory error is logged
    /// and yields false; a factory that produces nothing yields false
    /// silently. Returns true iff a sub-command was registered.
    pub fn register_with<F>(&mut self, factory: F) -> bool
    where
        F: FnOnce() -> anyhow::Result<Option<Box<dyn SubCommand>>>,
    {
        match factory() {
            Ok(Some(sub)) => {
                debug!(command = %self.ctx.name, sub = %sub.name(), "registered sub-command");
                self.subs.push(sub);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(command = %self.ctx.name, error = %e, "sub-command registration failed");
                false
            }
        }
    }

    /// Conditional registration: when `condition` is false the factory is
    /// never invoked.
    pub fn register_if<F>(&mut self, factory: F, condition: bool) -> bool
    where
        F: FnOnce() -> anyhow::Result<Option<Box<dyn SubCommand>>>,
    {
        if !condition {
            return false;
        }
        self.register_with(factory)
    }

    /// Reload the dispatcher's config store, then every registered
    /// sub-command in order, then the help pseudo-command. The store must be
    /// fresh before dependents re-read derived values from it.
    pub fn reload(&mut self) {
        if let Err(e) = self.ctx.config.reload() {
            warn!(command = %self.ctx.name, error = %e, "config reload failed, keeping current values");
        }
        for sub in &mut self.subs {
            sub.reload(&self.ctx);
        }
        if let Some(help) = &mut self.help {
            help.reload(&self.ctx);
        }
    }

    /// The sub-commands `sender` may invoke, in registration order, plus the
    /// help pseudo-command appended last iff paged help is enabled and the
    /// registry is non-empty. Recomputed per request; permissions can change
    /// between calls.
    pub fn allowed_sub_commands(&self, sender: &dyn Sender) -> Vec<AllowedEntry<'_>> {
        let mut list: Vec<AllowedEntry<'_>> = self
            .subs
            .iter()
            .filter(|sub| sender.has_permission(sub.permission()))
            .map(|sub| AllowedEntry::Sub(sub.as_ref()))
            .collect();
        if let Some(help) = &self.help {
            if !self.subs.is_empty() {
                list.push(AllowedEntry::Help(help));
            }
        }
        list
    }

    /// Resolve a first-argument token: registry first (first match wins),
    /// then the help pseudo-name when the sender's allowed view is non-empty.
    pub(crate) fn resolve(&self, token: &str, sender: &dyn Sender) -> Option<Resolved<'_>> {
        for sub in &self.subs {
            if sub.name().eq_ignore_ascii_case(token) {
                return Some(Resolved::Sub(sub.as_ref()));
            }
        }
        if let Some(help) = &self.help {
            if HelpCommand::NAME.eq_ignore_ascii_case(token)
                && !self.allowed_sub_commands(sender).is_empty()
            {
                return Some(Resolved::Help(help));
            }
        }
        None
    }

    /// Handle an invocation. Always reports the invocation as handled so the
    /// host never falls back to its own unknown-command behavior.
    pub fn dispatch(&self, sender: &dyn Sender, label: &str, args: &[String]) -> bool {
        match args.first().and_then(|token| self.resolve(token, sender)) {
            None => self.help(sender, label),
            Some(Resolved::Help(help)) => {
                // the built-in pseudo-command skips the permission gate
                help.execute(self, sender, label, args);
            }
            Some(Resolved::Sub(sub)) => {
                if self.validate_requires(sub, sender) {
                    sub.execute(&self.ctx, sender, label, args);
                }
            }
        }
        true
    }

    /// Ordered precondition checks: permission, then player-only, then
    /// held-item. The first failure sends its denial message and stops.
    fn validate_requires(&self, sub: &dyn SubCommand, sender: &dyn Sender) -> bool {
        if !sender.has_permission(sub.permission()) {
            self.send_permission_lack(sub.permission(), sender);
            return false;
        }
        if sub.player_only() {
            let Some(actor) = sender.as_actor() else {
                self.send_player_only(sender);
                return false;
            };
            if sub.requires_held_item() && !actor.holds_item() {
                self.send_no_item_in_hand(sender);
                return false;
            }
        }
        true
    }

    /// Tab-completion. One token: allowed names by case-insensitive prefix.
    /// Later tokens: delegated to the resolved sub-command iff the sender
    /// holds its permission. Never fails; unresolved yields empty.
    pub fn tab_complete(&self, sender: &dyn Sender, _label: &str, args: &[String]) -> Vec<String> {
        if args.len() == 1 {
            return filter_prefix(
                &args[0],
                self.allowed_sub_commands(sender)
                    .iter()
                    .map(|entry| entry.name().to_string()),
            );
        }
        if args.len() > 1 {
            return match self.resolve(&args[0], sender) {
                Some(Resolved::Sub(sub)) if sender.has_permission(sub.permission()) => {
                    sub.complete(&self.ctx, sender, args)
                }
                Some(Resolved::Help(help)) => help.complete(self, sender, args),
                _ => Vec::new(),
            };
        }
        Vec::new()
    }

    /// Render help for a sender with no or unknown sub-command: page 1 of
    /// the paginated help when enabled, otherwise the single-page listing.
    fn help(&self, sender: &dyn Sender, label: &str) {
        if let Some(help) = &self.help {
            help.render_page(self, sender, label, 1);
            return;
        }
        let header = self.ctx.lang(
            "help-header",
            &format!("{} - Help", self.ctx.name()),
            Some(sender),
            &[],
        );
        let mut doc = TextDocument::new();
        doc.push_base(header);
        doc.push_base("\n");
        let mut any = false;
        for sub in &self.subs {
            if sender.has_permission(sub.permission()) {
                if any {
                    doc.push_base("\n");
                }
                any = true;
                sub.append_help(&mut doc, &self.ctx, sender, label);
            }
        }
        if any {
            sender.send(doc);
        } else {
            self.send_permission_lack_generic(sender);
        }
    }

    pub fn send_permission_lack(&self, permission: &str, sender: &dyn Sender) {
        self.send_plain(
            sender,
            self.ctx.global(
                "lack-permission",
                "You lack the permission %permission%",
                Some(sender),
                &[("%permission%", permission)],
            ),
        );
    }

    pub fn send_permission_lack_generic(&self, sender: &dyn Sender) {
        self.send_plain(
            sender,
            self.ctx.global(
                "lack-permission-generic",
                "You don't have permission to use this command",
                Some(sender),
                &[],
            ),
        );
    }

    pub fn send_player_only(&self, sender: &dyn Sender) {
        self.send_plain(
            sender,
            self.ctx
                .global("player-only", "Command for players only", Some(sender), &[]),
        );
    }

    pub fn send_no_item_in_hand(&self, sender: &dyn Sender) {
        self.send_plain(
            sender,
            self.ctx.global(
                "no-item-on-hand",
                "You need to hold an item in hand",
                Some(sender),
                &[],
            ),
        );
    }

    fn send_plain(&self, sender: &dyn Sender, text: String) {
        let mut doc = TextDocument::new();
        doc.push_base(text);
        sender.send(doc);
    }
}
