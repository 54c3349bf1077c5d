use helm_core::{ClickAction, Sender, TextDocument, TextRun, apply_placeholders, filter_prefix};

use crate::dispatcher::{CommandContext, CommandDispatcher, Resolved};
use crate::pager::split_markers;
use crate::sub::append_usage_block;

/// The built-in paginated "help" pseudo-command.
///
/// Constructed and owned by the dispatcher, never registered, so it sits
/// outside the registry's shadowing rules: a user-registered sub-command
/// named "help" wins on lookup. Its second argument is dual-purpose: a page
/// number, or a sub-command name for a dedicated single-entry help screen.
pub struct HelpCommand {
    commands_per_page: usize,
}

impl HelpCommand {
    pub const NAME: &'static str = "help";

    pub(crate) fn new(ctx: &CommandContext) -> Self {
        Self {
            commands_per_page: Self::configured_per_page(ctx),
        }
    }

    /// Floor of 4 guards against one-item pages from broken config.
    fn configured_per_page(ctx: &CommandContext) -> usize {
        ctx.conf_int("help.commands_per_page").max(4) as usize
    }

    pub fn commands_per_page(&self) -> usize {
        self.commands_per_page
    }

    pub(crate) fn reload(&mut self, ctx: &CommandContext) {
        self.commands_per_page = Self::configured_per_page(ctx);
    }

    /// Number of help pages for `elements` entries; 0 for an empty list.
    pub fn page_count(&self, elements: usize) -> usize {
        elements / self.commands_per_page
            + if elements % self.commands_per_page == 0 {
                0
            } else {
                1
            }
    }

    pub(crate) fn execute(
        &self,
        dispatcher: &CommandDispatcher,
        sender: &dyn Sender,
        label: &str,
        args: &[String],
    ) {
        let mut page: i64 = 1;
        if let Some(arg) = args.get(1) {
            match arg.parse::<i64>() {
                Ok(parsed) => page = parsed,
                Err(_) => {
                    // not a page number: maybe a sub-command name
                    if let Some(resolved) = dispatcher.resolve(arg, sender) {
                        self.render_sub(dispatcher, sender, label, &resolved);
                        return;
                    }
                }
            }
        }
        self.render_page(dispatcher, sender, label, page);
    }

    /// Dedicated help screen for a single sub-command.
    fn render_sub(
        &self,
        dispatcher: &CommandDispatcher,
        sender: &dyn Sender,
        label: &str,
        resolved: &Resolved<'_>,
    ) {
        let ctx = dispatcher.context();
        let (name, params, description) = match resolved {
            Resolved::Sub(sub) => (
                sub.name().to_string(),
                sub.params(ctx, sender),
                sub.description(ctx, sender),
            ),
            Resolved::Help(help) => (
                Self::NAME.to_string(),
                help.params(ctx, sender),
                help.description(ctx, sender),
            ),
        };
        let header = ctx.lang(
            "help.header-sub",
            &format!("{} %sub% - Help", ctx.name()),
            Some(sender),
            &[("%sub%", &name)],
        );
        let mut doc = TextDocument::new();
        doc.push_base(header);
        doc.push_base("\n");
        append_usage_block(&mut doc, label, &name, &params, &description);
        sender.send(doc);
    }

    fn params(&self, ctx: &CommandContext, sender: &dyn Sender) -> String {
        ctx.lang("help.params", "[page]", Some(sender), &[])
    }

    fn description(&self, ctx: &CommandContext, sender: &dyn Sender) -> String {
        ctx.lang(
            "help.description",
            "Show the command help",
            Some(sender),
            &[],
        )
    }

    pub(crate) fn append_help(
        &self,
        doc: &mut TextDocument,
        ctx: &CommandContext,
        sender: &dyn Sender,
        label: &str,
    ) {
        let params = self.params(ctx, sender);
        let description = self.description(ctx, sender);
        append_usage_block(doc, label, Self::NAME, &params, &description);
    }

    /// Render one help page. The page is clamped into `[1, page_count]`; a
    /// sender with an empty allowed view gets the generic denial instead.
    pub(crate) fn render_page(
        &self,
        dispatcher: &CommandDispatcher,
        sender: &dyn Sender,
        label: &str,
        page: i64,
    ) {
        let allowed = dispatcher.allowed_sub_commands(sender);
        if allowed.is_empty() {
            dispatcher.send_permission_lack_generic(sender);
            return;
        }
        let ctx = dispatcher.context();
        let max_page = self.page_count(allowed.len());
        let page = page.clamp(1, max_page as i64) as usize;

        let mut doc = TextDocument::new();
        let header = ctx.lang(
            "help.header",
            &format!("{} - Help", ctx.name()),
            Some(sender),
            &[],
        );
        self.inject_page_controls(&mut doc, &header, ctx, sender, label, page, max_page);
        doc.push_base("\n");

        let start = self.commands_per_page * (page - 1);
        let end = allowed.len().min(self.commands_per_page * page);
        for entry in &allowed[start..end] {
            entry.append_help(&mut doc, ctx, sender, label);
            doc.push_base("\n");
        }

        let footer = ctx.lang(
            "help.footer",
            &format!("{} - Help", ctx.name()),
            Some(sender),
            &[],
        );
        self.inject_page_controls(&mut doc, &footer, ctx, sender, label, page, max_page);
        sender.send(doc);
    }

    /// Substitute `%page%`/`%max_page%`, split the template on its markers
    /// and splice prev/next controls into the marker positions.
    fn inject_page_controls(
        &self,
        doc: &mut TextDocument,
        template: &str,
        ctx: &CommandContext,
        sender: &dyn Sender,
        label: &str,
        page: usize,
        max_page: usize,
    ) {
        let template = apply_placeholders(
            template,
            &[
                ("%page%", &page.to_string()),
                ("%max_page%", &max_page.to_string()),
            ],
        );
        let segments = split_markers(&template);
        doc.push_base(segments.head);
        if let Some(tail) = segments.next_tail {
            doc.push(self.next_control(ctx, sender, label, page, max_page));
            doc.push_text(tail);
        }
        if let Some(after) = segments.after_head {
            doc.push(self.prev_control(ctx, sender, label, page, max_page));
            doc.push_text(after);
        }
        if let Some(tail) = segments.after_next_tail {
            doc.push(self.next_control(ctx, sender, label, page, max_page));
            doc.push_text(tail);
        }
    }

    /// Active when a next page exists, inert ("void") on the last page.
    fn next_control(
        &self,
        ctx: &CommandContext,
        sender: &dyn Sender,
        label: &str,
        page: usize,
        max_page: usize,
    ) -> TextRun {
        let page_s = page.to_string();
        let max_s = max_page.to_string();
        if page < max_page {
            let target = (page + 1).to_string();
            let text = ctx.lang(
                "help.next_text",
                ">>>>",
                Some(sender),
                &[("%target%", &target), ("%page%", &page_s)],
            );
            let hover = ctx.lang(
                "help.next_hover",
                "Go to page %target%",
                Some(sender),
                &[
                    ("%target%", &target),
                    ("%page%", &page_s),
                    ("%max_page%", &max_s),
                ],
            );
            TextRun::new(text)
                .with_click(ClickAction::RunCommand(format!(
                    "/{label} {} {target}",
                    Self::NAME
                )))
                .with_hover(hover)
        } else {
            TextRun::new(ctx.lang(
                "help.next_void",
                ">>>>",
                Some(sender),
                &[("%page%", &page_s), ("%max_page%", &max_s)],
            ))
        }
    }

    /// Active when a previous page exists, inert on page 1.
    fn prev_control(
        &self,
        ctx: &CommandContext,
        sender: &dyn Sender,
        label: &str,
        page: usize,
        max_page: usize,
    ) -> TextRun {
        let page_s = page.to_string();
        let max_s = max_page.to_string();
        if page > 1 {
            let target = (page - 1).to_string();
            let text = ctx.lang(
                "help.prev_text",
                "<<<<",
                Some(sender),
                &[("%target%", &target), ("%page%", &page_s)],
            );
            let hover = ctx.lang(
                "help.prev_hover",
                "Go to page %target%",
                Some(sender),
                &[
                    ("%target%", &target),
                    ("%page%", &page_s),
                    ("%max_page%", &max_s),
                ],
            );
            TextRun::new(text)
                .with_click(ClickAction::RunCommand(format!(
                    "/{label} {} {target}",
                    Self::NAME
                )))
                .with_hover(hover)
        } else {
            TextRun::new(ctx.lang(
                "help.prev_void",
                "<<<<",
                Some(sender),
                &[("%page%", &page_s), ("%max_page%", &max_s)],
            ))
        }
    }

    /// Completion for the second token: valid page numbers, then allowed
    /// sub-command names, prefix-filtered.
    pub(crate) fn complete(
        &self,
        dispatcher: &CommandDispatcher,
        sender: &dyn Sender,
        args: &[String],
    ) -> Vec<String> {
        if args.len() != 2 {
            return Vec::new();
        }
        let allowed = dispatcher.allowed_sub_commands(sender);
        let mut candidates: Vec<String> = (1..=self.page_count(allowed.len()))
            .map(|page| page.to_string())
            .collect();
        candidates.extend(allowed.iter().map(|entry| entry.name().to_string()));
        filter_prefix(&args[1], candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helm_core::{NullConfig, StaticMessages};
    use std::sync::Arc;

    fn ctx() -> CommandContext {
        CommandContext::new("ie", Arc::new(NullConfig), Arc::new(StaticMessages))
    }

    struct FixedPerPage(i32);

    impl helm_core::ConfigStore for FixedPerPage {
        fn load_str(&self, _path: &str, default: &str) -> String {
            default.to_string()
        }

        fn load_int(&self, _path: &str, _default: i32) -> i32 {
            self.0
        }

        fn load_long(&self, _path: &str, default: i64) -> i64 {
            default
        }

        fn load_bool(&self, _path: &str, default: bool) -> bool {
            default
        }

        fn reload(&self) -> helm_core::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn per_page_floor_is_four() {
        let help = HelpCommand::new(&ctx());
        assert_eq!(help.commands_per_page(), 4);

        let tiny = CommandContext::new("ie", Arc::new(FixedPerPage(2)), Arc::new(StaticMessages));
        assert_eq!(HelpCommand::new(&tiny).commands_per_page(), 4);

        let wide = CommandContext::new("ie", Arc::new(FixedPerPage(9)), Arc::new(StaticMessages));
        assert_eq!(HelpCommand::new(&wide).commands_per_page(), 9);
    }

    #[test]
    fn reload_reapplies_floor() {
        let tiny = CommandContext::new("ie", Arc::new(FixedPerPage(1)), Arc::new(StaticMessages));
        let mut help = HelpCommand::new(&ctx());
        help.reload(&tiny);
        assert_eq!(help.commands_per_page(), 4);
    }

    #[test]
    fn page_count_is_ceiling_division() {
        let help = HelpCommand::new(&ctx()); // per_page = 4
        assert_eq!(help.page_count(0), 0);
        assert_eq!(help.page_count(1), 1);
        assert_eq!(help.page_count(4), 1);
        assert_eq!(help.page_count(5), 2);
        assert_eq!(help.page_count(8), 2);
        assert_eq!(help.page_count(9), 3);
    }
}
