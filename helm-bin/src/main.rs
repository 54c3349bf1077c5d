//! Interactive demo REPL for the helm command framework.
//!
//! Wires a console-backed [`Sender`] to a dispatcher with a few demo
//! sub-commands. Lines are dispatched as `/helm <args...>`; a leading `?`
//! shows tab-completions for the rest of the line instead.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use console::style;
use tracing::info;
use tracing_subscriber::EnvFilter;

use helm_command::{CommandContext, CommandDispatcher, SubCommand};
use helm_config::{MessageCatalog, TomlStore};
use helm_core::{
    Actor, ClickAction, ConfigStore, MessageSource, NullConfig, Sender, StaticMessages,
    TextDocument,
};

#[derive(Parser)]
#[command(name = "helm", version, about = "Interactive demo REPL for the helm command framework")]
struct Cli {
    /// Dispatcher configuration file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of <locale>.toml message files.
    #[arg(long)]
    messages: Option<PathBuf>,

    /// Default locale for message lookups.
    #[arg(long, default_value = "en")]
    locale: String,

    /// Permissions granted to the console sender ("*" grants everything).
    #[arg(long = "grant", value_name = "PERMISSION")]
    grants: Vec<String>,

    /// Treat the console as a physical actor.
    #[arg(long)]
    player: bool,

    /// Pretend the actor holds an item in hand (implies --player).
    #[arg(long)]
    holding: bool,
}

struct ConsoleActor {
    holding: bool,
}

impl Actor for ConsoleActor {
    fn holds_item(&self) -> bool {
        self.holding
    }
}

struct ConsoleSender {
    grants: Vec<String>,
    actor: Option<ConsoleActor>,
}

impl Sender for ConsoleSender {
    fn name(&self) -> &str {
        "console"
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.grants.iter().any(|g| g == permission || g == "*")
    }

    fn as_actor(&self) -> Option<&dyn Actor> {
        self.actor.as_ref().map(|a| a as &dyn Actor)
    }

    fn send(&self, doc: TextDocument) {
        let mut out = String::new();
        for run in &doc.runs {
            match &run.click {
                Some(ClickAction::RunCommand(cmd)) => {
                    out.push_str(&style(&run.text).cyan().underlined().to_string());
                    out.push_str(&style(format!("[{cmd}]")).dim().to_string());
                }
                Some(ClickAction::SuggestCommand(_)) => {
                    out.push_str(&style(&run.text).green().to_string());
                }
                None => out.push_str(&run.text),
            }
        }
        println!("{out}");
    }
}

struct EchoCommand;

impl SubCommand for EchoCommand {
    fn name(&self) -> &str {
        "echo"
    }

    fn permission(&self) -> &str {
        "helm.echo"
    }

    fn execute(&self, _ctx: &CommandContext, sender: &dyn Sender, _label: &str, args: &[String]) {
        let mut doc = TextDocument::new();
        doc.push_base(args[1..].join(" "));
        sender.send(doc);
    }

    fn params(&self, ctx: &CommandContext, sender: &dyn Sender) -> String {
        ctx.lang("echo.params", "<text...>", Some(sender), &[])
    }

    fn description(&self, ctx: &CommandContext, sender: &dyn Sender) -> String {
        ctx.lang("echo.description", "Repeat the arguments back", Some(sender), &[])
    }
}

struct PingCommand;

impl SubCommand for PingCommand {
    fn name(&self) -> &str {
        "ping"
    }

    fn permission(&self) -> &str {
        "helm.ping"
    }

    fn execute(&self, ctx: &CommandContext, sender: &dyn Sender, _label: &str, _args: &[String]) {
        let mut doc = TextDocument::new();
        doc.push_base(ctx.lang("ping.reply", "pong", Some(sender), &[]));
        sender.send(doc);
    }

    fn description(&self, ctx: &CommandContext, sender: &dyn Sender) -> String {
        ctx.lang("ping.description", "Check that the dispatcher is alive", Some(sender), &[])
    }
}

/// Player-gated command: exercises the players-only and held-item denials.
struct InspectCommand;

impl SubCommand for InspectCommand {
    fn name(&self) -> &str {
        "inspect"
    }

    fn permission(&self) -> &str {
        "helm.inspect"
    }

    fn player_only(&self) -> bool {
        true
    }

    fn requires_held_item(&self) -> bool {
        true
    }

    fn execute(&self, ctx: &CommandContext, sender: &dyn Sender, _label: &str, _args: &[String]) {
        let mut doc = TextDocument::new();
        doc.push_base(ctx.lang(
            "inspect.reply",
            "The item in your hand looks fine",
            Some(sender),
            &[],
        ));
        sender.send(doc);
    }

    fn description(&self, ctx: &CommandContext, sender: &dyn Sender) -> String {
        ctx.lang("inspect.description", "Examine the item in your hand", Some(sender), &[])
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let config: Arc<dyn ConfigStore> = match &cli.config {
        Some(path) => Arc::new(TomlStore::open(path)?),
        None => Arc::new(NullConfig),
    };
    let messages: Arc<dyn MessageSource> = match &cli.messages {
        Some(dir) => Arc::new(MessageCatalog::load(dir, cli.locale.clone())?),
        None => Arc::new(StaticMessages),
    };

    let mut dispatcher = CommandDispatcher::with_paged_help("helm", config, messages);
    dispatcher.register(Box::new(EchoCommand));
    dispatcher.register(Box::new(PingCommand));
    dispatcher.register(Box::new(InspectCommand));

    let sender = ConsoleSender {
        grants: cli.grants.clone(),
        actor: (cli.player || cli.holding).then(|| ConsoleActor {
            holding: cli.holding,
        }),
    };

    info!(command = dispatcher.name(), "dispatcher ready");
    println!("helm demo: type sub-commands, '?<partial>' for completions, 'quit' to exit");

    let stdin = std::io::stdin();
    loop {
        print!("helm> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "reload" => {
                dispatcher.reload();
                println!("reloaded");
                continue;
            }
            _ => {}
        }
        if let Some(partial) = line.strip_prefix('?') {
            let mut args: Vec<String> =
                partial.split_whitespace().map(str::to_string).collect();
            if args.is_empty() || partial.ends_with(' ') {
                args.push(String::new());
            }
            println!("{}", dispatcher.tab_complete(&sender, "helm", &args).join("  "));
            continue;
        }
        let args: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        dispatcher.dispatch(&sender, "helm", &args);
    }
    Ok(())
}
