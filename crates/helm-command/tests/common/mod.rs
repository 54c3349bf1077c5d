#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use helm_command::{CommandContext, SubCommand};
use helm_core::{Actor, Sender, TextDocument};

pub struct TestActor {
    pub holding: bool,
    pub locale: Option<String>,
}

impl Actor for TestActor {
    fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    fn holds_item(&self) -> bool {
        self.holding
    }
}

/// Records every document sent to it; `"*"` grants every permission.
pub struct TestSender {
    pub name: String,
    pub perms: Vec<String>,
    pub actor: Option<TestActor>,
    pub sent: RefCell<Vec<TextDocument>>,
}

impl TestSender {
    pub fn with_perms(perms: &[&str]) -> Self {
        Self {
            name: "tester".into(),
            perms: perms.iter().map(|p| p.to_string()).collect(),
            actor: None,
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn player(perms: &[&str], holding: bool) -> Self {
        Self {
            actor: Some(TestActor {
                holding,
                locale: None,
            }),
            ..Self::with_perms(perms)
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.borrow().len()
    }

    pub fn last_doc(&self) -> TextDocument {
        self.sent.borrow().last().cloned().expect("nothing sent")
    }

    pub fn last_text(&self) -> String {
        self.last_doc().plain_text()
    }
}

impl Sender for TestSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.perms.iter().any(|p| p == permission || p == "*")
    }

    fn as_actor(&self) -> Option<&dyn Actor> {
        self.actor.as_ref().map(|a| a as &dyn Actor)
    }

    fn send(&self, doc: TextDocument) {
        self.sent.borrow_mut().push(doc);
    }
}

/// A sub-command that records the argument lists it was executed with.
pub struct StubCommand {
    pub name: String,
    pub permission: String,
    pub player_only: bool,
    pub requires_item: bool,
    pub runs: Rc<RefCell<Vec<Vec<String>>>>,
    pub completions: Vec<String>,
}

impl StubCommand {
    pub fn new(name: &str, permission: &str) -> Self {
        Self {
            name: name.into(),
            permission: permission.into(),
            player_only: false,
            requires_item: false,
            runs: Rc::new(RefCell::new(Vec::new())),
            completions: Vec::new(),
        }
    }

    pub fn player_only(mut self) -> Self {
        self.player_only = true;
        self
    }

    pub fn requires_item(mut self) -> Self {
        self.requires_item = true;
        self
    }

    pub fn completions(mut self, completions: &[&str]) -> Self {
        self.completions = completions.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn run_log(&self) -> Rc<RefCell<Vec<Vec<String>>>> {
        Rc::clone(&self.runs)
    }
}

impl SubCommand for StubCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn permission(&self) -> &str {
        &self.permission
    }

    fn player_only(&self) -> bool {
        self.player_only
    }

    fn requires_held_item(&self) -> bool {
        self.requires_item
    }

    fn execute(&self, _ctx: &CommandContext, _sender: &dyn Sender, _label: &str, args: &[String]) {
        self.runs.borrow_mut().push(args.to_vec());
    }

    fn complete(
        &self,
        _ctx: &CommandContext,
        _sender: &dyn Sender,
        _args: &[String],
    ) -> Vec<String> {
        self.completions.clone()
    }
}

pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
