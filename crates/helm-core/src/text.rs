use serde::{Deserialize, Serialize};

/// How a run relates to the formatting of the text before it.
///
/// `Base` resets to unformatted text; `Inherit` keeps whatever formatting the
/// surrounding template established. Hosts that render to plain terminals may
/// ignore the distinction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatRetention {
    Base,
    #[default]
    Inherit,
}

/// An activation action carried by a clickable run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickAction {
    /// Re-invoke a command on behalf of the sender, e.g. "/ie help 3".
    RunCommand(String),
    /// Pre-fill the sender's input line without running it.
    SuggestCommand(String),
}

/// A single styled run of text, optionally clickable and with a hover tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub retention: FormatRetention,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click: Option<ClickAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
}

impl TextRun {
    /// A run that inherits surrounding formatting.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            retention: FormatRetention::Inherit,
            click: None,
            hover: None,
        }
    }

    /// A run rendered as unformatted base text.
    pub fn base(text: impl Into<String>) -> Self {
        Self {
            retention: FormatRetention::Base,
            ..Self::new(text)
        }
    }

    pub fn with_click(mut self, click: ClickAction) -> Self {
        self.click = Some(click);
        self
    }

    pub fn with_hover(mut self, hover: impl Into<String>) -> Self {
        self.hover = Some(hover.into());
        self
    }
}

/// An abstract rich-text document: an ordered sequence of runs.
///
/// Dispatchers build documents; hosts render and deliver them. The type is
/// serializable so it can cross a process boundary unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextDocument {
    pub runs: Vec<TextRun>,
}

impl TextDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Append a plain, unformatted run.
    pub fn push_base(&mut self, text: impl Into<String>) {
        self.push(TextRun::base(text));
    }

    /// Append a run inheriting surrounding formatting.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.push(TextRun::new(text));
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// The concatenated text of all runs, without styling.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}
