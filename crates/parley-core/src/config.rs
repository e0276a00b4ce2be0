//! Engine configuration.

/// Tunables and user-facing texts of the dialog engine.
///
/// `Default` reproduces the stock behavior. Override single fields with
/// struct update syntax:
///
/// ```
/// use parley_core::EngineConfig;
///
/// let config = EngineConfig { batch_limit: 2, ..Default::default() };
/// assert_eq!(config.batch_limit, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Buffered segments that trigger an automatic flush.
    pub batch_limit: usize,
    /// Separator placed between buffered segments on flush.
    pub separator: String,
    /// Literals that abort any prompt.
    pub quit_literals: Vec<String>,
    /// Extra literals that abort selection prompts only.
    pub selection_quit_literals: Vec<String>,
    /// Notice sent when the user aborts a prompt.
    pub cancel_notice: String,
    /// Suffix appended by `notify_error`.
    pub escape_hint: String,
    /// Prefix placed before the author's confirmation prompt.
    pub confirm_prefix: String,
    /// Default label of the affirmative confirmation option.
    pub confirm_yes: String,
    /// Default label of the negative confirmation option.
    pub confirm_no: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_limit: 4,
            separator: "\n\n".to_owned(),
            quit_literals: vec!["/quit".to_owned(), "/q".to_owned()],
            selection_quit_literals: vec!["0".to_owned(), "q".to_owned()],
            cancel_notice: "😤 Dialog stopped.".to_owned(),
            escape_hint: "Type /quit or /q if you give up.".to_owned(),
            confirm_prefix: "🤝 Do you confirm this operation❓".to_owned(),
            confirm_yes: "Yes, I confirm".to_owned(),
            confirm_no: "No, cancel please".to_owned(),
        }
    }
}

impl EngineConfig {
    /// True if `text` aborts a free-text prompt.
    pub fn is_quit(&self, text: &str) -> bool {
        self.quit_literals.iter().any(|literal| literal == text)
    }

    /// True if `text` aborts a selection prompt.
    pub fn is_selection_quit(&self, text: &str) -> bool {
        self.is_quit(text) || self.selection_quit_literals.iter().any(|literal| literal == text)
    }

    /// Re-prompt shown after an unrecognized selection answer.
    pub fn invalid_selection(&self, option_count: usize, prompt: &str) -> String {
        format!(
            "😡 Please select a valid option or send a number between 1 and {option_count}. \
             Use /quit or 0 or q to exit. {prompt}"
        )
    }
}
