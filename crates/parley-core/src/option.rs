//! Selectable menu options.
//!
//! A [`MenuOption`] is one choice presented to the user. Options are grouped
//! into keyboard rows through [`MenuEntry`], a closed type: anything that is
//! not an option or a row of options cannot be handed to a selection prompt.

use std::fmt;

/// One selectable choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    /// Text shown to the user (without the numeric prefix).
    pub caption: String,
    /// Author-supplied key. `None` means the option is identified by its
    /// 1-based position in the flattened menu.
    pub key: Option<String>,
}

impl MenuOption {
    /// Option identified by its position.
    pub fn new(caption: impl Into<String>) -> Self {
        Self { caption: caption.into(), key: None }
    }

    /// Option identified by an explicit key.
    pub fn keyed(caption: impl Into<String>, key: impl Into<String>) -> Self {
        Self { caption: caption.into(), key: Some(key.into()) }
    }

    /// Effective key of this option when it sits at `position` (1-based).
    ///
    /// An empty author key counts as absent.
    pub fn effective_key(&self, position: usize) -> OptionKey {
        match self.key.as_deref() {
            Some(key) if !key.is_empty() => OptionKey::Named(key.to_owned()),
            _ => OptionKey::Position(position),
        }
    }
}

/// Value returned by a selection prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionKey {
    /// Author-supplied key.
    Named(String),
    /// 1-based position of an option without a key.
    Position(usize),
}

impl OptionKey {
    /// Named key, if this is one.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(key) => Some(key),
            Self::Position(_) => None,
        }
    }

    /// Position, if the option had no author key.
    pub fn as_position(&self) -> Option<usize> {
        match self {
            Self::Named(_) => None,
            Self::Position(position) => Some(*position),
        }
    }
}

impl PartialEq<str> for OptionKey {
    fn eq(&self, other: &str) -> bool {
        self.as_named() == Some(other)
    }
}

impl PartialEq<&str> for OptionKey {
    fn eq(&self, other: &&str) -> bool {
        self.as_named() == Some(*other)
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(key) => f.write_str(key),
            Self::Position(position) => write!(f, "{position}"),
        }
    }
}

/// Keyboard layout unit handed to a selection prompt.
///
/// Numbering runs across the flattened, row-major sequence of options,
/// ignoring row boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// A single option on its own keyboard row.
    Single(MenuOption),
    /// Several options sharing one keyboard row.
    Row(Vec<MenuOption>),
}

impl MenuEntry {
    /// Options in this entry, left to right.
    pub fn options(&self) -> &[MenuOption] {
        match self {
            Self::Single(option) => std::slice::from_ref(option),
            Self::Row(options) => options,
        }
    }
}

impl From<MenuOption> for MenuEntry {
    fn from(option: MenuOption) -> Self {
        Self::Single(option)
    }
}

impl From<Vec<MenuOption>> for MenuEntry {
    fn from(options: Vec<MenuOption>) -> Self {
        Self::Row(options)
    }
}

impl<const N: usize> From<[MenuOption; N]> for MenuEntry {
    fn from(options: [MenuOption; N]) -> Self {
        Self::Row(options.into())
    }
}
