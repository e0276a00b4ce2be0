//! Selection table for one option prompt.
//!
//! Built from the author's [`MenuEntry`] list every time a selection prompt
//! starts and dropped once it resolves.

use std::collections::HashMap;

use crate::{Keyboard, MenuEntry, OptionKey};

/// Maps every literal that selects an option to its effective key.
///
/// Accepted literals per option, registered in this order:
/// 1-based index as digits, bare caption, numbered caption (`"N. caption"`),
/// and the author key when there is one. Later registrations overwrite
/// earlier ones, so on collisions the last option wins.
#[derive(Debug, Clone, Default)]
pub struct SelectionTable {
    entries: HashMap<String, OptionKey>,
    option_count: usize,
}

impl SelectionTable {
    /// Flatten `entries` row-major, number options from 1, and build both the
    /// lookup table and the numbered keyboard.
    pub fn build(entries: &[MenuEntry]) -> (Self, Keyboard) {
        let mut table = Self::default();
        let mut rows = Vec::with_capacity(entries.len());

        for entry in entries {
            let mut row = Vec::with_capacity(entry.options().len());
            for option in entry.options() {
                let index = table.option_count + 1;
                let key = option.effective_key(index);
                let label = numbered_caption(index, &option.caption);

                table.entries.insert(index.to_string(), key.clone());
                table.entries.insert(option.caption.clone(), key.clone());
                table.entries.insert(label.clone(), key.clone());
                if let OptionKey::Named(name) = &key {
                    table.entries.insert(name.clone(), key.clone());
                }

                table.option_count = index;
                row.push(label);
            }
            rows.push(row);
        }

        (table, Keyboard { rows })
    }

    /// Effective key for an exact (case-sensitive) literal.
    pub fn resolve(&self, literal: &str) -> Option<&OptionKey> {
        self.entries.get(literal)
    }

    /// Number of options presented.
    pub fn option_count(&self) -> usize {
        self.option_count
    }

    /// True if no options were presented.
    pub fn is_empty(&self) -> bool {
        self.option_count == 0
    }
}

/// Label shown on the keyboard for the option at `index`.
pub fn numbered_caption(index: usize, caption: &str) -> String {
    format!("{index}. {caption}")
}
