//! Option catalogs (voice, music, transition) and their fallbacks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One selectable row of an option catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub name: String,
}

impl OptionItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The three remote option catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionCategory {
    Voice,
    Bgm,
    Transition,
}

impl OptionCategory {
    pub const ALL: &'static [OptionCategory] = &[
        OptionCategory::Voice,
        OptionCategory::Bgm,
        OptionCategory::Transition,
    ];

    /// Remote table name.
    pub fn table(&self) -> &'static str {
        match self {
            OptionCategory::Voice => "voice",
            OptionCategory::Bgm => "bgm",
            OptionCategory::Transition => "transition",
        }
    }

    /// Hard-coded fallback rows, also used to seed an empty table.
    pub fn defaults(&self) -> Vec<OptionItem> {
        match self {
            OptionCategory::Voice => vec![
                OptionItem::new("1", "Male"),
                OptionItem::new("2", "Female"),
                OptionItem::new("3", "Neutral"),
            ],
            OptionCategory::Bgm => vec![
                OptionItem::new("1", "BGM 1"),
                OptionItem::new("2", "BGM 2"),
                OptionItem::new("3", "BGM 3"),
            ],
            OptionCategory::Transition => vec![
                OptionItem::new("1", "MoveLeft"),
                OptionItem::new("2", "MoveRight"),
            ],
        }
    }
}

impl fmt::Display for OptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}
