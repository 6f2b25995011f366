//! Content items (poems) loaded read-only from an external catalog.

use serde::{Deserialize, Serialize};

/// A poem the reader can open (Value Object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub body: String,
}

impl ContentItem {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            body: body.into(),
        }
    }
}

/// Most senses a dictionary lookup returns.
pub const MAX_SENSES: usize = 4;

/// One dictionary sense of a word met while reading (Value Object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSense {
    pub word: String,
    pub definition: String,
    /// Part of speech, when the dictionary gives one
    pub pos: Option<String>,
    /// Subject field, e.g. "식물"
    pub category: Option<String>,
}

impl WordSense {
    pub fn new(word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
            pos: None,
            category: None,
        }
    }

    pub fn with_pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
