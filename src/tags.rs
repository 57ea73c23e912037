//! Substitution tags
//!
//! A tag is a named value that can be spliced into a prompt as a
//! `{{label}}` marker and substituted back out at resolution time.
//! Tag sets are small and ordered; duplicate labels follow a
//! last-defined-wins policy.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::error::StanzaError;

/// Labels start with a letter, then letters/digits/hyphens/underscores
static LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]*$").expect("valid label regex"));

/// A named substitution value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub label: String,
    pub value: String,
}

impl Tag {
    /// Create a tag, validating the label shape
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Result<Self, StanzaError> {
        let label = label.into();
        if !LABEL_RE.is_match(&label) {
            return Err(StanzaError::InvalidLabel { label });
        }
        Ok(Self { label, value: value.into() })
    }

    /// The `{{label}}` text this tag inserts into a buffer
    pub fn marker(&self) -> String {
        format!("{{{{{}}}}}", self.label)
    }
}

/// An ordered set of tags with unique labels.
///
/// Inserting a label that already exists replaces the earlier entry and
/// moves it to the end, so the most recent definition always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    entries: Vec<Tag>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag. Last definition wins on duplicate labels.
    pub fn insert(&mut self, tag: Tag) {
        self.entries.retain(|t| t.label != tag.label);
        self.entries.push(tag);
    }

    /// Validate and insert from raw parts
    pub fn insert_parts(
        &mut self,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), StanzaError> {
        self.insert(Tag::new(label, value)?);
        Ok(())
    }

    /// Look up a value by label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|t| t.label == label)
            .map(|t| t.value.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.entries.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|t| t.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// The tag set an editing session starts from: the row's name and current
/// content plus today's date.
pub fn standard_tags(channel: &Channel) -> TagSet {
    let mut tags = TagSet::new();
    tags.insert(Tag { label: "title".into(), value: channel.name.clone() });
    tags.insert(Tag { label: "content".into(), value: channel.content.clone() });
    tags.insert(Tag { label: "date".into(), value: today() });
    tags
}

/// Today's local date, `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
