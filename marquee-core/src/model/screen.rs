use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stable identifier of a configured display, assigned in the directory file.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ScreenId(pub u32);

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ScreenId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[derive(Debug, Error)]
#[error("invalid screen id: {0:?}")]
pub struct ParseScreenIdError(String);

impl FromStr for ScreenId {
    type Err = ParseScreenIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(Self)
            .map_err(|_| ParseScreenIdError(s.to_string()))
    }
}

/// What a screen is currently showing.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Default,
    Text,
    Url,
    Video,
    Picture,
}

/// Content fields pushed to a screen. Only the field matching `kind` is
/// meaningful; the rest stay empty, matching the on-disk records.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ContentDescriptor {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub video: String,
    #[serde(default)]
    pub picture: String,
}

impl ContentDescriptor {
    pub fn default_content() -> Self {
        Self {
            kind: ContentKind::Default,
            text: String::new(),
            url: String::new(),
            video: String::new(),
            picture: String::new(),
        }
    }
}

/// One configured display as described by the directory. Connection state is
/// tracked by the server registries, never stored here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Screen {
    pub id: ScreenId,
    pub name: String,
    #[serde(flatten)]
    pub content: ContentDescriptor,
}

impl Screen {
    pub fn new(id: ScreenId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            content: ContentDescriptor::default_content(),
        }
    }
}
