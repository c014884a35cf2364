//! Extension identifiers.
//!
//! A bookmark is keyed by the marketplace identifier `<publisher>.<name>`.
//! Parsing trims surrounding whitespace and requires exactly one separator
//! with non-empty halves; the key is otherwise stored verbatim and compared
//! by exact string equality.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::IdentifierError;

const MARKETPLACE_ITEM_URL: &str = "https://marketplace.visualstudio.com/items?itemName=";

/// Normalized `publisher.name` key of a bookmarked extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExtensionId {
    publisher: String,
    name: String,
}

impl ExtensionId {
    /// Parses raw user input into an identifier.
    ///
    /// # Errors
    /// `IdentifierError::Blank` for empty or whitespace-only input,
    /// `IdentifierError::Malformed` when the input is not `<publisher>.<name>`.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::Blank);
        }

        let mut parts = trimmed.split('.');
        let (publisher, name) = match (parts.next(), parts.next(), parts.next()) {
            (Some(p), Some(n), None) => (p, n),
            _ => return Err(IdentifierError::Malformed(trimmed.to_string())),
        };

        if !is_valid_segment(publisher) || !is_valid_segment(name) {
            return Err(IdentifierError::Malformed(trimmed.to_string()));
        }

        Ok(Self {
            publisher: publisher.to_string(),
            name: name.to_string(),
        })
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Link to the extension's marketplace page.
    pub fn marketplace_url(&self) -> String {
        format!("{}{}", MARKETPLACE_ITEM_URL, self)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.publisher, self.name)
    }
}

impl TryFrom<String> for ExtensionId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ExtensionId> for String {
    fn from(id: ExtensionId) -> Self {
        id.to_string()
    }
}

impl PartialEq<str> for ExtensionId {
    fn eq(&self, other: &str) -> bool {
        other
            .split_once('.')
            .map(|(p, n)| p == self.publisher && n == self.name)
            .unwrap_or(false)
    }
}

impl PartialEq<&str> for ExtensionId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
