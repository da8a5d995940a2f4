//! Defines a gitlab commit, as returned by the commits API and sent in push webhooks

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Author of a commit, as found in webhook payloads
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Author {
    /// Name
    pub name: String,
    /// Email
    pub email: String,
}

/// Defines a [gitlab commit](https://docs.gitlab.com/api/commits/)
///
/// The API and the webhooks don't send the same fields, everything but `id` is optional
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Commit {
    /// Full SHA
    pub id: String,
    /// Abbreviated SHA
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
    /// First line of the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Full message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Webhooks only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// API only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// API only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    /// Webhooks only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<FixedOffset>>,
    /// API only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<FixedOffset>>,
    /// Web URL of the commit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// SHAs of the parents, API only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_ids: Vec<String>,
}

impl Commit {
    /// Author name, wherever gitlab put it
    #[must_use]
    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_ref()
            .map(|author| author.name.as_str())
            .or(self.author_name.as_deref())
    }
}
