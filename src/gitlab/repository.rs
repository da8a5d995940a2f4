//! Defines the repository description sent in webhook payloads

use serde::{Deserialize, Serialize};

/// Repository of the project a webhook event is about
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Repository {
    /// Repository name
    pub name: String,
    /// Clone URL (ssh)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Project web URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Clone URL (http)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_http_url: Option<String>,
    /// Clone URL (ssh)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_ssh_url: Option<String>,
    /// `0` private, `10` internal, `20` public
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_level: Option<u8>,
}
