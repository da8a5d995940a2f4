//! Defines the payload of a [push event](https://docs.gitlab.com/user/project/integrations/webhook_events/#push-events)

use serde::{Deserialize, Serialize};

use crate::gitlab::{commit::Commit, repository::Repository};

/// Prefix of the refs designating a branch
const REFS_HEADS: &str = "refs/heads/";

/// Sent by gitlab when commits are pushed to a project
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PushEvent {
    /// Always `push` for this event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_kind: Option<String>,
    /// SHA of the ref after the push
    pub after: Option<String>,
    /// SHA of the ref before the push
    pub before: Option<String>,
    /// Pushed commits, gitlab caps the list at 20
    pub commits: Option<Vec<Commit>>,
    /// Id of the project pushed to
    pub project_id: Option<u64>,
    /// Full ref name, e.g. `refs/heads/main`
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    /// Repository pushed to
    pub repository: Option<Repository>,
    /// Number of pushed commits, can be greater than the length of `commits`
    pub total_commits_count: Option<u32>,
    /// Id of the user who pushed
    pub user_id: Option<u64>,
    /// Name of the user who pushed
    pub user_name: Option<String>,
}

impl PushEvent {
    /// Gets the branch name from the ref
    ///
    /// `None` if there is no ref or if it doesn't start with `refs/heads/` (tags...)
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        let git_ref = self.git_ref.as_deref()?.trim();
        if git_ref.is_empty() {
            return None;
        }
        git_ref.strip_prefix(REFS_HEADS)
    }
}
