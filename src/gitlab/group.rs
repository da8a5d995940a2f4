//! Defines a gitab group

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    api::RequestExecutor,
    endpoint,
    error::Error,
    transport::{QueryParams, Transport},
};

/// Defines a [gitlab group](https://docs.gitlab.com/api/groups/)
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Group {
    /// Group id
    pub id: u64,
    /// Group name
    pub name: String,
    /// Group parent id
    pub parent_id: Option<u64>,
    /// Group path
    pub path: String,
    /// Group URL
    pub web_url: String,
}

/// Operations on groups
#[derive(Debug)]
pub struct GroupApi<'api, T: Transport> {
    /// Shared executor
    executor: &'api RequestExecutor<T>,
}

impl<'api, T: Transport> GroupApi<'api, T> {
    /// Creates a new [`GroupApi`]
    pub(crate) const fn new(executor: &'api RequestExecutor<T>) -> Self {
        Self { executor }
    }

    /// Get a group from its id
    ///
    /// # Errors
    ///
    /// [`Error::Api`] if the group doesn't exist or can't be reached
    #[instrument(skip(self), err)]
    pub async fn get(&self, id: u64) -> Result<Group, Error> {
        let response = self
            .executor
            .get(StatusCode::OK, QueryParams::new(), endpoint!("groups", id))
            .await?;
        Ok(response.json()?)
    }

    /// Creates a string containing `group` full path
    ///
    /// The gitlab API gives us `path_with_namespace` for [`projects`](crate::gitlab::project::Project)
    /// but not for groups, so we walk up the parents, one request per ancestor
    ///
    /// # Errors
    ///
    /// See [`GroupApi::get`]
    #[instrument(skip_all, err)]
    pub async fn full_path(&self, group: &Group) -> Result<String, Error> {
        debug!("group: {group:?}");

        let mut res = group.path.clone();
        let mut parent_id = group.parent_id;

        while let Some(id) = parent_id {
            debug!("Getting group {id} from gitlab");
            let parent = self.get(id).await?;
            res = format!("{}/{res}", parent.path);
            parent_id = parent.parent_id;
        }

        Ok(res)
    }
}
