//! Defines a gitab user

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    api::RequestExecutor,
    endpoint,
    error::Error,
    transport::{QueryParams, Transport},
};

/// Defines a [gitlab user](https://docs.gitlab.com/api/users/#list-users)
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct User {
    /// User id
    pub id: u64,
    /// This field is not available if the query is made with a non-admin token
    #[serde(default)]
    pub is_admin: bool,
    /// Display name
    pub name: String,
    /// `active`, `blocked`...
    pub state: String,
    /// User name (without spaces)
    pub username: String,
}

/// Operations on users
#[derive(Debug)]
pub struct UserApi<'api, T: Transport> {
    /// Shared executor
    executor: &'api RequestExecutor<T>,
}

impl<'api, T: Transport> UserApi<'api, T> {
    /// Creates a new [`UserApi`]
    pub(crate) const fn new(executor: &'api RequestExecutor<T>) -> Self {
        Self { executor }
    }

    /// Get the current gitlab user (the owner of the token)
    ///
    /// # Errors
    ///
    /// [`Error::Api`] with a `401` status if the token is rejected
    #[instrument(skip_all, err)]
    pub async fn current(&self) -> Result<User, Error> {
        debug!("getting current user");

        let response = self
            .executor
            .get(StatusCode::OK, QueryParams::new(), endpoint!("user"))
            .await?;
        Ok(response.json()?)
    }

    /// Get a user from its id
    ///
    /// # Errors
    ///
    /// [`Error::Api`] if the user doesn't exist or can't be reached
    #[instrument(skip(self), err)]
    pub async fn get(&self, id: u64) -> Result<User, Error> {
        let response = self
            .executor
            .get(StatusCode::OK, QueryParams::new(), endpoint!("users", id))
            .await?;
        Ok(response.json()?)
    }
}
