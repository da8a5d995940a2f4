//! Gitlab models and the resource APIs built on [`RequestExecutor`]

pub mod commit;
pub mod group;
pub mod project;
pub mod repository;
pub mod token;
pub mod user;

use crate::{
    api::RequestExecutor, config::Config, connection::Connection, error::ConfigError,
    transport::Transport,
};

use group::GroupApi;
use project::ProjectApi;
use token::AccessTokenApi;
use user::UserApi;

/// Entry point of the library, hands out the resource APIs
///
/// ```no_run
/// # async fn run() -> Result<(), Box<dyn core::error::Error>> {
/// use gitlab_api::{Config, GitLabApi};
///
/// let gitlab = GitLabApi::from_config(&Config::from_env()?)?;
/// let me = gitlab.users().current().await?;
/// println!("hello {}", me.username);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct GitLabApi<T: Transport> {
    /// Shared by every resource API
    executor: RequestExecutor<T>,
}

impl GitLabApi<Connection> {
    /// Creates a [`GitLabApi`] talking to gitlab with [`reqwest`]
    ///
    /// # Errors
    ///
    /// See [`Connection::new`]
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(Connection::new(config)?))
    }
}

impl<T: Transport> GitLabApi<T> {
    /// Creates a [`GitLabApi`] sending its requests through `transport`
    pub const fn new(transport: T) -> Self {
        Self {
            executor: RequestExecutor::new(transport),
        }
    }

    /// Raw access to the executor, for endpoints without a resource API
    pub const fn executor(&self) -> &RequestExecutor<T> {
        &self.executor
    }

    /// Projects API
    pub const fn projects(&self) -> ProjectApi<'_, T> {
        ProjectApi::new(&self.executor)
    }

    /// Groups API
    pub const fn groups(&self) -> GroupApi<'_, T> {
        GroupApi::new(&self.executor)
    }

    /// Users API
    pub const fn users(&self) -> UserApi<'_, T> {
        UserApi::new(&self.executor)
    }

    /// Project access tokens API
    pub const fn access_tokens(&self) -> AccessTokenApi<'_, T> {
        AccessTokenApi::new(&self.executor)
    }
}
