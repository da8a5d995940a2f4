//! Defines a gitab project and the [projects API](https://docs.gitlab.com/api/projects/)

use core::fmt::{Display, Formatter};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    api::RequestExecutor,
    endpoint,
    error::Error,
    form::Form,
    transport::{QueryParams, Transport},
};

/// Defines a [gitlab project](https://docs.gitlab.com/api/projects/#get-a-single-project)
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Project {
    /// Project id
    pub id: u64,
    /// Project name
    pub name: String,
    /// Project path
    pub path: String,
    /// Project path, including its namespace
    pub path_with_namespace: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Default branch, not set for empty repositories
    #[serde(default)]
    pub default_branch: Option<String>,
    /// Visibility
    #[serde(default)]
    pub visibility: Option<Visibility>,
    /// Project URL
    pub web_url: String,
}

/// Who can see a project
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Only members
    Private,
    /// Any authenticated user
    Internal,
    /// Everyone
    Public,
}

impl Display for Visibility {
    #[expect(clippy::absolute_paths, reason = "Use a specific Result type")]
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(match *self {
            Self::Private => "private",
            Self::Internal => "internal",
            Self::Public => "public",
        })
    }
}

/// Parameters of [`ProjectApi::create`]
#[derive(Clone, Debug, Default)]
pub struct NewProject {
    /// Mandatory
    pub name: String,
    /// Derived from `name` by gitlab when not set
    pub path: Option<String>,
    /// Namespace (group) id, the user namespace when not set
    pub namespace_id: Option<u64>,
    /// Description
    pub description: Option<String>,
    /// Visibility
    pub visibility: Option<Visibility>,
}

/// Parameters of [`ProjectApi::update`], unset fields are left untouched
#[derive(Clone, Debug, Default)]
pub struct ProjectUpdate {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New default branch
    pub default_branch: Option<String>,
    /// New visibility
    pub visibility: Option<Visibility>,
}

/// Operations on projects
#[derive(Debug)]
pub struct ProjectApi<'api, T: Transport> {
    /// Shared executor
    executor: &'api RequestExecutor<T>,
}

impl<'api, T: Transport> ProjectApi<'api, T> {
    /// Creates a new [`ProjectApi`]
    pub(crate) const fn new(executor: &'api RequestExecutor<T>) -> Self {
        Self { executor }
    }

    /// Get a project from its id or its full path (`group/subgroup/project`)
    ///
    /// # Errors
    ///
    /// [`Error::Api`] if the project doesn't exist or can't be reached
    #[instrument(skip_all, err)]
    pub async fn get(&self, id_or_path: impl Display) -> Result<Project, Error> {
        let response = self
            .executor
            .get(StatusCode::OK, QueryParams::new(), endpoint!("projects", id_or_path))
            .await?;
        Ok(response.json()?)
    }

    /// Get one page of the projects visible to the current user
    ///
    /// # Errors
    ///
    /// See [`ProjectApi::get`]
    #[instrument(skip_all, err)]
    pub async fn list(&self, owned: bool, per_page: u16) -> Result<Vec<Project>, Error> {
        let query = vec![
            ("owned".to_owned(), owned.to_string()),
            ("per_page".to_owned(), per_page.to_string()),
        ];
        let response = self
            .executor
            .get(StatusCode::OK, query, endpoint!("projects"))
            .await?;
        let projects: Vec<Project> = response.json()?;
        debug!("got {} projects", projects.len());
        Ok(projects)
    }

    /// Create a project
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `name` is blank, nothing is sent in that case
    #[instrument(skip_all, err)]
    pub async fn create(&self, project: &NewProject) -> Result<Project, Error> {
        let mut form = Form::new();
        form.add_param("name", Some(&project.name), true)?;
        form.add_optional("path", project.path.as_ref());
        form.add_optional("namespace_id", project.namespace_id);
        form.add_optional("description", project.description.as_ref());
        form.add_optional("visibility", project.visibility);

        let response = self
            .executor
            .post(StatusCode::CREATED, form, endpoint!("projects"))
            .await?;
        Ok(response.json()?)
    }

    /// Update a project
    ///
    /// # Errors
    ///
    /// See [`ProjectApi::get`]
    #[instrument(skip_all, err)]
    pub async fn update(&self, id: u64, update: &ProjectUpdate) -> Result<Project, Error> {
        let mut query = QueryParams::new();
        let fields = [
            ("name", update.name.clone()),
            ("description", update.description.clone()),
            ("default_branch", update.default_branch.clone()),
            ("visibility", update.visibility.map(|visibility| visibility.to_string())),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                query.push((name.to_owned(), value));
            }
        }

        let response = self
            .executor
            .put(StatusCode::OK, query, endpoint!("projects", id))
            .await?;
        Ok(response.json()?)
    }

    /// Delete a project
    ///
    /// Gitlab answers `202 Accepted`: the deletion is scheduled, not done yet
    ///
    /// # Errors
    ///
    /// See [`ProjectApi::get`]
    #[instrument(skip_all, err)]
    pub async fn delete(&self, id: u64) -> Result<(), Error> {
        self.executor
            .delete(StatusCode::ACCEPTED, QueryParams::new(), endpoint!("projects", id))
            .await?;
        Ok(())
    }
}
