//! Defines [project access tokens](https://docs.gitlab.com/api/project_access_tokens/) and their API
use chrono::{Datelike as _, NaiveDate};
use core::fmt::{Display, Formatter};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use tracing::{debug, instrument};

use crate::{
    api::RequestExecutor,
    endpoint,
    error::Error,
    form::Form,
    transport::{QueryParams, Transport},
};

/// cf <https://docs.gitlab.com/api/project_access_tokens/#create-a-project-access-token>
#[derive(Clone, Copy, Debug, Deserialize_repr, Serialize_repr, PartialEq, Eq)]
#[repr(u8)]
pub enum AccessLevel {
    Guest = 10,
    Reporter = 20,
    Developer = 30,
    Maintainer = 40,
    Owner = 50,
}

impl From<AccessLevel> for u8 {
    fn from(level: AccessLevel) -> Self {
        match level {
            AccessLevel::Guest => 10,
            AccessLevel::Reporter => 20,
            AccessLevel::Developer => 30,
            AccessLevel::Maintainer => 40,
            AccessLevel::Owner => 50,
        }
    }
}

impl Display for AccessLevel {
    #[expect(clippy::absolute_paths, reason = "Use a specific Result type")]
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Self::Guest => "guest",
                Self::Reporter => "reporter",
                Self::Developer => "developer",
                Self::Maintainer => "maintainer",
                Self::Owner => "owner",
            },
        )
    }
}

/// [Scopes](https://docs.gitlab.com/user/project/settings/project_access_tokens/#scopes-for-a-project-access-token)
/// of an [`AccessToken`]
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccessTokenScope {
    /// Grants permission to perform API actions for GitLab Duo
    AiFeatures,
    /// Grants complete read and write access to the scoped project API
    Api,
    /// Grants permission to create runners
    CreateRunner,
    /// Granular
    ///
    /// Introduced in gitlab 18.5.0-ee and hidden in 18.6.0-ee, tokens created with it may still be listed
    Granular,
    /// Grants permission to perform Kubernetes API calls using the agent for Kubernetes
    K8sProxy,
    /// Grants permission to manage runners
    ManageRunner,
    /// Mcp
    ///
    /// Introduced by mistake in gitlab 18.3.0 and hidden in 18.7.0, tokens created with it may still be listed
    Mcp,
    /// Grants read access to the scoped project API
    ReadApi,
    /// Grants read access (pull) to observability data
    ReadObservability,
    /// Grants read access (pull) to the container registry images
    ReadRegistry,
    /// Grants read access (pull) to the repository
    ReadRepository,
    /// Grants read-only (pull) access to container images through the dependency proxy
    ReadVirtualRegistry,
    /// Grants permission to rotate this token
    SelfRotate,
    /// Grants write access (push) to observability data
    WriteObservability,
    /// Grants write access (push) to the container registry
    WriteRegistry,
    /// Grants read and write access (pull and push) to the repository
    WriteRepository,
    /// Grants read, write and delete access to container images through the dependency proxy
    WriteVirtualRegistry,
}

#[expect(clippy::absolute_paths, reason = "Specific Trait and Result type")]
impl core::fmt::Display for AccessTokenScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(match *self {
            Self::AiFeatures => "ai_features",
            Self::Api => "api",
            Self::CreateRunner => "create_runner",
            Self::Granular => "granular",
            Self::K8sProxy => "k8s_proxy",
            Self::ManageRunner => "manage_runner",
            Self::Mcp => "mcp",
            Self::ReadApi => "read_api",
            Self::ReadObservability => "read_observability",
            Self::ReadRegistry => "read_registry",
            Self::ReadRepository => "read_repository",
            Self::ReadVirtualRegistry => "read_virtual_registry",
            Self::SelfRotate => "self_rotate",
            Self::WriteObservability => "write_observability",
            Self::WriteRegistry => "write_registry",
            Self::WriteRepository => "write_repository",
            Self::WriteVirtualRegistry => "write_virtual_registry",
        })
    }
}

/// Defines a [gitlab access token](https://docs.gitlab.com/api/project_access_tokens/#list-project-access-tokens)
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AccessToken {
    /// Access level
    pub access_level: AccessLevel,
    /// Active
    pub active: bool,
    /// Expiration date
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub expires_at: Option<NaiveDate>,
    /// Id
    pub id: u64,
    /// Name
    pub name: String,
    /// Revoked
    pub revoked: bool,
    /// Scopes
    pub scopes: Vec<AccessTokenScope>,
    /// The secret itself, only returned when the token is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Parameters of [`AccessTokenApi::create`]
#[derive(Clone, Debug)]
pub struct NewAccessToken {
    /// Mandatory
    pub name: String,
    /// At least one scope is mandatory
    pub scopes: Vec<AccessTokenScope>,
    /// Gitlab defaults to [`AccessLevel::Maintainer`]
    pub access_level: Option<AccessLevel>,
    /// Gitlab may enforce a maximum lifetime
    pub expires_at: Option<NaiveDate>,
}

/// Operations on the access tokens of a project
#[derive(Debug)]
pub struct AccessTokenApi<'api, T: Transport> {
    /// Shared executor
    executor: &'api RequestExecutor<T>,
}

impl<'api, T: Transport> AccessTokenApi<'api, T> {
    /// Creates a new [`AccessTokenApi`]
    pub(crate) const fn new(executor: &'api RequestExecutor<T>) -> Self {
        Self { executor }
    }

    /// Get the access tokens of `project` (id or full path)
    ///
    /// # Errors
    ///
    /// [`Error::Api`] if the project doesn't exist or the token isn't allowed to list them
    #[instrument(skip_all, err)]
    pub async fn list(&self, project: impl Display) -> Result<Vec<AccessToken>, Error> {
        let response = self
            .executor
            .get(
                StatusCode::OK,
                QueryParams::new(),
                endpoint!("projects", project, "access_tokens"),
            )
            .await?;
        let tokens: Vec<AccessToken> = response.json()?;
        debug!("got {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Create an access token for `project`
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `name` is blank or `scopes` is empty, nothing is sent in that case
    #[instrument(skip_all, err)]
    pub async fn create(
        &self,
        project: impl Display,
        token: &NewAccessToken,
    ) -> Result<AccessToken, Error> {
        let mut form = Form::new();
        form.add_param("name", Some(&token.name), true)?;
        form.add_param("scopes[]", token.scopes.first(), true)?;
        for scope in token.scopes.iter().skip(1) {
            form.add_optional("scopes[]", Some(scope));
        }
        form.add_optional("access_level", token.access_level.map(u8::from));
        form.add_optional("expires_at", token.expires_at.map(format_date));

        if let Some(level) = token.access_level {
            debug!("creating a {level} token");
        }

        let response = self
            .executor
            .post(
                StatusCode::CREATED,
                form,
                endpoint!("projects", project, "access_tokens"),
            )
            .await?;
        Ok(response.json()?)
    }

    /// Revoke the access token `token_id` of `project`
    ///
    /// # Errors
    ///
    /// [`Error::Api`] if the token doesn't exist
    #[instrument(skip_all, err)]
    pub async fn revoke(&self, project: impl Display, token_id: u64) -> Result<(), Error> {
        self.executor
            .delete(
                StatusCode::NO_CONTENT,
                QueryParams::new(),
                endpoint!("projects", project, "access_tokens", token_id),
            )
            .await?;
        Ok(())
    }
}

/// Formats `date` as year-month-day without the `+` sign [`NaiveDate`] puts before years > 9999
fn format_date(date: NaiveDate) -> String {
    format!("{}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Custom date deserialization function to handle years > 9999
///
/// The default `chrono` deserializer doesn't handle years > 9999, so we have
/// to use `NaiveDate::from_ymd_opt()`
#[expect(
    clippy::indexing_slicing,
    reason = "We check the size of the vec before indexing"
)]
fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected};

    let Some(date_string) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    // `date` format *must* be year-month-day. For example : `2025-06-28` or `10000-12-31`
    let date_split: Vec<_> = date_string.split('-').collect();
    if date_split.len() != 3 {
        return Err(Error::invalid_length(
            date_split.len(),
            &"a year-month-day date format",
        ));
    }
    let year = date_split[0]
        .parse()
        .map_err(|_err| Error::invalid_value(Unexpected::Str(date_split[0]), &"a valid year"))?;
    let month = date_split[1]
        .parse()
        .map_err(|_err| Error::invalid_value(Unexpected::Str(date_split[1]), &"a valid month"))?;
    let day = date_split[2]
        .parse()
        .map_err(|_err| Error::invalid_value(Unexpected::Str(date_split[2]), &"a valid day"))?;

    NaiveDate::from_ymd_opt(year, month, day).map_or_else(
        || {
            Err(Error::invalid_value(
                Unexpected::Str(&date_string),
                &"a valid NaiveDate",
            ))
        },
        |date| Ok(Some(date)),
    )
}
