//! Error types returned by this crate
use core::error::Error as StdError;

use reqwest::StatusCode;
use thiserror::Error;

use crate::transport::Response;

/// Boxed error used to carry transport failures
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// The single error kind returned by [`RequestExecutor`](crate::api::RequestExecutor)
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP call itself failed (connection, TLS, request building...)
    #[error("request failed: {0}")]
    Transport(#[source] BoxedError),
    /// The call completed but GitLab answered with another status than the expected one
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// Status returned by the server
        status: StatusCode,
        /// Raw response body
        body: String,
    },
}

impl ApiError {
    /// Builds an [`ApiError::UnexpectedStatus`] from the response we got
    pub(crate) fn unexpected(response: Response) -> Self {
        Self::UnexpectedStatus {
            status: response.status,
            body: response.body,
        }
    }

    /// Status returned by the server, `None` for transport failures
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match *self {
            Self::Transport(_) => None,
            Self::UnexpectedStatus { status, .. } => Some(status),
        }
    }

    /// Extracts the error message GitLab puts in its JSON error bodies
    ///
    /// GitLab answers either `{"message": ...}` (the value can be a string or an object
    /// describing validation errors) or `{"error": "..."}`
    #[must_use]
    pub fn message(&self) -> Option<String> {
        let Self::UnexpectedStatus { ref body, .. } = *self else {
            return None;
        };

        let json: serde_json::Value = serde_json::from_str(body).ok()?;
        json.get("message")
            .or_else(|| json.get("error"))
            .map(|value| match value.as_str() {
                Some(text) => text.to_owned(),
                None => value.to_string(),
            })
    }
}

/// A required form field was missing or blank, nothing has been sent
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{name} cannot be empty or null")]
pub struct InvalidArgument {
    /// Name of the offending field
    pub name: String,
}

/// Errors returned by the resource APIs ([`ProjectApi`](crate::gitlab::project::ProjectApi) etc.)
#[derive(Debug, Error)]
pub enum Error {
    /// See [`ApiError`]
    #[error(transparent)]
    Api(#[from] ApiError),
    /// See [`InvalidArgument`]
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    /// The response body doesn't match the expected model
    #[error("error decoding response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised while loading the [`Config`](crate::config::Config)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A mandatory variable is not defined
    #[error("env variable {0} is not defined")]
    Missing(&'static str),
    /// A variable holds a value we don't accept
    #[error("env variable {name} has an invalid value: '{value}'")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Rejected value
        value: String,
    },
    /// The GitLab URL can't be parsed
    #[error("invalid gitlab url: {0}")]
    Url(#[from] url::ParseError),
    /// The HTTP client can't be built
    #[error("failed to build the http client: {0}")]
    Client(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unexpected(status: StatusCode, body: &str) -> ApiError {
        ApiError::UnexpectedStatus {
            status,
            body: body.to_owned(),
        }
    }

    #[test]
    fn message_from_string_field() {
        let err = unexpected(StatusCode::NOT_FOUND, r#"{"message":"404 Project Not Found"}"#);
        assert_eq!(err.message().as_deref(), Some("404 Project Not Found"));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn message_from_validation_object() {
        let err = unexpected(
            StatusCode::BAD_REQUEST,
            r#"{"message":{"name":["can't be blank"]}}"#,
        );
        assert_eq!(
            err.message().as_deref(),
            Some(r#"{"name":["can't be blank"]}"#)
        );
    }

    #[test]
    fn message_from_error_field() {
        let err = unexpected(StatusCode::UNAUTHORIZED, r#"{"error":"invalid_token"}"#);
        assert_eq!(err.message().as_deref(), Some("invalid_token"));
    }

    #[test]
    fn no_message_for_plain_body_or_transport() {
        assert!(unexpected(StatusCode::BAD_GATEWAY, "<html>").message().is_none());

        let err = ApiError::Transport("boom".into());
        assert!(err.message().is_none());
        assert!(err.status().is_none());
        assert_eq!(err.to_string(), "request failed: boom");
    }

    #[test]
    fn invalid_argument_message() {
        let err = InvalidArgument {
            name: "name".to_owned(),
        };
        assert_eq!(err.to_string(), "name cannot be empty or null");
    }
}
