//! Plain data describing a request to GitLab and its response, and the [`Transport`] trait
//! that sends one to the other
use core::future::Future;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::BoxedError;
use crate::form::Form;

/// Query parameters, in insertion order. A name can appear several times.
pub type QueryParams = Vec<(String, String)>;

/// Where a request is sent
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Segments appended, percent-encoded, to the API base URL (`<host>/api/v4/`)
    Path(Vec<String>),
    /// A fully-formed URL, used as is
    Url(Url),
}

/// Builds an [`Endpoint::Path`] from anything implementing `Display`
///
/// ```
/// use gitlab_api::{endpoint, Endpoint};
///
/// let project_id = 42;
/// assert_eq!(
///     endpoint!("projects", project_id, "access_tokens"),
///     Endpoint::Path(vec!["projects".into(), "42".into(), "access_tokens".into()])
/// );
/// ```
#[macro_export]
macro_rules! endpoint {
    ($($segment:expr),+ $(,)?) => {
        $crate::Endpoint::Path(vec![$($segment.to_string()),+])
    };
}

impl From<Url> for Endpoint {
    fn from(url: Url) -> Self {
        Self::Url(url)
    }
}

/// One HTTP call
#[derive(Clone, Debug)]
pub struct Request {
    /// HTTP verb
    pub method: Method,
    /// Target
    pub endpoint: Endpoint,
    /// Appended to the URL
    pub query: QueryParams,
    /// Sent as an `application/x-www-form-urlencoded` body
    pub form: Option<Form>,
}

/// What the server answered
#[derive(Clone, Debug)]
pub struct Response {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: String,
}

impl Response {
    /// Decodes the body
    ///
    /// # Errors
    ///
    /// Fails if the body isn't a valid JSON representation of `T`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Sends a [`Request`] and returns what the server answered
///
/// Implementations must not interpret the status code, any answer is an `Ok`.
/// `Err` is reserved for calls that didn't complete.
pub trait Transport: Send + Sync {
    /// Performs `request`, exactly once
    fn send(&self, request: Request)
    -> impl Future<Output = Result<Response, BoxedError>> + Send;
}
