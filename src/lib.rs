//! Client library for the [GitLab REST API](https://docs.gitlab.com/api/rest/)
//!
//! Every resource API goes through [`RequestExecutor`]: it sends one request, checks the
//! returned status against the one the endpoint documents, and hands the raw [`Response`]
//! back. Any other status, or a failed call, is an [`ApiError`].
//!
//! Push notifications sent by gitlab are modeled in [`webhook`].

pub mod api;
pub mod config;
pub mod connection;
pub mod error;
pub mod form;
pub mod gitlab;
pub mod transport;
pub mod webhook;

pub use api::RequestExecutor;
pub use config::Config;
pub use connection::Connection;
pub use error::{ApiError, BoxedError, ConfigError, Error, InvalidArgument};
pub use form::Form;
pub use gitlab::GitLabApi;
pub use transport::{Endpoint, QueryParams, Request, Response, Transport};
pub use webhook::PushEvent;
