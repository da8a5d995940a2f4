//! Executes the HTTP calls of every resource API and checks the status they return
use reqwest::{Method, StatusCode};
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::form::Form;
use crate::transport::{Endpoint, QueryParams, Request, Response, Transport};

/// Shared request helper used by every resource API
///
/// Each call returns the [`Response`] untouched when its status is the expected one,
/// and an [`ApiError`] otherwise. Decoding the body is left to the caller.
#[derive(Clone, Debug)]
pub struct RequestExecutor<T: Transport> {
    /// Sends the requests
    transport: T,
}

impl<T: Transport> RequestExecutor<T> {
    /// Creates a new [`RequestExecutor`]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying [`Transport`]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs a GET with `query` appended to the URL
    ///
    /// # Errors
    ///
    /// [`ApiError::Transport`] if the call fails, [`ApiError::UnexpectedStatus`] if the
    /// status isn't `expected`
    pub async fn get(
        &self,
        expected: StatusCode,
        query: QueryParams,
        endpoint: Endpoint,
    ) -> Result<Response, ApiError> {
        self.call(expected, Method::GET, endpoint, query, None).await
    }

    /// Performs a POST with `form` as the request body
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::get`]
    pub async fn post(
        &self,
        expected: StatusCode,
        form: Form,
        endpoint: Endpoint,
    ) -> Result<Response, ApiError> {
        self.call(expected, Method::POST, endpoint, QueryParams::new(), Some(form))
            .await
    }

    /// Performs a PUT with `query` appended to the URL
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::get`]
    pub async fn put(
        &self,
        expected: StatusCode,
        query: QueryParams,
        endpoint: Endpoint,
    ) -> Result<Response, ApiError> {
        self.call(expected, Method::PUT, endpoint, query, None).await
    }

    /// Performs a DELETE with `query` appended to the URL
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::get`]
    pub async fn delete(
        &self,
        expected: StatusCode,
        query: QueryParams,
        endpoint: Endpoint,
    ) -> Result<Response, ApiError> {
        self.call(expected, Method::DELETE, endpoint, query, None)
            .await
    }

    /// Sends the request once and turns every failure into an [`ApiError`]
    #[instrument(skip_all, fields(method = %method, expected = %expected), err)]
    async fn call(
        &self,
        expected: StatusCode,
        method: Method,
        endpoint: Endpoint,
        query: QueryParams,
        form: Option<Form>,
    ) -> Result<Response, ApiError> {
        debug!("endpoint: {endpoint:?}");

        let response = self
            .transport
            .send(Request {
                method,
                endpoint,
                query,
                form,
            })
            .await
            .map_err(ApiError::Transport)?;

        debug!("status: {}", response.status);

        if response.status != expected {
            return Err(ApiError::unexpected(response));
        }

        Ok(response)
    }
}
