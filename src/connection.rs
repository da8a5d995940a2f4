//! Defines a connection to gitlab
use std::io;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::config::Config;
use crate::error::{BoxedError, ConfigError};
use crate::transport::{Endpoint, Request, Response, Transport};

/// Header carrying the private token
const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Infos needed to connect to gitlab, and the [`Transport`] sending our requests with [`reqwest`]
#[derive(Clone, Debug)]
pub struct Connection {
    /// `<host_url>/api/v4/`, [`Endpoint::Path`] segments are appended to it
    api_url: Url,
    /// [`reqwest`] client
    http_client: Client,
    /// Authentication token
    token: String,
}

impl Connection {
    /// Creates a new [`Connection`]
    ///
    /// # Errors
    ///
    /// Fails if the API URL can't be derived from `config.host_url` or if the
    /// [`reqwest`] client can't be built
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http_client = reqwest::ClientBuilder::new()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Self::with_client(config, http_client)
    }

    /// Creates a new [`Connection`] reusing an existing [`reqwest`] client
    ///
    /// # Errors
    ///
    /// Fails if the API URL can't be derived from `config.host_url`
    pub fn with_client(config: &Config, http_client: Client) -> Result<Self, ConfigError> {
        let mut host_url = config.host_url.clone();
        if !host_url.path().ends_with('/') {
            let path = format!("{}/", host_url.path());
            host_url.set_path(&path);
        }

        Ok(Self {
            api_url: host_url.join("api/v4/")?,
            http_client,
            token: config.token.clone(),
        })
    }

    /// Base URL of the REST API
    #[must_use]
    pub const fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Resolves `endpoint` to the URL we send the request to
    ///
    /// # Errors
    ///
    /// Fails if a path segment is `.` or `..`: [`url`] would drop it and the request would go
    /// to another endpoint. Also fails if the API URL can't have path segments (it always can,
    /// it comes from a `http(s)` URL)
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url, BoxedError> {
        match *endpoint {
            Endpoint::Url(ref url) => Ok(url.clone()),
            Endpoint::Path(ref segments) => {
                if let Some(segment) = segments
                    .iter()
                    .find(|segment| matches!(segment.as_str(), "." | ".."))
                {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("path argument `{segment}` is not allowed"),
                    )
                    .into());
                }

                let mut url = self.api_url.clone();
                url.path_segments_mut()
                    .map_err(|()| {
                        io::Error::other(format!("{} cannot be a base URL", self.api_url))
                    })?
                    .pop_if_empty()
                    .extend(segments);
                Ok(url)
            }
        }
    }
}

impl Transport for Connection {
    #[instrument(skip_all, err)]
    async fn send(&self, request: Request) -> Result<Response, BoxedError> {
        let url = self.url_for(&request.endpoint)?;

        debug!("{} {url}", request.method);

        let mut builder = self
            .http_client
            .request(request.method, url)
            .header(PRIVATE_TOKEN_HEADER, &self.token);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(ref form) = request.form {
            builder = builder.form(form);
        }

        let resp = builder.send().await?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.text().await?;

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
