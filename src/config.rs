//! Reads the settings needed to reach a GitLab instance from the environment
use std::env;

use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::ConfigError;

/// Hostname (or URL) of the GitLab instance
const GITLAB_HOSTNAME: &str = "GITLAB_HOSTNAME";
/// Private token sent with every request
const GITLAB_TOKEN: &str = "GITLAB_TOKEN";
/// Set to `yes` to skip TLS certificate verification
const ACCEPT_INVALID_CERTS: &str = "ACCEPT_INVALID_CERTS";

/// Everything [`Connection`](crate::connection::Connection) needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the GitLab instance, e.g. `https://gitlab.example.com/`
    pub host_url: Url,
    /// Private token
    pub token: String,
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
}

impl Config {
    /// Creates a new [`Config`]
    #[must_use]
    pub const fn new(host_url: Url, token: String, accept_invalid_certs: bool) -> Self {
        Self {
            host_url,
            token,
            accept_invalid_certs,
        }
    }

    /// Loads the `.env` file if there is one, then reads the process environment
    ///
    /// # Errors
    ///
    /// See [`Config::from_lookup`]
    #[instrument(err)]
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            debug!("no .env file loaded: {err}");
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the settings through `lookup`
    ///
    /// - `GITLAB_HOSTNAME` (mandatory): a bare hostname is reached over `https`, a value
    ///   with a scheme (`http://localhost:8080`) is used as is
    /// - `GITLAB_TOKEN` (mandatory)
    /// - `ACCEPT_INVALID_CERTS` (optional): its only accepted value is `yes`
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if a mandatory variable is missing or a value is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let hostname = lookup(GITLAB_HOSTNAME).ok_or(ConfigError::Missing(GITLAB_HOSTNAME))?;
        let token = lookup(GITLAB_TOKEN).ok_or(ConfigError::Missing(GITLAB_TOKEN))?;

        let accept_invalid_certs = match lookup(ACCEPT_INVALID_CERTS) {
            None => false,
            Some(value) if value == "yes" => {
                warn!("TLS certificates will not be verified");
                true
            }
            Some(value) => {
                return Err(ConfigError::Invalid {
                    name: ACCEPT_INVALID_CERTS,
                    value,
                });
            }
        };

        Ok(Self::new(parse_host_url(&hostname)?, token, accept_invalid_certs))
    }
}

/// `gitlab.example.com` -> `https://gitlab.example.com/`
fn parse_host_url(hostname: &str) -> Result<Url, url::ParseError> {
    let hostname = hostname.trim().trim_end_matches('/');
    if hostname.contains("://") {
        Url::parse(hostname)
    } else {
        Url::parse(&format!("https://{hostname}"))
    }
}
