use std::collections::BTreeMap;
use std::fmt;

use engine_logging::{engine_debug, engine_info};
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::Response;
use serde::{Deserialize, Serialize};

use crate::{FailureKind, PortalError, PortalSettings};

/// Login form fields, passed through to the portal untouched.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Parse a JSON object of string fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("fields", &self.0.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Authentication cookie (`name=value`) obtained from a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    cookie: String,
}

impl Session {
    pub fn from_cookie(cookie: impl Into<String>) -> Self {
        Self {
            cookie: cookie.into(),
        }
    }

    pub fn cookie(&self) -> &str {
        &self.cookie
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("cookie", &"<redacted>").finish()
    }
}

/// HTTP access to the portal. Every request after login carries the session cookie.
#[derive(Debug, Clone)]
pub struct PortalClient {
    settings: PortalSettings,
    client: reqwest::Client,
    login_client: reqwest::Client,
}

impl PortalClient {
    pub fn new(settings: PortalSettings) -> Result<Self, PortalError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .read_timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| PortalError::new(FailureKind::Network, err.to_string()))?;
        // The portal answers a good login with a redirect carrying Set-Cookie.
        let login_client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| PortalError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            client,
            login_client,
        })
    }

    pub fn settings(&self) -> &PortalSettings {
        &self.settings
    }

    /// Submit the login form and keep only the `name=value` part of the cookie.
    ///
    /// The credentials are consumed; nothing retains them once the cookie is known.
    pub async fn authenticate(&self, credentials: Credentials) -> Result<Session, PortalError> {
        let url = self.settings.login_url();
        engine_info!("Logging in at {}", url);

        let response = self
            .login_client
            .post(&url)
            .form(&credentials)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        drop(credentials);

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(PortalError::new(
                FailureKind::Authentication,
                format!("login rejected with {status}"),
            ));
        }

        let header = response.headers().get(SET_COOKIE).ok_or_else(|| {
            PortalError::new(
                FailureKind::Authentication,
                format!("login response ({status}) carried no Set-Cookie header"),
            )
        })?;
        let raw = header.to_str().map_err(|_| {
            PortalError::new(FailureKind::Authentication, "Set-Cookie header is not text")
        })?;
        let cookie = session_cookie(raw).ok_or_else(|| {
            PortalError::new(FailureKind::Authentication, "Set-Cookie header is empty")
        })?;

        engine_info!("Login succeeded");
        Ok(Session::from_cookie(cookie))
    }

    /// GET `url` with the session cookie. The body is left unread so callers can stream it.
    pub async fn get(&self, session: &Session, url: &str) -> Result<Response, PortalError> {
        let request = self.request(session, url)?;
        send_checked(request, url).await
    }

    /// GET `url` with the session cookie and buffer the body as text.
    pub async fn get_text(&self, session: &Session, url: &str) -> Result<String, PortalError> {
        let request = self
            .request(session, url)?
            .timeout(self.settings.request_timeout);
        let response = send_checked(request, url).await?;
        response.text().await.map_err(map_reqwest_error)
    }

    fn request(
        &self,
        session: &Session,
        url: &str,
    ) -> Result<reqwest::RequestBuilder, PortalError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| PortalError::new(FailureKind::InvalidUrl, format!("{url}: {err}")))?;
        engine_debug!("GET {}", parsed);
        Ok(self.client.get(parsed).header(COOKIE, session.cookie()))
    }
}

async fn send_checked(
    request: reqwest::RequestBuilder,
    url: &str,
) -> Result<Response, PortalError> {
    let response = request.send().await.map_err(map_reqwest_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(PortalError::new(
            FailureKind::HttpStatus(status.as_u16()),
            format!("{status} for {url}"),
        ));
    }
    Ok(response)
}

fn session_cookie(set_cookie: &str) -> Option<String> {
    let pair = set_cookie.split(';').next()?.trim();
    if pair.is_empty() {
        None
    } else {
        Some(pair.to_string())
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> PortalError {
    if err.is_timeout() {
        return PortalError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return PortalError::new(FailureKind::InvalidUrl, err.to_string());
    }
    PortalError::new(FailureKind::Network, err.to_string())
}
