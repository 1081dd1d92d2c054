//! Shared HTTP plumbing for the remote task API.

use super::{GatewayError, GatewayResult};
use crate::config::ClientConfig;
use crate::session::services::SessionContext;
use reqwest::{Client, Method, RequestBuilder, Url, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client bound to one API base URL and one session.
///
/// Every request carries the session's bearer token when one is held. A 401
/// response to such a request invalidates the session before the error is
/// returned.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    session: Arc<SessionContext>,
}

impl HttpGateway {
    /// Creates a gateway without a request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the base URL is unusable or
    /// the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, session: Arc<SessionContext>) -> GatewayResult<Self> {
        Self::with_timeout(base_url, session, None)
    }

    /// Creates a gateway with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the base URL is not an
    /// absolute `http(s)` URL or the HTTP client cannot be built.
    pub fn with_timeout(
        base_url: impl Into<String>,
        session: Arc<SessionContext>,
        timeout: Option<Duration>,
    ) -> GatewayResult<Self> {
        let mut builder = Client::builder();
        if let Some(limit) = timeout {
            builder = builder.timeout(limit);
        }
        let client = builder.build().map_err(|err| GatewayError::transport(&err))?;
        let raw = base_url.into();
        let parsed =
            Url::parse(raw.trim_end_matches('/')).map_err(|err| GatewayError::transport(&err))?;
        if parsed.cannot_be_a_base() {
            return Err(not_a_base(&parsed));
        }
        Ok(Self {
            client,
            base_url: parsed,
            session,
        })
    }

    /// Creates a gateway from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the configured URL is
    /// unusable or the HTTP client cannot be built.
    pub fn from_config(
        config: &ClientConfig,
        session: Arc<SessionContext>,
    ) -> GatewayResult<Self> {
        Self::with_timeout(config.api_url(), session, config.request_timeout())
    }

    /// Returns the session this gateway authenticates with.
    #[must_use]
    pub const fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &[&str]) -> GatewayResult<T> {
        let body = self.execute(Method::GET, path, |request| request).await?;
        decode(&body)
    }

    pub(crate) async fn send_json<T, B>(
        &self,
        method: Method,
        path: &[&str],
        body: &B,
    ) -> GatewayResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let bytes = self
            .execute(method, path, |request| request.json(body))
            .await?;
        decode(&bytes)
    }

    pub(crate) async fn send_form<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &[&str],
        form: Form,
    ) -> GatewayResult<T> {
        let bytes = self
            .execute(method, path, |request| request.multipart(form))
            .await?;
        decode(&bytes)
    }

    pub(crate) async fn delete(&self, path: &[&str]) -> GatewayResult<()> {
        self.execute(Method::DELETE, path, |request| request)
            .await
            .map(|_| ())
    }

    /// Appends `path` to the base URL, percent-encoding each segment so that
    /// `/`, `?`, `#` and `%` inside an identifier stay inside its segment.
    fn endpoint(&self, path: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| not_a_base(&self.base_url))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    /// Sends one request and returns the body of a 2xx response.
    ///
    /// Only a request that carried a bearer token can expire the session; a
    /// 401 on an anonymous request (such as a failed sign-in) is reported as
    /// an ordinary rejection.
    async fn execute(
        &self,
        method: Method,
        path: &[&str],
        shape: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> GatewayResult<Vec<u8>> {
        let url = self.endpoint(path)?;
        let route = url.path().to_owned();
        let token = self.session.token();
        let mut request = self.client.request(method.clone(), url);
        if let Some(held) = &token {
            request = request.bearer_auth(held.expose());
        }
        debug!(%method, path = %route, "sending gateway request");

        let response = shape(request).send().await.map_err(|err| {
            warn!(%method, path = %route, error = %err, "gateway request failed");
            GatewayError::transport(&err)
        })?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| GatewayError::transport(&err))?;

        if status.is_success() {
            debug!(%method, path = %route, status = status.as_u16(), "gateway request succeeded");
            return Ok(body.to_vec());
        }

        let err = if token.is_some() {
            GatewayError::from_response(status.as_u16(), &body)
        } else {
            GatewayError::from_anonymous_response(status.as_u16(), &body)
        };
        if err.is_unauthorized() {
            self.session.invalidate();
        }
        warn!(
            %method,
            path = %route,
            status = status.as_u16(),
            error = %err,
            "gateway returned an error"
        );
        Err(err)
    }
}

fn not_a_base(url: &Url) -> GatewayError {
    GatewayError::Transport(format!("{url} cannot serve as an API base URL"))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> GatewayResult<T> {
    serde_json::from_slice(body).map_err(|err| GatewayError::InvalidResponse(err.to_string()))
}
