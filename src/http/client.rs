use std::fmt;

use async_trait::async_trait;
use reqwest::header::{HeaderMap as Headers, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, RequestBuilder as ReqwestRequestBuilder, Url};
use secrecy::{ExposeSecret, SecretString};
#[cfg(feature = "tracing_instrument")]
use tracing::instrument;
use tracing::{debug, trace};

use super::multipart::Multipart;
use super::{ErrorResponse, HttpError, Request, Transport};
use crate::constants;
use crate::internal::prelude::*;

/// A builder for the underlying [`Http`] client.
///
/// If you do not need to use a proxy or do not need to disable the rustls backend, you can use
/// [`Http::new`] instead.
#[must_use]
pub struct HttpBuilder {
    client: Option<Client>,
    token: SecretString,
    proxy: Option<Url>,
}

impl HttpBuilder {
    /// Construct a new builder to call methods on for the HTTP construction. The `token` will
    /// automatically be prefixed "Bot " if not already.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            client: None,
            token: SecretString::new(parse_token(token)),
            proxy: None,
        }
    }

    /// Sets the [`reqwest::Client`]. If one isn't provided, a default one will be used.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the proxy that Discord HTTP API requests will be passed to. This is mainly intended
    /// for something like [`twilight-http-proxy`] where multiple processes can make API requests
    /// while sharing a single ratelimiter.
    ///
    /// The proxy should be in the form of the protocol and hostname, e.g.
    /// `http://127.0.0.1:3000` or `http://myproxy.example`
    ///
    /// This will simply send HTTP API requests to the proxy instead of Discord API to allow the
    /// proxy to intercept, rate limit, and forward requests.
    ///
    /// [`twilight-http-proxy`]: https://github.com/twilight-rs/http-proxy
    pub fn proxy(mut self, proxy: Url) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Use the given configuration to build the `Http` client.
    #[must_use]
    pub fn build(self) -> Http {
        let client = self.client.unwrap_or_else(|| {
            let builder = configure_client_backend(Client::builder());
            builder.build().unwrap_or_else(|why| {
                tracing::warn!("Failed to build the configured reqwest client: {why}");
                Client::new()
            })
        });

        Http {
            client,
            token: self.token,
            proxy: self.proxy,
        }
    }
}

fn parse_token(token: impl AsRef<str>) -> String {
    let token = token.as_ref().trim();

    if token.starts_with("Bot ") || token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bot {token}")
    }
}

/// **Note**: For all member functions that return a [`Result`], the Error kind will be either
/// [`Error::Http`] or [`Error::Json`].
///
/// [`Error::Http`]: crate::Error::Http
/// [`Error::Json`]: crate::Error::Json
pub struct Http {
    client: Client,
    token: SecretString,
    proxy: Option<Url>,
}

impl fmt::Debug for Http {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Http").field("client", &self.client).field("proxy", &self.proxy).finish()
    }
}

impl Http {
    #[must_use]
    pub fn new(token: &str) -> Self {
        HttpBuilder::new(token).build()
    }

    /// The token, including its `Bot ` prefix.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Performs a request, returning the raw response on success.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::UnsuccessfulRequest`] for a response with a non-success status code,
    /// or [`HttpError::Request`] if the request could not be sent.
    #[cfg_attr(feature = "tracing_instrument", instrument(skip(self, request), fields(route = %request.route().redacted_path())))]
    pub async fn perform(&self, request: Request<'_>) -> Result<reqwest::Response> {
        let method = request.method();
        let route = request.route().redacted_path();

        let response = self.build(&request)?.send().await.map_err(HttpError::from)?;
        let status = response.status();
        debug!("{method} {route}: {status}");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.map_err(HttpError::from)?;
        Err(Error::Http(ErrorResponse::new(status.as_u16(), route, method, &body).into()))
    }

    fn build(&self, request: &Request<'_>) -> Result<ReqwestRequestBuilder> {
        let mut path = request.url();
        if let Some(proxy) = &self.proxy {
            path = path.replace("https://discord.com/", proxy.as_str());
        }

        let mut builder = self.client.request(request.method().reqwest_method(), path);

        let mut headers = Headers::with_capacity(3);
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(self.token.expose_secret()).map_err(HttpError::from)?,
        );

        if request.files_ref().is_empty() {
            // Discord will return a 400: Bad Request response if we set the content type header,
            // but don't give a body.
            if let Some(body) = request.body_ref() {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                builder = builder.body(body.to_vec());
            }
        } else {
            trace!("uploading {} files", request.files_ref().len());
            let multipart = Multipart {
                files: request.files_ref(),
                payload_json: request.body_ref(),
            };
            // Setting multipart adds the content-type and content-length headers
            builder = builder.multipart(multipart.build_form()?);
        }

        Ok(builder.headers(headers))
    }
}

#[async_trait]
impl Transport for Http {
    async fn request(&self, request: Request<'_>) -> Result<Option<Value>> {
        let response = self.perform(request).await?;
        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await.map_err(HttpError::from)?;
        if bytes.is_empty() {
            return Ok(None);
        }

        crate::json::from_slice(&bytes).map(Some)
    }
}

#[cfg(feature = "rustls_backend")]
fn configure_client_backend(builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
    builder.use_rustls_tls()
}

#[cfg(not(feature = "rustls_backend"))]
fn configure_client_backend(builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
    builder.use_native_tls()
}
