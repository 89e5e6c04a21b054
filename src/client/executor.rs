//! Request Executor
//!
//! [`ApiClient::execute`] is the single path every typed call takes:
//!
//! 1. target = configured base address + endpoint path
//! 2. JSON bodies get `Content-Type: application/json`; multipart bodies get
//!    no explicit content type so the transport can write the boundary
//! 3. `Authorization: Bearer <token>` when the token source has a token
//! 4. caller headers are laid over those defaults, never the reverse
//! 5. dispatch, then non-2xx → [`ClientError::Application`] with the raw
//!    body, 2xx → JSON decode into the caller's type
//!
//! The client keeps no per-call state, so one value can be cloned and used
//! from many tasks at once.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Request};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::error::ClientError;
use crate::client::token::{NoToken, TokenSource};
use crate::client::transport::{HttpTransport, Transport};
use crate::shared::config::ApiConfig;

/// Request payload
#[derive(Debug)]
pub enum RequestBody {
    /// Serialized as JSON
    Json(serde_json::Value),
    /// Sent as `multipart/form-data`; the transport sets the boundary
    Multipart(Form),
}

/// What kind of body a descriptor carries, for logging and header decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    None,
    Json,
    Multipart,
}

impl BodyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json => "json",
            Self::Multipart => "multipart",
        }
    }
}

/// Request descriptor: method, extra headers, optional body
#[derive(Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self::default().method(Method::DELETE)
    }

    /// POST without a body
    pub fn post() -> Self {
        Self::default().method(Method::POST)
    }

    /// POST with a JSON body
    pub fn post_json<T: Serialize + ?Sized>(body: &T) -> Result<Self, ClientError> {
        Self::post().json(body)
    }

    /// POST with a multipart body
    pub fn multipart(form: Form) -> Self {
        Self {
            method: Method::POST,
            headers: HeaderMap::new(),
            body: Some(RequestBody::Multipart(form)),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::InvalidRequest(format!("unserializable body: {}", e)))?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    /// Add a caller header. Caller headers win over executor defaults.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn body_kind(&self) -> BodyKind {
        match self.body {
            None => BodyKind::None,
            Some(RequestBody::Json(_)) => BodyKind::Json,
            Some(RequestBody::Multipart(_)) => BodyKind::Multipart,
        }
    }
}

/// Typed API client
///
/// Built once with its configuration; the token source and transport are
/// injected so tests can swap either without touching globals.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Client with the reqwest transport and no token
    pub fn new(config: ApiConfig) -> Self {
        let http = Client::new();
        Self {
            config,
            transport: Arc::new(HttpTransport::new(http.clone())),
            http,
            tokens: Arc::new(NoToken),
        }
    }

    pub fn with_token_source(mut self, tokens: impl TokenSource + 'static) -> Self {
        self.tokens = Arc::new(tokens);
        self
    }

    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Turn a descriptor into a ready-to-send request
    pub fn build_request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Request, ClientError> {
        let target = self.config.url(endpoint);
        let url = reqwest::Url::parse(&target)
            .map_err(|e| ClientError::InvalidRequest(format!("{}: {}", target, e)))?;

        let mut headers = HeaderMap::new();
        if options.body_kind() == BodyKind::Json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(token) = self.tokens.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                ClientError::InvalidRequest("token is not a valid header value".to_string())
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let RequestOptions {
            method,
            headers: caller_headers,
            body,
        } = options;
        for name in caller_headers.keys() {
            headers.remove(name);
        }
        headers.extend(caller_headers);

        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        builder = match body {
            Some(RequestBody::Json(value)) => {
                let bytes = serde_json::to_vec(&value).map_err(|e| {
                    ClientError::InvalidRequest(format!("unserializable body: {}", e))
                })?;
                builder.body(bytes)
            }
            Some(RequestBody::Multipart(form)) => builder.multipart(form),
            None => builder,
        };

        builder
            .build()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))
    }

    /// Execute one request and decode the success body as `T`
    pub async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        let body_kind = options.body_kind();
        let request = self.build_request(endpoint, options)?;

        tracing::debug!(
            url = %request.url(),
            method = %request.method(),
            has_body = body_kind != BodyKind::None,
            body_kind = body_kind.as_str(),
            "Dispatching API request"
        );

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::debug!("Transport failure for {}: {}", endpoint, e);
            ClientError::Transport(e)
        })?;

        let status = response.status();
        tracing::debug!(endpoint, status = status.as_u16(), "API response received");

        if !status.is_success() {
            let body = response.text().await?;
            return Err(ClientError::Application { status, body });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
            source,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
