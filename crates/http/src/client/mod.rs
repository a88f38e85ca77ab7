//! Timeline API client

pub mod error;
pub mod interceptor;

use error::ClientError;
use interceptor::{AuthInterceptor, SessionExpiredHandler};
use reqwest::{Client, ClientBuilder, Method, Request, RequestBuilder, Response, header};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;
use timeline_core::{ClientConfig, SessionContext};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_USER_AGENT: &str = concat!("timeline-client/", env!("CARGO_PKG_VERSION"));

/// API client that authenticates with the stored session token
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    interceptor: AuthInterceptor,
}

impl ApiClient {
    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn session(&self) -> &SessionContext {
        self.interceptor.session()
    }

    /// Create a request builder for `path` relative to the base URL.
    ///
    /// The token is attached when the request goes through [`send`](Self::send)
    /// or [`execute`](Self::execute), not here.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Send a request through the auth interceptor.
    ///
    /// Non-2xx responses become errors. A 401 clears the session and fires
    /// the session-expired handler before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the transport error or the error derived from the response status
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let result = match request.build() {
            Ok(request) => self.dispatch(request).await,
            Err(error) => Err(ClientError::Request(error)),
        };

        self.interceptor.on_response(result)
    }

    async fn dispatch(&self, request: Request) -> Result<Response, ClientError> {
        let request = self.interceptor.on_request(request);

        match self.client.execute(request).await {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => {
                let status = response.status();
                let message = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(ClientError::from_status(status, message))
            }
            Err(error) => Err(ClientError::Request(error)),
        }
    }

    /// Send a request and decode the JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode into `T`
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// GET `path` and decode the response
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute)
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// POST `body` as JSON to `path` and decode the response
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute)
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path).json(body))
            .await
    }

    /// PUT `body` as JSON to `path` and decode the response
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute)
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::PUT, path).json(body))
            .await
    }

    /// DELETE `path`, ignoring any response body
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send)
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

/// Builder for ApiClient
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    session: Option<SessionContext>,
    on_session_expired: Option<Arc<dyn SessionExpiredHandler>>,
    // Browsers set their own user agent and fetch has no per-client timeout
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    timeout: Option<Duration>,
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Start from loaded configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        let mut builder = Self::default();
        builder.base_url.clone_from(&config.base_url);
        builder.timeout = config.timeout_secs.map(Duration::from_secs);
        builder.user_agent.clone_from(&config.user_agent);

        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.on_session_expired(interceptor::HardRedirect::new(
                config.login_path.clone(),
            ));
        }

        builder
    }

    /// Builder for code running in the browser: same-origin base URL,
    /// `localStorage` session and a hard redirect to `/auth` on 401
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        let config = ClientConfig::default();
        let mut builder = Self::from_config(&config).session(SessionContext::with_keys(
            timeline_core::browser::LocalStorageStore,
            config.storage,
        ));
        builder.base_url = timeline_core::browser::window_origin();
        builder
    }

    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the session the token is read from and cleared in
    #[must_use]
    pub fn session(mut self, session: SessionContext) -> Self {
        self.session = Some(session);
        self
    }

    /// Install the callback run after a 401 cleared the session
    #[must_use]
    pub fn on_session_expired(mut self, handler: impl SessionExpiredHandler + 'static) -> Self {
        self.on_session_expired = Some(Arc::new(handler));
        self
    }

    /// Set the request timeout (ignored on wasm32)
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or session is missing, the base URL
    /// is not an absolute URL, or the HTTP client cannot be created
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let session = self
            .session
            .ok_or_else(|| ClientError::Configuration("session is required".into()))?;

        url::Url::parse(&base_url).map_err(|error| {
            ClientError::Configuration(format!("invalid base_url '{base_url}': {error}"))
        })?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        #[cfg_attr(target_arch = "wasm32", allow(unused_mut))]
        let mut client_builder = ClientBuilder::new().default_headers(headers);

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(timeout) = self.timeout {
                client_builder = client_builder.timeout(timeout);
            }
            client_builder =
                client_builder.user_agent(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT));
        }

        let client = client_builder.build()?;

        let mut interceptor = AuthInterceptor::new(session);
        if let Some(handler) = self.on_session_expired {
            interceptor = interceptor.with_handler(handler);
        }

        tracing::debug!(%base_url, "API client ready");

        Ok(ApiClient {
            client,
            base_url,
            interceptor,
        })
    }
}
