//! Platform-abstracted HTTP client with Send-safe futures.
//!
//! On **native** the request runs on reqwest directly. On **WASM** `reqwest::Response`
//! holds JS values and is not `Send`, so the request is spawned on the JS thread with
//! `wasm_bindgen_futures::spawn_local` and the result comes back through a `flume`
//! channel.

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;

/// A response reduced to Send-safe data.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Attempt to deserialize the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport-level failure. Non-2xx responses are not errors at this layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpError {
    #[error("request timed out")]
    Timeout,
    #[error("request cancelled")]
    Cancelled,
    #[error("HTTP error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: String,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl RequestBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds `Authorization: Bearer <token>` when a token is present.
    pub fn bearer(self, token: Option<&str>) -> Self {
        match token {
            Some(token) => self.header("Authorization", format!("Bearer {token}")),
            None => self,
        }
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        let json_bytes = serde_json::to_vec(value)?;
        self.body = Some(json_bytes);
        self.headers
            .insert("content-type".to_owned(), "application/json".to_owned());
        Ok(self)
    }

    /// Bounds the whole request, connect through body. On the web the
    /// browser fetch is aborted once it elapses.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn send(self) -> HttpResult<Response> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.send_native().await
        }

        #[cfg(target_arch = "wasm32")]
        {
            self.send_wasm().await
        }
    }

    fn build(
        client: &reqwest::Client,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<Vec<u8>>,
        timeout: Option<Duration>,
    ) -> reqwest::RequestBuilder {
        let mut request = client.post(url);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.body(body);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        request
    }

    async fn read(response: reqwest::Response) -> HttpResult<Response> {
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(Response { status, body })
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn send_native(self) -> HttpResult<Response> {
        let client = reqwest::Client::new();
        let request = Self::build(&client, &self.url, &self.headers, self.body, self.timeout);

        let response = request.send().await?;
        Self::read(response).await
    }

    #[cfg(target_arch = "wasm32")]
    async fn send_wasm(self) -> HttpResult<Response> {
        // flume channels are Send-safe, so this future is Send
        let (tx, rx) = flume::bounded::<HttpResult<Response>>(1);

        let Self {
            url,
            headers,
            body,
            timeout,
        } = self;

        // This closure is NOT Send, but spawn_local doesn't require Send
        wasm_bindgen_futures::spawn_local(async move {
            let client = reqwest::Client::new();
            let result = match Self::build(&client, &url, &headers, body, timeout)
                .send()
                .await
            {
                Ok(response) => Self::read(response).await,
                Err(err) => Err(HttpError::from(err)),
            };
            // The receiver may be gone if the caller was dropped.
            drop(tx.send_async(result).await);
        });

        rx.recv_async().await.map_err(|_err| HttpError::Cancelled)?
    }
}

/// HTTP client with Send-safe futures on all platforms.
///
/// ```ignore
/// let response = Client::post(config.logout_url())
///     .bearer(session.token().as_deref())
///     .send()
///     .await?;
/// ```
pub struct Client;

impl Client {
    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url)
    }
}
