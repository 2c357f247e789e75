//! HTTP transport seam.
//!
//! ARCHITECTURE
//! ============
//! Request/response values are plain data so session logic can be tested
//! against an in-memory transport. The browser build sends through
//! `gloo-net`; native builds have no network and report `Unavailable`.
//!
//! TRADE-OFFS
//! ==========
//! Bodies are buffered as text. Every endpoint this client talks to speaks
//! JSON or form-urlencoded, so streaming would buy nothing.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

/// HTTP method subset used by the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Caller-side request options: method, headers, and body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Method,
    /// Header pairs in insertion order.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self { method, ..Self::default() }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns the serde error if `value` cannot be encoded.
    pub fn json<T: serde::Serialize + ?Sized>(self, value: &T) -> Result<Self, serde_json::Error> {
        Ok(self.body(serde_json::to_string(value)?))
    }

    /// First header value matching `name`, case-insensitively.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A fully resolved outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, options: RequestOptions) -> Self {
        Self { url: url.into(), method: options.method, headers: options.headers, body: options.body }
    }

    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A buffered response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, headers: Vec::new(), body: body.into() }
    }

    /// Status is in the 2xx range.
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the body does not match `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Network-level failures. HTTP error statuses are not transport errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be built or sent.
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be read.
    #[error("response body unreadable: {0}")]
    Body(String),

    /// No transport is available in this build.
    #[error("no HTTP transport available in this build")]
    Unavailable,
}

/// Sends one request and buffers the response.
///
/// Futures are not required to be `Send`; browser fetch futures are not.
#[async_trait::async_trait(?Send)]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request never produced a response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =============================================================================
// BROWSER (gloo-net)
// =============================================================================

/// `fetch` through `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::{Method as GlooMethod, RequestBuilder};

            let method = match request.method {
                Method::Get => GlooMethod::GET,
                Method::Post => GlooMethod::POST,
                Method::Put => GlooMethod::PUT,
                Method::Delete => GlooMethod::DELETE,
            };
            let mut builder = RequestBuilder::new(&request.url).method(method);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let built = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError::Request(e.to_string()))?;
            let resp = built.send().await.map_err(|e| TransportError::Request(e.to_string()))?;
            let status = resp.status();
            let headers = resp.headers().entries().collect();
            let body = resp.text().await.map_err(|e| TransportError::Body(e.to_string()))?;
            Ok(HttpResponse { status, headers, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(TransportError::Unavailable)
        }
    }
}
