//! Minimal HTTP request/response model for the render endpoint.
//!
//! A thin, transport-facing pair of types: requests arrive fully
//! buffered (render props are small JSON objects), responses carry
//! either buffered bytes or a stream so rendered markup can flow to the
//! transport with its own backpressure.

use bytes::Bytes;
use hyper::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use hyper::{HeaderMap, Method, StatusCode, Uri};
use serde::Serialize;

use crate::service::StreamBody;

/// HTTP request representation.
#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Request {
    /// Creates a new request.
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
        }
    }

    /// The request path.
    pub fn path(&self) -> &str {
        self.uri.path()
    }
}

/// Response body: buffered bytes or a forwarded stream.
pub enum Body {
    Full(Bytes),
    Stream(StreamBody),
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full(bytes) => f.debug_tuple("Full").field(&bytes.len()).finish(),
            Self::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// HTTP response representation.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Body,
}

impl Response {
    /// Creates an empty response with the given status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Body::Full(Bytes::new()),
        }
    }

    /// HTTP 200 OK.
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// HTTP 400 Bad Request.
    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST)
    }

    /// HTTP 404 Not Found.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    /// HTTP 500 Internal Server Error.
    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Replaces the body with buffered bytes.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Body::Full(body.into());
        self
    }

    /// Replaces the body with a stream, forwarded without buffering.
    pub fn with_stream(mut self, stream: StreamBody) -> Self {
        self.body = Body::Stream(stream);
        self
    }

    /// Sets a header from string parts.
    ///
    /// A value that is not a legal header value is skipped with a
    /// warning rather than failing the response; header values here come
    /// from registration-time metadata, not request input.
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(name, value);
            }
            Err(_) => {
                tracing::warn!(header = %name, "skipping header with invalid value");
            }
        }
        self
    }

    /// Sets the content type.
    pub fn with_content_type(self, value: &str) -> Self {
        self.with_header(CONTENT_TYPE, value)
    }

    /// Serializes a JSON body and sets the content type.
    pub fn with_json<T: Serialize>(self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => self
                .with_content_type("application/json")
                .with_body(body),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize JSON response body");
                Self::internal_server_error()
            }
        }
    }

    /// The buffered body bytes, when the body is not a stream.
    pub fn body_bytes(&self) -> Option<&Bytes> {
        match &self.body {
            Body::Full(bytes) => Some(bytes),
            Body::Stream(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_shorthands() {
        assert_eq!(Response::ok().status, StatusCode::OK);
        assert_eq!(Response::bad_request().status, StatusCode::BAD_REQUEST);
        assert_eq!(Response::not_found().status, StatusCode::NOT_FOUND);
        assert_eq!(
            Response::internal_server_error().status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn json_body_sets_content_type() {
        let response = Response::ok().with_json(&serde_json::json!({"a": 1}));
        assert_eq!(
            response.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(response.body_bytes().unwrap().as_ref(), br#"{"a":1}"#);
    }

    #[test]
    fn invalid_header_value_is_skipped() {
        let response = Response::ok().with_header(CONTENT_TYPE, "bad\nvalue");
        assert!(response.headers.get(CONTENT_TYPE).is_none());
    }
}
