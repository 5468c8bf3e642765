//! Render request routing.
//!
//! [`IslandHandler`] is the server's dispatch surface:
//!
//! - `POST /render/:component` - resolve the component, render it, and
//!   emit the framework (and, when tagged, the component path) as
//!   response headers with the markup or stream as the body
//! - `GET /hc` - health check, no render performed
//!
//! Failures abort the single request with a structured JSON error
//! payload; they never crash the process.

use std::sync::Arc;

use hyper::header::HeaderName;
use hyper::{Method, StatusCode};
use phoria_core::{ComponentRegistry, ErrorKind, IslandError, IslandResult};
use serde::Serialize;

use crate::config::RuntimeMode;
use crate::health::HealthStatus;
use crate::http::{Request, Response};
use crate::island::ServerIsland;
use crate::registry::SsrServiceRegistry;
use crate::service::{RenderBody, RenderOptions};

/// Response header carrying the framework that rendered the island.
pub const FRAMEWORK_HEADER: HeaderName = HeaderName::from_static("x-phoria-island-framework");

/// Response header carrying the component's build-time path tag.
pub const PATH_HEADER: HeaderName = HeaderName::from_static("x-phoria-island-path");

/// Asynchronous request handler seam.
///
/// The server drives trait objects of this shape; a calling layer can
/// wrap an [`IslandHandler`] to interpose middleware between routing and
/// rendering.
#[async_trait::async_trait]
pub trait Handler: Send + Sync {
    /// Handles one request.
    async fn handle(&self, request: Request) -> IslandResult<Response>;
}

#[derive(Serialize)]
struct ErrorPayload<'a> {
    error: &'static str,
    message: &'a str,
}

/// Maps an error onto its HTTP status class.
fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Render => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the structured error response for a failed request.
pub fn error_response(err: &IslandError) -> Response {
    let kind = err.kind();
    Response::new(status_for(kind)).with_json(&ErrorPayload {
        error: kind.as_str(),
        message: &err.to_string(),
    })
}

/// Routes render and health requests to the island runtime.
pub struct IslandHandler {
    components: Arc<ComponentRegistry>,
    services: Arc<SsrServiceRegistry>,
    mode: RuntimeMode,
}

impl IslandHandler {
    /// Creates a handler over the given registries.
    pub fn new(
        components: Arc<ComponentRegistry>,
        services: Arc<SsrServiceRegistry>,
        mode: RuntimeMode,
    ) -> Self {
        Self {
            components,
            services,
            mode,
        }
    }

    async fn render(&self, component: Option<&str>, body: &[u8]) -> IslandResult<Response> {
        let island = ServerIsland::resolve(&self.components, &self.services, component, body)?;
        let rendered = island.render(&RenderOptions::default()).await?;

        let mut response = Response::ok()
            .with_content_type("text/html; charset=utf-8")
            .with_header(FRAMEWORK_HEADER, &rendered.framework);
        if let Some(path) = &rendered.component_path {
            response = response.with_header(PATH_HEADER, path);
        }
        Ok(match rendered.body {
            RenderBody::Markup(html) => response.with_body(html),
            RenderBody::Stream(stream) => response.with_stream(stream),
        })
    }

    fn health(&self) -> Response {
        let status = HealthStatus::current(self.mode, self.components.frameworks());
        Response::ok().with_json(&status)
    }
}

#[async_trait::async_trait]
impl Handler for IslandHandler {
    async fn handle(&self, request: Request) -> IslandResult<Response> {
        let path = request.path().trim_end_matches('/');

        let response = match (&request.method, path) {
            (&Method::POST, path) if path == "/render" || path.starts_with("/render/") => {
                let component = path
                    .strip_prefix("/render")
                    .map(|rest| rest.trim_start_matches('/'))
                    .filter(|rest| !rest.is_empty());
                match self.render(component, &request.body).await {
                    Ok(response) => response,
                    Err(err) => {
                        tracing::warn!(
                            component = component.unwrap_or("<missing>"),
                            error = %err,
                            "render request failed"
                        );
                        error_response(&err)
                    }
                }
            }
            (&Method::GET, "/hc") => self.health(),
            _ => Response::not_found().with_json(&ErrorPayload {
                error: ErrorKind::NotFound.as_str(),
                message: &format!("no route for {} {}", request.method, request.path()),
            }),
        };

        Ok(response)
    }
}

impl std::fmt::Debug for IslandHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IslandHandler")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
