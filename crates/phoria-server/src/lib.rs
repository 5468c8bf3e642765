//! Phoria Server - server-side island rendering.
//!
//! Resolves an inbound render call (component name + props body) into a
//! render by the component framework's registered [`SsrService`], and
//! exposes the result over HTTP:
//!
//! - `POST /render/:component` - rendered markup (or a stream), with
//!   `x-phoria-island-framework` and, when the implementation module
//!   carries a build-time path tag, `x-phoria-island-path` headers
//! - `GET /hc` - running mode and registered frameworks
//!
//! Services are per-framework capability objects held by an
//! [`SsrServiceRegistry`]; the routing layer never sees a concrete
//! framework type. Registries are populated during startup and read
//! concurrently by requests thereafter.

pub mod config;
pub mod handler;
pub mod health;
pub mod http;
pub mod island;
pub mod logging;
pub mod registry;
pub mod server;
pub mod service;

pub use config::{RuntimeMode, Settings, SettingsError};
pub use handler::{FRAMEWORK_HEADER, Handler, IslandHandler, PATH_HEADER, error_response};
pub use health::HealthStatus;
pub use http::{Body, Request, Response};
pub use island::ServerIsland;
pub use logging::init_logging;
pub use registry::SsrServiceRegistry;
pub use server::IslandServer;
pub use service::{RenderBody, RenderOptions, RenderedIsland, SsrService, StreamBody};
