//! SSR render service seam.
//!
//! Each UI-rendering framework plugs into the server as an opaque
//! capability provider implementing [`SsrService`]. The registry and
//! dispatch logic only ever see the trait object, so adding a framework
//! requires no change to either.

use std::pin::Pin;

use bytes::Bytes;
use futures::stream::Stream;
use phoria_core::{ComponentEntry, IslandResult, Props};

/// Type alias for a streamed render body.
///
/// The stream is the transport's backpressure/cancellation seam: if the
/// consumer aborts, the transport drops the stream and in-flight
/// rendering stops with it.
pub type StreamBody =
    Pin<Box<dyn Stream<Item = Result<Bytes, Box<dyn std::error::Error + Send + Sync>>> + Send>>;

/// Rendered output: buffered markup or a byte stream.
pub enum RenderBody {
    /// Fully materialized markup.
    Markup(String),
    /// Streamed markup, forwarded to the transport without buffering.
    Stream(StreamBody),
}

impl std::fmt::Debug for RenderBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markup(html) => f.debug_tuple("Markup").field(&html.len()).finish(),
            Self::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// Options for a single render call.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Ask the service for a streamed body when it supports one.
    /// Services may ignore this and return markup.
    pub prefer_stream: bool,
}

/// The result of one SSR render.
#[derive(Debug)]
pub struct RenderedIsland {
    /// Canonical framework name that produced the output.
    pub framework: String,
    /// Build-time component path tag, when the implementation module
    /// carried one.
    pub component_path: Option<String>,
    /// The rendered output.
    pub body: RenderBody,
}

/// Per-framework server-side render capability.
///
/// Implementations receive the registered component entry and validated
/// props; resolving the entry's loader into a renderable value
/// (`entry.resolve()`) is the service's job, the same resolver contract
/// the client uses to obtain a mountable value. Errors raised here are
/// wrapped by the dispatch layer with the offending component and
/// framework before reaching the caller.
#[async_trait::async_trait]
pub trait SsrService: Send + Sync {
    /// Renders the component to markup or a stream.
    async fn render(
        &self,
        entry: &ComponentEntry,
        props: Option<&Props>,
        options: &RenderOptions,
    ) -> IslandResult<RenderedIsland>;
}
