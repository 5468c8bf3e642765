//! HTTP server for the render endpoint.
//!
//! A hyper 1.x accept loop: one task per connection, requests buffered
//! on the way in, response bodies boxed so streamed markup flows to the
//! transport with its own backpressure. Process lifecycle and signal
//! handling belong to the embedding application, not this crate.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::{Frame, Incoming};
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};

use crate::handler::{Handler, error_response};
use crate::http::{Body, Request, Response};

/// HTTP server driving a [`Handler`].
pub struct IslandServer {
    handler: Arc<dyn Handler>,
}

impl IslandServer {
    /// Creates a server over the given handler.
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    /// Binds the address and serves connections until an accept error.
    pub async fn listen(
        self,
        addr: impl ToSocketAddrs,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "island server listening");

        loop {
            let (stream, remote) = listener.accept().await?;
            let handler = self.handler.clone();

            tokio::task::spawn(async move {
                if let Err(err) = Self::handle_connection(stream, handler).await {
                    tracing::warn!(remote = %remote, error = %err, "connection error");
                }
            });
        }
    }

    async fn handle_connection(
        stream: TcpStream,
        handler: Arc<dyn Handler>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let io = TokioIo::new(stream);
        let service = RequestService { handler };
        http1::Builder::new().serve_connection(io, service).await?;
        Ok(())
    }
}

type ResponseBody = UnsyncBoxBody<Bytes, Box<dyn std::error::Error + Send + Sync>>;

fn into_hyper_response(response: Response) -> hyper::Response<ResponseBody> {
    let mut builder = hyper::Response::builder().status(response.status);
    for (name, value) in response.headers.iter() {
        builder = builder.header(name, value);
    }

    let body: ResponseBody = match response.body {
        Body::Full(bytes) => Full::new(bytes)
            .map_err(|never| match never {})
            .boxed_unsync(),
        Body::Stream(stream) => {
            StreamBody::new(stream.map(|chunk| chunk.map(Frame::data))).boxed_unsync()
        }
    };

    // The builder only fails on invalid parts, all of which came from a
    // validated Response.
    builder
        .body(body)
        .unwrap_or_else(|_| {
            hyper::Response::new(Full::new(Bytes::new()).map_err(|never| match never {}).boxed_unsync())
        })
}

/// hyper service bridging to the [`Handler`] seam.
struct RequestService {
    handler: Arc<dyn Handler>,
}

impl Service<hyper::Request<Incoming>> for RequestService {
    type Response = hyper::Response<ResponseBody>;
    type Error = Box<dyn std::error::Error + Send + Sync>;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
        let handler = self.handler.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let body_bytes = body.collect().await?.to_bytes();

            let request = Request::new(parts.method, parts.uri, parts.headers, body_bytes);
            let response = match handler.handle(request).await {
                Ok(response) => response,
                Err(err) => {
                    tracing::error!(error = %err, "handler error");
                    error_response(&err)
                }
            };

            Ok(into_hyper_response(response))
        })
    }
}
