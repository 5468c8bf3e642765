//! # Phoria
//!
//! An islands architecture runtime for Rust.
//!
//! An island is an independently mounted UI component embedded in an
//! otherwise static page. Phoria provides the runtime around such
//! components without naming any concrete UI framework: frameworks plug
//! in as opaque capability providers, components register against them,
//! and the runtime dispatches rendering on the server and hydration in
//! the browser.
//!
//! ## Feature Flags
//!
//! - `server` (default) - SSR dispatch, render routing, and the HTTP
//!   server edge
//! - `client` - the browser runtime: directive-driven hydration
//!   scheduling and CSR mount dispatch
//! - `full` - both runtimes
//!
//! The shared contracts (registries, loaders, props, errors) are always
//! available at the crate root.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use phoria::prelude::*;
//!
//! let frameworks = Arc::new(FrameworkRegistry::new());
//! frameworks.register("demo");
//!
//! let components = Arc::new(ComponentRegistry::new(frameworks.clone()));
//! components.register(
//!     "counter",
//!     ComponentRegistration {
//!         framework: "demo".into(),
//!         loader: ComponentLoader::from_module(Module::with_default(CounterImpl)),
//!     },
//! )?;
//!
//! let services = Arc::new(SsrServiceRegistry::new(frameworks));
//! services.register("demo", Arc::new(DemoSsrService))?;
//!
//! let handler = Arc::new(IslandHandler::new(components, services, RuntimeMode::Development));
//! IslandServer::new(handler).listen(Settings::from_env()?.addr()).await?;
//! ```

// Shared contracts
pub use phoria_core::{
	ComponentEntry, ComponentLoader, ComponentRegistration, ComponentRegistry, ErrorKind,
	FrameworkRegistry, Implementation, IslandError, IslandResult, Module, ModuleFuture, Props,
	ResolvedIsland, parse_props, validate_props,
};

// Server runtime
#[cfg(feature = "server")]
pub use phoria_server::{
	Handler, HealthStatus, IslandHandler, IslandServer, RenderBody, RenderOptions, RenderedIsland,
	Request, Response, RuntimeMode, ServerIsland, Settings, SsrService, SsrServiceRegistry,
	init_logging,
};

// Client runtime
#[cfg(feature = "client")]
pub use phoria_client::{
	CsrService, CsrServiceRegistry, Directive, HostElement, IslandRuntime, MountGuard, MountMode,
	TriggerHost,
};

/// Commonly used types, importable in one line.
pub mod prelude {
	pub use phoria_core::{
		ComponentLoader, ComponentRegistration, ComponentRegistry, FrameworkRegistry, IslandError,
		IslandResult, Module, Props,
	};

	#[cfg(feature = "server")]
	pub use phoria_server::{
		IslandHandler, IslandServer, RuntimeMode, Settings, SsrService, SsrServiceRegistry,
	};

	#[cfg(feature = "client")]
	pub use phoria_client::{CsrService, CsrServiceRegistry, IslandRuntime, MountMode};
}
