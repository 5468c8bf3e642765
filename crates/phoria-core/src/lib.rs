//! Phoria Core - island runtime contracts.
//!
//! An island is an independently mounted/rendered UI component embedded
//! in a page. This crate holds the pieces shared by the server and
//! browser runtimes:
//!
//! - [`registry`]: framework and component registries, explicitly
//!   constructed and injected (never module-level globals)
//! - [`loader`]: the tagged-union loader abstraction and its resolver,
//!   decoupling a registered component from how its implementation
//!   module is shaped
//! - [`module`]: the opaque module value loaders produce, including the
//!   build-time component path tag
//! - [`props`]: JSON props validation shared by the render endpoint and
//!   the client `props` attribute
//! - [`error`]: the runtime error taxonomy
//!
//! Per-framework rendering implementations are opaque capability
//! providers registered elsewhere (`phoria-server` for SSR services,
//! `phoria-client` for CSR mount services); nothing in this crate names
//! a concrete UI framework.

pub mod error;
pub mod loader;
pub mod module;
pub mod props;
pub mod registry;

pub use error::{ErrorKind, IslandError, IslandResult};
pub use loader::{ComponentLoader, ModuleFuture, ModuleLoader, ResolvedIsland, Selector, resolve};
pub use module::{DEFAULT_EXPORT, Implementation, Module};
pub use props::{Props, parse_props, validate_props};
pub use registry::{ComponentEntry, ComponentRegistration, ComponentRegistry, FrameworkRegistry};
