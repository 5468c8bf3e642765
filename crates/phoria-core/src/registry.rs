//! Framework and component registries.
//!
//! Registries are explicitly constructed objects passed by reference
//! into framework-adapter initializers, never implicit module-level
//! globals, so lifecycle and test isolation stay controllable. All maps
//! are read-mostly: mutated during the startup registration phase, read
//! concurrently at request time behind an `RwLock` so a hot-reload
//! writer can never expose a partially-constructed entry.

mod components;
mod frameworks;

pub use components::{ComponentEntry, ComponentRegistration, ComponentRegistry};
pub use frameworks::FrameworkRegistry;
