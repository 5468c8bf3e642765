//! CSR mount service seam.
//!
//! Each UI-rendering framework plugs into the browser runtime as an
//! opaque capability provider implementing [`CsrService`]. The directive
//! scheduler decides *when* to mount; the service decides *how*.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use phoria_core::{ComponentEntry, FrameworkRegistry, IslandError, IslandResult, Props, ResolvedIsland};

use crate::dom::HostElement;

/// How a mount call should treat existing markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountMode {
	/// Fresh render into the element, discarding existing markup.
	Render,
	/// Attach behavior to markup already present.
	Hydrate,
}

/// Per-framework client-side mount capability.
///
/// Runs on the page's single cooperative event loop; no `Send`/`Sync`
/// bound so implementations can hold browser handles.
pub trait CsrService {
	/// Mounts the resolved island into the host element.
	fn mount(
		&self,
		host: &HostElement,
		island: &ResolvedIsland,
		entry: &ComponentEntry,
		props: Option<&Props>,
		mode: MountMode,
	) -> IslandResult<()>;
}

/// Maps framework names to their CSR mount services.
///
/// At most one service per framework; a later registration overwrites
/// the earlier one (logged, not an error). Lookup failure modes mirror
/// the SSR registry: an unregistered framework name is a configuration
/// bug, a registered framework without a service is
/// [`IslandError::CsrServiceNotFound`]. The island element boundary
/// catches either, so a misconfigured island degrades to "unmounted"
/// instead of crashing the page.
pub struct CsrServiceRegistry {
	frameworks: Arc<FrameworkRegistry>,
	services: RwLock<HashMap<String, Arc<dyn CsrService>>>,
}

impl CsrServiceRegistry {
	/// Creates a registry validating against the given framework registry.
	pub fn new(frameworks: Arc<FrameworkRegistry>) -> Self {
		Self {
			frameworks,
			services: RwLock::new(HashMap::new()),
		}
	}

	/// The framework registry this registry validates against.
	pub fn frameworks(&self) -> &Arc<FrameworkRegistry> {
		&self.frameworks
	}

	/// Registers the mount service for a framework, returning the
	/// canonical framework name.
	pub fn register(
		&self,
		framework: &str,
		service: Arc<dyn CsrService>,
	) -> IslandResult<String> {
		let canonical = self
			.frameworks
			.get(framework)
			.ok_or_else(|| IslandError::FrameworkNotRegistered(framework.to_string()))?;
		if self.services.write().insert(canonical.clone(), service).is_some() {
			tracing::warn!(framework = %canonical, "CSR service re-registered, previous service replaced");
		}
		Ok(canonical)
	}

	/// Looks up the mount service for a framework.
	pub fn get(&self, framework: &str) -> IslandResult<Arc<dyn CsrService>> {
		let canonical = self
			.frameworks
			.get(framework)
			.ok_or_else(|| IslandError::FrameworkNotRegistered(framework.to_string()))?;
		self.services
			.read()
			.get(&canonical)
			.cloned()
			.ok_or(IslandError::CsrServiceNotFound(canonical))
	}
}

impl std::fmt::Debug for CsrServiceRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CsrServiceRegistry")
			.field("services", &self.services.read().len())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct NullService;

	impl CsrService for NullService {
		fn mount(
			&self,
			_host: &HostElement,
			_island: &ResolvedIsland,
			_entry: &ComponentEntry,
			_props: Option<&Props>,
			_mode: MountMode,
		) -> IslandResult<()> {
			Ok(())
		}
	}

	#[test]
	fn lookup_distinguishes_unknown_framework_from_missing_service() {
		let frameworks = Arc::new(FrameworkRegistry::new());
		frameworks.register("demo");
		let registry = CsrServiceRegistry::new(frameworks);

		assert!(matches!(
			registry.get("solid").err().unwrap(),
			IslandError::FrameworkNotRegistered(_)
		));
		assert!(matches!(
			registry.get("demo").err().unwrap(),
			IslandError::CsrServiceNotFound(name) if name == "demo"
		));

		registry.register("Demo", Arc::new(NullService)).unwrap();
		assert!(registry.get("DEMO").is_ok());
	}
}
