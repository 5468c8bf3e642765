//! Browser runtime assembly and document boot scan.
//!
//! [`IslandRuntime`] bundles the registries and trigger host one page
//! needs; the host application builds it at startup, registers its
//! frameworks, components and mount services, then runs the document
//! scan. The scan is idempotent: every element it touches is marked
//! with [`CONNECTED_ATTR`] first, so re-running it (after client-side
//! navigation, say) only picks up elements added since the last pass.

use std::rc::Rc;
use std::sync::Arc;

use phoria_core::{ComponentRegistry, FrameworkRegistry};

use crate::dom::{CONNECTED_ATTR, HostElement};
use crate::island::{self, COMPONENT_ATTR};
use crate::scheduler::TriggerHost;
use crate::service::CsrServiceRegistry;

/// Tag name of island host elements in the document.
pub const ISLAND_TAG: &str = "phoria-island";

/// One page's island runtime: shared framework registry, component and
/// mount-service registries over it, and the trigger host that drives
/// directive scheduling.
pub struct IslandRuntime {
	frameworks: Arc<FrameworkRegistry>,
	components: ComponentRegistry,
	services: CsrServiceRegistry,
	triggers: Rc<dyn TriggerHost>,
}

impl IslandRuntime {
	/// Creates a runtime over the given trigger host with empty registries.
	pub fn new(triggers: Rc<dyn TriggerHost>) -> Self {
		let frameworks = Arc::new(FrameworkRegistry::new());
		Self {
			components: ComponentRegistry::new(frameworks.clone()),
			services: CsrServiceRegistry::new(frameworks.clone()),
			frameworks,
			triggers,
		}
	}

	/// Creates a runtime driven by the browser's scheduling primitives.
	#[cfg(target_arch = "wasm32")]
	pub fn browser() -> Self {
		Self::new(Rc::new(crate::scheduler::BrowserTriggers::new()))
	}

	/// The shared framework registry.
	pub fn frameworks(&self) -> &Arc<FrameworkRegistry> {
		&self.frameworks
	}

	/// The component registry.
	pub fn components(&self) -> &ComponentRegistry {
		&self.components
	}

	/// The CSR mount-service registry.
	pub fn services(&self) -> &CsrServiceRegistry {
		&self.services
	}

	/// Connects a single island element, once.
	///
	/// Returns `true` when the element was dispatched by this call.
	/// Elements already carrying the connected marker are skipped;
	/// resolution failures are logged and leave the element inert (the
	/// marker is still set, so a broken island is not retried on every
	/// scan).
	pub fn connect_element(&self, host: &HostElement) -> bool {
		if host.has_attribute(CONNECTED_ATTR) {
			return false;
		}
		host.set_attribute(CONNECTED_ATTR, "");
		match island::connect(host, &self.components, &self.services, self.triggers.clone()) {
			Ok(_) => true,
			Err(err) => {
				island::report(host.attribute(COMPONENT_ATTR).as_deref(), &err);
				false
			}
		}
	}

	/// Scans the document for island elements and connects each one.
	///
	/// Returns the number of elements dispatched by this pass.
	#[cfg(target_arch = "wasm32")]
	pub fn hydrate_document(&self) -> usize {
		use wasm_bindgen::JsCast;

		let Some(document) = web_sys::window().and_then(|window| window.document()) else {
			return 0;
		};
		let Ok(nodes) = document.query_selector_all(ISLAND_TAG) else {
			return 0;
		};

		let mut connected = 0;
		for index in 0..nodes.length() {
			let Some(node) = nodes.get(index) else {
				continue;
			};
			let Ok(element) = node.dyn_into::<web_sys::Element>() else {
				continue;
			};
			if self.connect_element(&HostElement::new(element)) {
				connected += 1;
			}
		}
		connected
	}
}

impl std::fmt::Debug for IslandRuntime {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("IslandRuntime")
			.field("components", &self.components)
			.field("services", &self.services)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use phoria_core::{
		ComponentEntry, ComponentLoader, ComponentRegistration, IslandResult, Module, Props,
		ResolvedIsland,
	};

	use super::*;
	use crate::scheduler::FakeTriggers;
	use crate::service::{CsrService, MountMode};

	struct CountingService {
		mounts: Rc<RefCell<usize>>,
	}

	impl CsrService for CountingService {
		fn mount(
			&self,
			_host: &HostElement,
			_island: &ResolvedIsland,
			_entry: &ComponentEntry,
			_props: Option<&Props>,
			_mode: MountMode,
		) -> IslandResult<()> {
			*self.mounts.borrow_mut() += 1;
			Ok(())
		}
	}

	fn runtime() -> (IslandRuntime, Rc<RefCell<usize>>) {
		let runtime = IslandRuntime::new(Rc::new(FakeTriggers::new()));
		runtime.frameworks().register("demo");
		runtime
			.components()
			.register(
				"widget",
				ComponentRegistration {
					framework: "demo".to_string(),
					loader: ComponentLoader::from_module(Module::with_default(())),
				},
			)
			.expect("registers");
		let mounts = Rc::new(RefCell::new(0));
		runtime
			.services()
			.register("demo", Arc::new(CountingService { mounts: mounts.clone() }))
			.expect("registers");
		(runtime, mounts)
	}

	#[test]
	fn connect_element_dispatches_once_per_element() {
		let (runtime, mounts) = runtime();
		let host = HostElement::with_attributes([("component", "widget"), ("client:load", "")]);

		assert!(runtime.connect_element(&host));
		assert_eq!(*mounts.borrow(), 1);
		assert!(host.has_attribute(CONNECTED_ATTR));

		// A second scan pass sees the marker and skips the element.
		assert!(!runtime.connect_element(&host));
		assert_eq!(*mounts.borrow(), 1);
	}

	#[test]
	fn broken_island_is_marked_and_not_retried() {
		let (runtime, mounts) = runtime();
		let host = HostElement::with_attributes([("component", "missing"), ("client:load", "")]);

		assert!(!runtime.connect_element(&host));
		assert!(host.has_attribute(CONNECTED_ATTR));
		assert!(!runtime.connect_element(&host));
		assert_eq!(*mounts.borrow(), 0);
	}
}
