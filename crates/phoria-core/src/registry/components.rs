//! Registry of renderable island components.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{IslandError, IslandResult};
use crate::loader::{self, ComponentLoader, ResolvedIsland};
use crate::registry::FrameworkRegistry;

/// A registered component: canonical name, canonical framework name,
/// and the loader producing its implementation module.
///
/// Entries are owned exclusively by the registry and immutable once
/// inserted; re-registering the same name replaces the entry wholesale.
#[derive(Debug, Clone)]
pub struct ComponentEntry {
	/// Canonical (lowercase) component name.
	pub name: String,
	/// Canonical (lowercase) framework name.
	pub framework: String,
	/// How the implementation module is obtained.
	pub loader: ComponentLoader,
}

impl ComponentEntry {
	/// Resolves this entry's loader into a mountable/renderable value.
	pub async fn resolve(&self) -> IslandResult<ResolvedIsland> {
		loader::resolve(&self.name, &self.loader).await
	}
}

/// Registration input: the framework the component renders with and its
/// loader.
#[derive(Debug, Clone)]
pub struct ComponentRegistration {
	/// Framework name; must already be registered.
	pub framework: String,
	/// Implementation loader.
	pub loader: ComponentLoader,
}

/// Maps component names to framework names and implementation loaders.
///
/// Names are case-insensitive-unique; the last registration under a
/// colliding name wins (logged, not an error). Registration fails when
/// the framework was never registered, leaving the registry untouched.
pub struct ComponentRegistry {
	frameworks: Arc<FrameworkRegistry>,
	entries: RwLock<HashMap<String, Arc<ComponentEntry>>>,
}

impl ComponentRegistry {
	/// Creates a registry validating against the given framework registry.
	pub fn new(frameworks: Arc<FrameworkRegistry>) -> Self {
		Self {
			frameworks,
			entries: RwLock::new(HashMap::new()),
		}
	}

	/// The framework registry this registry validates against.
	pub fn frameworks(&self) -> &Arc<FrameworkRegistry> {
		&self.frameworks
	}

	/// Registers a component under `name.to_lowercase()`.
	///
	/// Fails with [`IslandError::UnknownFramework`] when the registration
	/// names a framework that was never registered; the component registry
	/// is not mutated in that case.
	pub fn register(&self, name: &str, registration: ComponentRegistration) -> IslandResult<()> {
		let canonical = name.to_lowercase();
		let framework = self.frameworks.get(&registration.framework).ok_or_else(|| {
			IslandError::UnknownFramework {
				framework: registration.framework.clone(),
				component: canonical.clone(),
			}
		})?;

		let entry = Arc::new(ComponentEntry {
			name: canonical.clone(),
			framework,
			loader: registration.loader,
		});

		if self.entries.write().insert(canonical.clone(), entry).is_some() {
			tracing::warn!(component = %canonical, "component re-registered, previous entry replaced");
		}
		Ok(())
	}

	/// Applies [`register`](Self::register) to each entry in order.
	///
	/// Partial failure semantics: on the first failing entry the error is
	/// returned and entries already applied remain applied - there is no
	/// transactional rollback.
	pub fn register_many<I, N>(&self, registrations: I) -> IslandResult<()>
	where
		I: IntoIterator<Item = (N, ComponentRegistration)>,
		N: AsRef<str>,
	{
		for (name, registration) in registrations {
			self.register(name.as_ref(), registration)?;
		}
		Ok(())
	}

	/// Case-insensitive component lookup.
	pub fn get(&self, name: &str) -> Option<Arc<ComponentEntry>> {
		self.entries.read().get(&name.to_lowercase()).cloned()
	}

	/// Number of registered components.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// Whether no components are registered.
	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}
}

impl std::fmt::Debug for ComponentRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ComponentRegistry")
			.field("components", &self.len())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::module::Module;

	fn registry_with(frameworks: &[&str]) -> ComponentRegistry {
		let fw = Arc::new(FrameworkRegistry::new());
		for name in frameworks {
			fw.register(name);
		}
		ComponentRegistry::new(fw)
	}

	fn demo_registration(framework: &str) -> ComponentRegistration {
		ComponentRegistration {
			framework: framework.to_string(),
			loader: ComponentLoader::from_module(Module::with_default(())),
		}
	}

	#[test]
	fn register_under_unknown_framework_fails_without_mutation() {
		let registry = registry_with(&["demo"]);
		let err = registry
			.register("widget", demo_registration("solid"))
			.unwrap_err();
		assert!(matches!(err, IslandError::UnknownFramework { framework, component }
			if framework == "solid" && component == "widget"));
		assert!(registry.is_empty());
	}

	#[test]
	fn register_case_folds_name_and_framework() {
		let registry = registry_with(&["Demo"]);
		registry
			.register("Widget", demo_registration("DEMO"))
			.expect("registers");
		let entry = registry.get("wIDGET").expect("case-insensitive get");
		assert_eq!(entry.name, "widget");
		assert_eq!(entry.framework, "demo");
	}

	#[test]
	fn colliding_name_last_registration_wins() {
		let registry = registry_with(&["demo", "other"]);
		registry.register("widget", demo_registration("demo")).unwrap();
		registry.register("Widget", demo_registration("other")).unwrap();
		assert_eq!(registry.len(), 1);
		assert_eq!(registry.get("widget").unwrap().framework, "other");
	}

	#[test]
	fn register_many_resolves_case_insensitively() {
		let registry = registry_with(&["demo"]);
		registry
			.register_many([
				("A", demo_registration("demo")),
				("B", demo_registration("demo")),
			])
			.expect("registers");
		assert!(registry.get("a").is_some());
		assert!(registry.get("B").is_some());
	}

	#[test]
	fn register_many_keeps_entries_applied_before_failure() {
		let registry = registry_with(&["demo"]);
		let err = registry
			.register_many([
				("a", demo_registration("demo")),
				("b", demo_registration("missing")),
				("c", demo_registration("demo")),
			])
			.unwrap_err();
		assert!(matches!(err, IslandError::UnknownFramework { .. }));
		assert!(registry.get("a").is_some());
		assert!(registry.get("b").is_none());
		assert!(registry.get("c").is_none());
	}
}
