//! Component loader resolution.
//!
//! A registered component does not say how its implementation module is
//! shaped. The two loader forms - default-export and
//! named-export-with-selector - are a tagged union dispatched by
//! [`resolve`], which normalizes either form into a [`ResolvedIsland`]:
//! the live implementation plus the optional build-time path tag.
//!
//! Resolution is a pure function over its inputs: no shared state, no
//! caching, safe to invoke concurrently from independent requests. The
//! same contract serves both consumers - the client resolves to obtain a
//! mountable value, the server to obtain a renderable one.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::{IslandError, IslandResult};
use crate::module::{Implementation, Module};

/// Deferred module operation result.
pub type ModuleFuture = BoxFuture<'static, IslandResult<Module>>;

/// Zero-argument deferred operation producing a module value.
pub type ModuleLoader = Arc<dyn Fn() -> ModuleFuture + Send + Sync>;

/// Selector applied to a module when the implementation is not its
/// default export.
pub type Selector = Arc<dyn Fn(&Module) -> Option<Implementation> + Send + Sync>;

/// How a component's implementation module is obtained.
#[derive(Clone)]
pub enum ComponentLoader {
	/// Loader whose module must carry a `default` export.
	Default(ModuleLoader),
	/// Loader paired with a selector picking the implementation out of
	/// the module.
	Named {
		/// Deferred module operation.
		module: ModuleLoader,
		/// Selector applied to the produced module.
		component: Selector,
	},
}

impl ComponentLoader {
	/// Builds a default-loader from an async module operation.
	pub fn default_export<F, Fut>(load: F) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = IslandResult<Module>> + Send + 'static,
	{
		Self::Default(Arc::new(move || Box::pin(load())))
	}

	/// Builds a named-loader from an async module operation and a selector.
	pub fn named_export<F, Fut, S>(load: F, select: S) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = IslandResult<Module>> + Send + 'static,
		S: Fn(&Module) -> Option<Implementation> + Send + Sync + 'static,
	{
		Self::Named {
			module: Arc::new(move || Box::pin(load())),
			component: Arc::new(select),
		}
	}

	/// Builds a default-loader over an already-materialized module.
	pub fn from_module(module: Module) -> Self {
		Self::default_export(move || {
			let module = module.clone();
			async move { Ok(module) }
		})
	}
}

impl std::fmt::Debug for ComponentLoader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Default(_) => f.write_str("ComponentLoader::Default"),
			Self::Named { .. } => f.write_str("ComponentLoader::Named"),
		}
	}
}

/// A loader resolved into something mountable/renderable.
#[derive(Clone)]
pub struct ResolvedIsland {
	/// Live implementation value for the framework adapter.
	pub implementation: Implementation,
	/// Build-time source path tag, when the module carried one.
	pub component_path: Option<String>,
}

impl std::fmt::Debug for ResolvedIsland {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ResolvedIsland")
			.field("component_path", &self.component_path)
			.finish_non_exhaustive()
	}
}

/// Resolves a component's loader into an implementation and path tag.
///
/// Default branch: the produced module must carry a `default` export,
/// else resolution fails with [`IslandError::MissingDefaultExport`]
/// naming the component. Named branch: the selector picks the
/// implementation; no default-export requirement applies, but an empty
/// selection fails with [`IslandError::MissingNamedExport`].
pub async fn resolve(component: &str, loader: &ComponentLoader) -> IslandResult<ResolvedIsland> {
	match loader {
		ComponentLoader::Default(load) => {
			let module = load().await?;
			let implementation = module
				.default_export()
				.ok_or_else(|| IslandError::MissingDefaultExport(component.to_string()))?;
			Ok(ResolvedIsland {
				implementation,
				component_path: module.component_path().map(str::to_string),
			})
		}
		ComponentLoader::Named {
			module: load,
			component: select,
		} => {
			let module = load().await?;
			let implementation = select(&module)
				.ok_or_else(|| IslandError::MissingNamedExport(component.to_string()))?;
			Ok(ResolvedIsland {
				implementation,
				component_path: module.component_path().map(str::to_string),
			})
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::executor::block_on;

	#[test]
	fn default_loader_without_default_export_fails_with_guidance() {
		let loader = ComponentLoader::from_module(Module::new().export("Counter", 1u8));
		let err = block_on(resolve("counter", &loader)).unwrap_err();
		assert!(matches!(err, IslandError::MissingDefaultExport(name) if name == "counter"));
	}

	#[test]
	fn default_loader_with_default_export_resolves_that_value() {
		let loader = ComponentLoader::from_module(Module::with_default("impl".to_string()));
		let resolved = block_on(resolve("counter", &loader)).expect("resolves");
		let value = resolved.implementation.downcast_ref::<String>().unwrap();
		assert_eq!(value, "impl");
		assert_eq!(resolved.component_path, None);
	}

	#[test]
	fn named_loader_selects_without_default_export_requirement() {
		let loader = ComponentLoader::named_export(
			|| async { Ok(Module::new().export("Widget", 42u32).with_component_path("src/widget.rs")) },
			|module| module.get("Widget"),
		);
		let resolved = block_on(resolve("widget", &loader)).expect("resolves");
		assert_eq!(*resolved.implementation.downcast_ref::<u32>().unwrap(), 42);
		assert_eq!(resolved.component_path.as_deref(), Some("src/widget.rs"));
	}

	#[test]
	fn named_loader_with_empty_selection_fails() {
		let loader = ComponentLoader::named_export(
			|| async { Ok(Module::new()) },
			|module| module.get("Missing"),
		);
		let err = block_on(resolve("widget", &loader)).unwrap_err();
		assert!(matches!(err, IslandError::MissingNamedExport(name) if name == "widget"));
	}

	#[test]
	fn path_tag_is_surfaced_from_default_branch() {
		let loader =
			ComponentLoader::from_module(Module::with_default(0u8).with_component_path("src/a.tsx"));
		let resolved = block_on(resolve("a", &loader)).expect("resolves");
		assert_eq!(resolved.component_path.as_deref(), Some("src/a.tsx"));
	}

	#[test]
	fn loader_failure_propagates() {
		let loader = ComponentLoader::default_export(|| async {
			Err(IslandError::Loader {
				component: "broken".into(),
				message: "module fetch failed".into(),
			})
		});
		let err = block_on(resolve("broken", &loader)).unwrap_err();
		assert!(matches!(err, IslandError::Loader { .. }));
	}
}
