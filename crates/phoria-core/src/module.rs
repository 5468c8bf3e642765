//! Component module model.
//!
//! A [`Module`] is the value a component loader produces: a set of named
//! exports plus an optional build-time source-path tag. The runtime never
//! looks inside an export - framework adapters downcast the opaque
//! [`Implementation`] handle to whatever concrete type they registered.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Export name the default-loader branch requires.
pub const DEFAULT_EXPORT: &str = "default";

/// Opaque live component implementation handed to framework adapters.
pub type Implementation = Arc<dyn Any + Send + Sync>;

/// The value produced by a component loader.
#[derive(Clone, Default)]
pub struct Module {
	exports: HashMap<String, Implementation>,
	component_path: Option<String>,
}

impl Module {
	/// Creates an empty module with no exports.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a module whose `default` export is the given value.
	pub fn with_default<T: Any + Send + Sync>(value: T) -> Self {
		Self::new().export(DEFAULT_EXPORT, value)
	}

	/// Adds a named export.
	pub fn export<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
		self.exports.insert(name.into(), Arc::new(value));
		self
	}

	/// Tags this module with its source-relative component path.
	///
	/// The tag is written by the build step and surfaced verbatim as the
	/// `x-phoria-island-path` response header and in client diagnostics.
	pub fn with_component_path(mut self, path: impl Into<String>) -> Self {
		self.component_path = Some(path.into());
		self
	}

	/// Looks up an export by name.
	pub fn get(&self, name: &str) -> Option<Implementation> {
		self.exports.get(name).cloned()
	}

	/// The module's `default` export, if present.
	pub fn default_export(&self) -> Option<Implementation> {
		self.get(DEFAULT_EXPORT)
	}

	/// The build-time component path tag, if the module carries one.
	pub fn component_path(&self) -> Option<&str> {
		self.component_path.as_deref()
	}
}

impl std::fmt::Debug for Module {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut names: Vec<&str> = self.exports.keys().map(String::as_str).collect();
		names.sort_unstable();
		f.debug_struct("Module")
			.field("exports", &names)
			.field("component_path", &self.component_path)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_export_round_trips() {
		let module = Module::with_default("hello".to_string());
		let export = module.default_export().expect("default export");
		let value = export.downcast_ref::<String>().expect("string impl");
		assert_eq!(value, "hello");
	}

	#[test]
	fn component_path_tag_is_optional() {
		let untagged = Module::with_default(1u32);
		assert_eq!(untagged.component_path(), None);

		let tagged = Module::with_default(1u32).with_component_path("src/widget.tsx");
		assert_eq!(tagged.component_path(), Some("src/widget.tsx"));
	}

	#[test]
	fn named_exports_are_independent_of_default() {
		let module = Module::new().export("Counter", 7i64);
		assert!(module.default_export().is_none());
		let counter = module.get("Counter").expect("named export");
		assert_eq!(*counter.downcast_ref::<i64>().unwrap(), 7);
	}
}
