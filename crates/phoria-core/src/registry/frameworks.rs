//! Registry of known rendering-framework names.

use indexmap::IndexSet;
use parking_lot::RwLock;

/// Records the set of known rendering-framework names.
///
/// Names are opaque and case-insensitive; registration case-folds to
/// lowercase and is idempotent. The registry is process-lifetime-scoped:
/// initialized empty, never reset, no removal operation.
#[derive(Debug, Default)]
pub struct FrameworkRegistry {
	names: RwLock<IndexSet<String>>,
}

impl FrameworkRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a framework name, returning its canonical lowercase form.
	///
	/// Re-registering an already-known name is a no-op that still returns
	/// the canonical form.
	pub fn register(&self, name: &str) -> String {
		let canonical = name.to_lowercase();
		self.names.write().insert(canonical.clone());
		canonical
	}

	/// Looks up a framework, returning its canonical name when known.
	pub fn get(&self, name: &str) -> Option<String> {
		let canonical = name.to_lowercase();
		self.names.read().contains(&canonical).then_some(canonical)
	}

	/// Whether the framework name is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.names.read().contains(&name.to_lowercase())
	}

	/// All registered canonical names, in insertion order.
	pub fn list(&self) -> Vec<String> {
		self.names.read().iter().cloned().collect()
	}
}
