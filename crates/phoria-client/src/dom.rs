//! Island host element.
//!
//! The runtime only ever needs a small slice of the DOM element surface:
//! attribute reads plus a marker write for scan idempotency. On WASM a
//! [`HostElement`] wraps a live `web_sys::Element`; on native targets it
//! is an in-memory double so the dispatch and scheduling logic stays
//! testable off-browser.

/// Marker attribute set once an element has been connected, so
/// re-running the document scan never re-dispatches an island.
pub const CONNECTED_ATTR: &str = "data-phoria-connected";

/// An island's host element.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct HostElement {
	element: web_sys::Element,
}

#[cfg(target_arch = "wasm32")]
impl HostElement {
	/// Wraps a DOM element.
	pub fn new(element: web_sys::Element) -> Self {
		Self { element }
	}

	/// The wrapped DOM element.
	pub fn element(&self) -> &web_sys::Element {
		&self.element
	}

	/// Reads an attribute value.
	pub fn attribute(&self, name: &str) -> Option<String> {
		self.element.get_attribute(name)
	}

	/// Whether the attribute is present (possibly with an empty value).
	pub fn has_attribute(&self, name: &str) -> bool {
		self.element.has_attribute(name)
	}

	/// Sets an attribute value.
	pub fn set_attribute(&self, name: &str, value: &str) {
		// Attribute names here are fixed runtime constants; a set failure
		// would mean a detached element and is not actionable.
		let _ = self.element.set_attribute(name, value);
	}

	/// The element's tag name, lowercased.
	pub fn tag(&self) -> String {
		self.element.tag_name().to_lowercase()
	}
}

/// In-memory host element double for non-WASM targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Default)]
pub struct HostElement {
	tag: String,
	attributes: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl HostElement {
	/// Creates an island element with the given attributes.
	pub fn with_attributes<'a>(attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		let map = attributes
			.into_iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		Self {
			tag: "phoria-island".to_string(),
			attributes: std::rc::Rc::new(std::cell::RefCell::new(map)),
		}
	}

	/// Reads an attribute value.
	pub fn attribute(&self, name: &str) -> Option<String> {
		self.attributes.borrow().get(name).cloned()
	}

	/// Whether the attribute is present (possibly with an empty value).
	pub fn has_attribute(&self, name: &str) -> bool {
		self.attributes.borrow().contains_key(name)
	}

	/// Sets an attribute value.
	pub fn set_attribute(&self, name: &str, value: &str) {
		self.attributes
			.borrow_mut()
			.insert(name.to_string(), value.to_string());
	}

	/// The element's tag name.
	pub fn tag(&self) -> String {
		self.tag.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn attribute_presence_is_distinct_from_value() {
		let host = HostElement::with_attributes([("component", "widget"), ("client:load", "")]);
		assert_eq!(host.attribute("component").as_deref(), Some("widget"));
		assert!(host.has_attribute("client:load"));
		assert_eq!(host.attribute("client:load").as_deref(), Some(""));
		assert!(!host.has_attribute("client:idle"));
	}

	#[test]
	fn connected_marker_round_trips() {
		let host = HostElement::with_attributes([]);
		assert!(!host.has_attribute(CONNECTED_ATTR));
		host.set_attribute(CONNECTED_ATTR, "");
		assert!(host.has_attribute(CONNECTED_ATTR));
	}
}
