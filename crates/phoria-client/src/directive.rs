//! Client hydration directives.
//!
//! A directive is a declarative attribute on an island's host element
//! selecting when hydration occurs. Detection is an ordered table of
//! (attribute, parser) pairs evaluated in fixed priority order with an
//! early return, so exactly one directive wins per element. `client:only`
//! has absolute priority and bypasses hydration entirely.

use phoria_core::{IslandError, IslandResult};

use crate::dom::HostElement;

/// `client:only` - skip hydration, always fresh-render.
pub const ONLY_ATTR: &str = "client:only";
/// `client:load` - hydrate immediately.
pub const LOAD_ATTR: &str = "client:load";
/// `client:idle[=ms]` - hydrate on idle callback, optional timeout.
pub const IDLE_ATTR: &str = "client:idle";
/// `client:visible[=root-margin]` - hydrate on first viewport intersection.
pub const VISIBLE_ATTR: &str = "client:visible";
/// `client:media=<query>` - hydrate when the media query matches.
pub const MEDIA_ATTR: &str = "client:media";

/// A parsed hydration trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
	/// Fresh render, no hydration, immediate.
	Only,
	/// Hydrate immediately.
	Load,
	/// Hydrate via the idle-callback primitive.
	Idle {
		/// Idle timeout in milliseconds, when the attribute carried one.
		timeout_ms: Option<u32>,
	},
	/// Hydrate on first viewport intersection.
	Visible {
		/// Intersection root margin, passed through verbatim.
		root_margin: Option<String>,
	},
	/// Hydrate when the media query matches.
	Media {
		/// The media query; required.
		query: String,
	},
}

impl Directive {
	/// Scans the host element for a directive, in priority order.
	///
	/// Fails with [`IslandError::MissingMediaQuery`] when `client:media`
	/// is present without a query value, and
	/// [`IslandError::NoDirectiveFound`] when no directive attribute is
	/// present at all. `component` only labels the errors.
	pub fn detect(host: &HostElement, component: &str) -> IslandResult<Self> {
		if host.has_attribute(ONLY_ATTR) {
			return Ok(Self::Only);
		}
		if host.has_attribute(LOAD_ATTR) {
			return Ok(Self::Load);
		}
		if host.has_attribute(IDLE_ATTR) {
			let timeout_ms = host
				.attribute(IDLE_ATTR)
				.filter(|value| !value.is_empty())
				.and_then(|value| value.parse().ok());
			return Ok(Self::Idle { timeout_ms });
		}
		if host.has_attribute(VISIBLE_ATTR) {
			let root_margin = host
				.attribute(VISIBLE_ATTR)
				.filter(|value| !value.is_empty());
			return Ok(Self::Visible { root_margin });
		}
		if host.has_attribute(MEDIA_ATTR) {
			let query = host
				.attribute(MEDIA_ATTR)
				.filter(|value| !value.trim().is_empty())
				.ok_or_else(|| IslandError::MissingMediaQuery(component.to_string()))?;
			return Ok(Self::Media { query });
		}
		Err(IslandError::NoDirectiveFound(component.to_string()))
	}

	/// Whether this directive bypasses hydration.
	pub fn is_only(&self) -> bool {
		matches!(self, Self::Only)
	}
}
