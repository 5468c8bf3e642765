//! Directive scheduler.
//!
//! Decides *when* an island's mount callback runs. [`schedule`] installs
//! exactly one trigger for the element's parsed directive; every trigger
//! mechanism fires its callback at most once (the intersection observer
//! disconnects itself before invoking, the others are inherently
//! one-shot). On top of that, each island wraps its callback in a
//! [`MountGuard`] - the portable enforcement of "at most one mount
//! invocation per element", independent of trigger mechanics.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::LocalBoxFuture;
use phoria_core::IslandResult;

use crate::directive::Directive;
use crate::dom::HostElement;

/// Timer fallback when no idle-callback primitive is available.
pub const IDLE_FALLBACK_MS: u32 = 200;

/// One-shot trigger callback.
pub type TriggerCallback = Box<dyn FnOnce() + 'static>;

/// The scheduling primitives a directive trigger can be installed on.
///
/// The browser implementation backs these with `requestIdleCallback`,
/// `IntersectionObserver`, `matchMedia` and `setTimeout`; tests use a
/// recording fake.
pub trait TriggerHost {
	/// Runs the callback immediately (`client:load`, `client:only`).
	fn invoke_now(&self, cb: TriggerCallback);

	/// Schedules the callback on the idle primitive, with an optional
	/// millisecond timeout; falls back to a fixed
	/// [`IDLE_FALLBACK_MS`] timer when no idle primitive exists.
	fn on_idle(&self, timeout_ms: Option<u32>, cb: TriggerCallback);

	/// Fires the callback on the element's first viewport intersection,
	/// then stops observing.
	fn on_visible(&self, element: &HostElement, root_margin: Option<&str>, cb: TriggerCallback);

	/// Fires the callback when the media query currently matches or
	/// first transitions to matching.
	fn on_media(&self, query: &str, cb: TriggerCallback) -> IslandResult<()>;

	/// Drives an island's asynchronous resolve-and-mount task.
	fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Installs the trigger for a parsed directive.
///
/// Exactly one trigger is installed per call; `Only` and `Load` both
/// invoke immediately (the mount mode difference is bound into the
/// callback by the island).
pub fn schedule(
	directive: &Directive,
	triggers: &dyn TriggerHost,
	element: &HostElement,
	cb: TriggerCallback,
) -> IslandResult<()> {
	match directive {
		Directive::Only | Directive::Load => {
			triggers.invoke_now(cb);
			Ok(())
		}
		Directive::Idle { timeout_ms } => {
			triggers.on_idle(*timeout_ms, cb);
			Ok(())
		}
		Directive::Visible { root_margin } => {
			triggers.on_visible(element, root_margin.as_deref(), cb);
			Ok(())
		}
		Directive::Media { query } => triggers.on_media(query, cb),
	}
}

/// Per-element mount flag: `false -> true` exactly once.
#[derive(Debug, Clone, Default)]
pub struct MountGuard {
	mounted: Arc<AtomicBool>,
}

impl MountGuard {
	/// Creates an unclaimed guard.
	pub fn new() -> Self {
		Self::default()
	}

	/// Claims the mount. Returns `true` for the first caller only.
	pub fn claim(&self) -> bool {
		!self.mounted.swap(true, Ordering::SeqCst)
	}

	/// Whether the mount has been claimed.
	pub fn is_mounted(&self) -> bool {
		self.mounted.load(Ordering::SeqCst)
	}
}

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
pub use browser::BrowserTriggers;

#[cfg(not(target_arch = "wasm32"))]
mod fake;
#[cfg(not(target_arch = "wasm32"))]
pub use fake::FakeTriggers;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mount_guard_claims_exactly_once() {
		let guard = MountGuard::new();
		assert!(!guard.is_mounted());
		assert!(guard.claim());
		assert!(!guard.claim());
		assert!(guard.is_mounted());
	}

	#[test]
	fn load_and_only_invoke_immediately() {
		use std::cell::Cell;
		use std::rc::Rc;

		for directive in [Directive::Only, Directive::Load] {
			let triggers = FakeTriggers::new();
			let element = HostElement::with_attributes([]);
			let fired = Rc::new(Cell::new(false));
			let flag = fired.clone();
			schedule(&directive, &triggers, &element, Box::new(move || flag.set(true))).unwrap();
			assert!(fired.get(), "{directive:?} should fire synchronously");
		}
	}

	#[test]
	fn idle_waits_for_the_idle_primitive() {
		use std::cell::Cell;
		use std::rc::Rc;

		let triggers = FakeTriggers::new();
		let element = HostElement::with_attributes([]);
		let fired = Rc::new(Cell::new(false));
		let flag = fired.clone();
		schedule(
			&Directive::Idle { timeout_ms: Some(100) },
			&triggers,
			&element,
			Box::new(move || flag.set(true)),
		)
		.unwrap();

		assert!(!fired.get());
		assert_eq!(triggers.idle_count(), 1);
		triggers.fire_idle();
		assert!(fired.get());
	}

	#[test]
	fn visible_fires_once_and_stops_observing() {
		use std::cell::Cell;
		use std::rc::Rc;

		let triggers = FakeTriggers::new();
		let element = HostElement::with_attributes([]);
		let fires = Rc::new(Cell::new(0u32));
		let counter = fires.clone();
		schedule(
			&Directive::Visible {
				root_margin: Some("50px".to_string()),
			},
			&triggers,
			&element,
			Box::new(move || counter.set(counter.get() + 1)),
		)
		.unwrap();

		assert_eq!(triggers.last_root_margin().as_deref(), Some("50px"));
		assert_eq!(fires.get(), 0);
		triggers.fire_intersection();
		assert_eq!(fires.get(), 1);
		// Subsequent intersections: the observer already disconnected.
		triggers.fire_intersection();
		triggers.fire_intersection();
		assert_eq!(fires.get(), 1);
	}

	#[test]
	fn media_fires_on_match_transition_only() {
		use std::cell::Cell;
		use std::rc::Rc;

		let triggers = FakeTriggers::new();
		let element = HostElement::with_attributes([]);
		let fired = Rc::new(Cell::new(false));
		let flag = fired.clone();
		schedule(
			&Directive::Media {
				query: "(min-width: 600px)".to_string(),
			},
			&triggers,
			&element,
			Box::new(move || flag.set(true)),
		)
		.unwrap();

		assert_eq!(triggers.media_query().as_deref(), Some("(min-width: 600px)"));
		triggers.fire_media(false);
		assert!(!fired.get());
		triggers.fire_media(true);
		assert!(fired.get());
	}
}
