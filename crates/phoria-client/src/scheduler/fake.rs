//! Recording trigger host for non-WASM targets.
//!
//! Lets tests install directive triggers and fire them deterministically:
//! intersections, idle deadlines and media transitions become explicit
//! method calls.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use phoria_core::IslandResult;

use crate::dom::HostElement;
use crate::scheduler::{TriggerCallback, TriggerHost};

#[derive(Default)]
struct FakeState {
	idle: Vec<TriggerCallback>,
	visible: Option<TriggerCallback>,
	last_root_margin: Option<String>,
	media: Option<TriggerCallback>,
	media_query: Option<String>,
}

/// Deterministic [`TriggerHost`] double.
#[derive(Clone, Default)]
pub struct FakeTriggers {
	state: Rc<RefCell<FakeState>>,
}

impl FakeTriggers {
	/// Creates an empty trigger host.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of idle callbacks currently scheduled.
	pub fn idle_count(&self) -> usize {
		self.state.borrow().idle.len()
	}

	/// Fires all scheduled idle callbacks.
	pub fn fire_idle(&self) {
		let callbacks = std::mem::take(&mut self.state.borrow_mut().idle);
		for cb in callbacks {
			cb();
		}
	}

	/// The root margin of the last installed intersection observer.
	pub fn last_root_margin(&self) -> Option<String> {
		self.state.borrow().last_root_margin.clone()
	}

	/// Simulates a viewport intersection. The observer is one-shot: the
	/// callback is removed before it runs, so later intersections no-op.
	pub fn fire_intersection(&self) {
		let cb = self.state.borrow_mut().visible.take();
		if let Some(cb) = cb {
			cb();
		}
	}

	/// The query of the installed media trigger.
	pub fn media_query(&self) -> Option<String> {
		self.state.borrow().media_query.clone()
	}

	/// Simulates a media query evaluation; the callback fires only on a
	/// transition to matching.
	pub fn fire_media(&self, matches: bool) {
		if !matches {
			return;
		}
		let cb = self.state.borrow_mut().media.take();
		if let Some(cb) = cb {
			cb();
		}
	}
}

impl TriggerHost for FakeTriggers {
	fn invoke_now(&self, cb: TriggerCallback) {
		cb();
	}

	fn on_idle(&self, _timeout_ms: Option<u32>, cb: TriggerCallback) {
		self.state.borrow_mut().idle.push(cb);
	}

	fn on_visible(&self, _element: &HostElement, root_margin: Option<&str>, cb: TriggerCallback) {
		let mut state = self.state.borrow_mut();
		state.last_root_margin = root_margin.map(str::to_string);
		state.visible = Some(cb);
	}

	fn on_media(&self, query: &str, cb: TriggerCallback) -> IslandResult<()> {
		let mut state = self.state.borrow_mut();
		state.media_query = Some(query.to_string());
		state.media = Some(cb);
		Ok(())
	}

	fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
		futures::executor::block_on(task);
	}
}
