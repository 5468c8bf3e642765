//! Browser-backed trigger host.
//!
//! Backs the trigger primitives with the real platform APIs:
//! `requestIdleCallback` (with a `setTimeout` fallback),
//! `IntersectionObserver`, `matchMedia` and `setTimeout`. Every closure
//! handed to the platform is intentionally leaked with
//! `Closure::forget` - each trigger fires at most once per island, so
//! the leak is bounded by the number of islands on the page.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use phoria_core::{IslandError, IslandResult};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::dom::HostElement;
use crate::scheduler::{IDLE_FALLBACK_MS, TriggerCallback, TriggerHost};

/// [`TriggerHost`] over the browser's scheduling primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTriggers;

impl BrowserTriggers {
	/// Creates the browser trigger host.
	pub fn new() -> Self {
		Self
	}

	fn window() -> Option<web_sys::Window> {
		web_sys::window()
	}

	fn set_timeout(cb: TriggerCallback, timeout_ms: u32) {
		let Some(window) = Self::window() else {
			return;
		};
		let closure = Closure::once(cb);
		if window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				closure.as_ref().unchecked_ref(),
				timeout_ms as i32,
			)
			.is_ok()
		{
			closure.forget();
		}
	}
}

impl TriggerHost for BrowserTriggers {
	fn invoke_now(&self, cb: TriggerCallback) {
		cb();
	}

	fn on_idle(&self, timeout_ms: Option<u32>, cb: TriggerCallback) {
		let Some(window) = Self::window() else {
			return;
		};
		let has_idle = js_sys::Reflect::has(&window, &JsValue::from_str("requestIdleCallback"))
			.unwrap_or(false);
		if !has_idle {
			Self::set_timeout(cb, IDLE_FALLBACK_MS);
			return;
		}

		let pending: Rc<RefCell<Option<TriggerCallback>>> = Rc::new(RefCell::new(Some(cb)));
		let closure = {
			let pending = pending.clone();
			Closure::<dyn FnMut()>::new(move || {
				if let Some(cb) = pending.borrow_mut().take() {
					cb();
				}
			})
		};
		let installed = match timeout_ms {
			Some(timeout) => {
				let options = web_sys::IdleRequestOptions::new();
				options.set_timeout(timeout);
				window.request_idle_callback_with_options(
					closure.as_ref().unchecked_ref(),
					&options,
				)
			}
			None => window.request_idle_callback(closure.as_ref().unchecked_ref()),
		};
		match installed {
			Ok(_) => closure.forget(),
			// Idle scheduling refused: fall back to the timer so the
			// island still hydrates.
			Err(_) => {
				if let Some(cb) = pending.borrow_mut().take() {
					Self::set_timeout(cb, IDLE_FALLBACK_MS);
				}
			}
		}
	}

	fn on_visible(&self, element: &HostElement, root_margin: Option<&str>, cb: TriggerCallback) {
		let pending: Rc<RefCell<Option<TriggerCallback>>> = Rc::new(RefCell::new(Some(cb)));

		let callback = {
			let pending = pending.clone();
			Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
				move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
					let intersecting = entries.iter().any(|entry| {
						entry
							.dyn_ref::<web_sys::IntersectionObserverEntry>()
							.is_some_and(|entry| entry.is_intersecting())
					});
					if !intersecting {
						return;
					}
					// Disconnect before invoking: the callback must not be
					// reachable from later intersections.
					observer.disconnect();
					if let Some(cb) = pending.borrow_mut().take() {
						cb();
					}
				},
			)
		};

		let options = web_sys::IntersectionObserverInit::new();
		if let Some(margin) = root_margin {
			options.set_root_margin(margin);
		}
		match web_sys::IntersectionObserver::new_with_options(
			callback.as_ref().unchecked_ref(),
			&options,
		) {
			Ok(observer) => {
				observer.observe(element.element());
				callback.forget();
			}
			Err(err) => {
				web_sys::console::error_2(
					&JsValue::from_str("[phoria] failed to create intersection observer"),
					&err,
				);
			}
		}
	}

	fn on_media(&self, query: &str, cb: TriggerCallback) -> IslandResult<()> {
		let window = Self::window().ok_or_else(|| IslandError::InvalidMediaQuery {
			query: query.to_string(),
			message: "no window available".to_string(),
		})?;
		let list = window
			.match_media(query)
			.map_err(|err| IslandError::InvalidMediaQuery {
				query: query.to_string(),
				message: format!("{err:?}"),
			})?
			.ok_or_else(|| IslandError::InvalidMediaQuery {
				query: query.to_string(),
				message: "matchMedia returned nothing".to_string(),
			})?;

		if list.matches() {
			cb();
			return Ok(());
		}

		let pending: Rc<RefCell<Option<TriggerCallback>>> = Rc::new(RefCell::new(Some(cb)));
		let listener = {
			let pending = pending.clone();
			let list = list.clone();
			Closure::<dyn FnMut(web_sys::MediaQueryListEvent)>::new(
				move |event: web_sys::MediaQueryListEvent| {
					if !event.matches() {
						return;
					}
					list.set_onchange(None);
					if let Some(cb) = pending.borrow_mut().take() {
						cb();
					}
				},
			)
		};
		list.set_onchange(Some(listener.as_ref().unchecked_ref()));
		listener.forget();
		Ok(())
	}

	fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
		wasm_bindgen_futures::spawn_local(task);
	}
}
