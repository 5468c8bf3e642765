//! Client island dispatch.
//!
//! [`connect`] is the per-element boundary: it reads the host element's
//! attributes, resolves the component and its mount service, parses the
//! directive, and installs exactly one trigger whose callback performs
//! the mount. `client:only` mounts fresh immediately; every other
//! directive hydrates existing markup when its trigger fires. Failures
//! never cross the element boundary upward; callers log them and move
//! to the next island, so one broken island cannot take down the page.

use std::rc::Rc;
use std::sync::Arc;

use phoria_core::{ComponentEntry, ComponentRegistry, IslandError, IslandResult, Props, parse_props};

use crate::directive::Directive;
use crate::dom::HostElement;
use crate::scheduler::{self, MountGuard, TriggerHost};
use crate::service::{CsrService, CsrServiceRegistry, MountMode};

/// Attribute naming the registered component to mount.
pub const COMPONENT_ATTR: &str = "component";
/// Attribute carrying the island's JSON props object.
pub const PROPS_ATTR: &str = "props";

/// Connects one island element: resolves its component, service and
/// directive, then installs the mount trigger.
///
/// Returns the element's [`MountGuard`] so callers can observe whether
/// the mount has been claimed. Resolution failures (missing `component`
/// attribute, unknown component, missing mount service, malformed props,
/// no directive) are returned without touching the element.
pub fn connect(
	host: &HostElement,
	components: &ComponentRegistry,
	services: &CsrServiceRegistry,
	triggers: Rc<dyn TriggerHost>,
) -> IslandResult<MountGuard> {
	let component = host
		.attribute(COMPONENT_ATTR)
		.filter(|value| !value.trim().is_empty())
		.ok_or(IslandError::MissingComponentAttribute)?;
	let entry = components
		.get(&component)
		.ok_or_else(|| IslandError::ComponentNotFound(component.clone()))?;
	let service = services.get(&entry.framework)?;
	let props = match host.attribute(PROPS_ATTR) {
		Some(raw) => parse_props(raw.as_bytes())?,
		None => None,
	};

	let directive = Directive::detect(host, &entry.name)?;
	let mode = if directive.is_only() {
		MountMode::Render
	} else {
		MountMode::Hydrate
	};

	let guard = MountGuard::new();
	let cb = {
		let guard = guard.clone();
		let host = host.clone();
		let spawner = triggers.clone();
		Box::new(move || {
			// The trigger mechanisms are each one-shot, but the guard is
			// what the mount-once contract actually rests on.
			if !guard.claim() {
				return;
			}
			spawner.spawn(Box::pin(async move {
				mount(&host, &entry, service, props, mode).await;
			}));
		})
	};
	scheduler::schedule(&directive, triggers.as_ref(), host, cb)?;
	Ok(guard)
}

/// Resolves the entry's loader and hands the implementation to the
/// framework's mount service. Errors are reported, not propagated; by
/// this point the trigger has fired and there is no caller to return to.
async fn mount(
	host: &HostElement,
	entry: &Arc<ComponentEntry>,
	service: Arc<dyn CsrService>,
	props: Option<Props>,
	mode: MountMode,
) {
	match entry.resolve().await {
		Ok(island) => {
			if let Err(err) = service.mount(host, &island, entry, props.as_ref(), mode) {
				report(Some(&entry.name), &err);
			}
		}
		Err(err) => report(Some(&entry.name), &err),
	}
}

/// Reports an island failure without unwinding.
#[cfg(target_arch = "wasm32")]
pub(crate) fn report(component: Option<&str>, err: &IslandError) {
	let label = component.unwrap_or("<unknown>");
	web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(&format!(
		"[phoria] island '{label}' failed: {err}"
	)));
}

/// Reports an island failure without unwinding.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn report(component: Option<&str>, err: &IslandError) {
	tracing::warn!(
		component = component.unwrap_or("<unknown>"),
		kind = err.kind().as_str(),
		error = %err,
		"island failed"
	);
}
