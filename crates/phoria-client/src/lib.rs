//! Phoria Client - browser island runtime.
//!
//! Mounts islands found in the document, on the schedule their
//! `client:*` directives declare:
//!
//! - [`boot`]: the [`IslandRuntime`](boot::IslandRuntime) bundle and the
//!   idempotent document scan
//! - [`island`]: per-element dispatch from attributes to a scheduled
//!   mount
//! - [`directive`]: the ordered `client:only`/`load`/`idle`/`visible`/
//!   `media` attribute table
//! - [`scheduler`]: directive triggers over a swappable
//!   [`TriggerHost`](scheduler::TriggerHost), plus the per-element
//!   mount-once guard
//! - [`service`]: the per-framework [`CsrService`](service::CsrService)
//!   mount seam and its registry
//! - [`dom`]: the host element wrapper, backed by `web_sys` on WASM and
//!   an in-memory double elsewhere
//!
//! Component and framework registries come from `phoria-core`; this
//! crate adds only what the browser side needs on top of them.

pub mod boot;
pub mod directive;
pub mod dom;
pub mod island;
pub mod scheduler;
pub mod service;

pub use boot::{ISLAND_TAG, IslandRuntime};
pub use directive::Directive;
pub use dom::{CONNECTED_ATTR, HostElement};
pub use island::{COMPONENT_ATTR, PROPS_ATTR, connect};
pub use scheduler::{MountGuard, TriggerHost, schedule};
pub use service::{CsrService, CsrServiceRegistry, MountMode};

#[cfg(target_arch = "wasm32")]
pub use scheduler::BrowserTriggers;
#[cfg(not(target_arch = "wasm32"))]
pub use scheduler::FakeTriggers;
