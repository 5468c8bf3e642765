//! Server island entity.
//!
//! One [`ServerIsland`] exists per inbound render call. Construction
//! performs the routing lookups and props validation; [`render`]
//! performs the actual render. The split lets a calling layer interpose
//! middleware between "found the target" and "produced the output". An
//! island carries no state across requests.
//!
//! [`render`]: ServerIsland::render

use std::sync::Arc;

use phoria_core::{ComponentEntry, ComponentRegistry, IslandError, IslandResult, Props, parse_props};

use crate::registry::SsrServiceRegistry;
use crate::service::{RenderOptions, RenderedIsland, SsrService};

/// One inbound render call: resolved component entry, validated props,
/// and the SSR service that will render them.
pub struct ServerIsland {
    entry: Arc<ComponentEntry>,
    props: Option<Props>,
    service: Arc<dyn SsrService>,
}

impl ServerIsland {
    /// Resolves a render request into an island.
    ///
    /// Fails with [`IslandError::MissingComponent`] when no component
    /// name was supplied, [`IslandError::ComponentNotFound`] when the
    /// name resolves to nothing, the service registry's errors when the
    /// component's framework has no render service, and
    /// [`IslandError::InvalidProps`] when the body is neither
    /// absent/null nor a JSON object. No render is attempted on any of
    /// these paths.
    pub fn resolve(
        components: &ComponentRegistry,
        services: &SsrServiceRegistry,
        component: Option<&str>,
        body: &[u8],
    ) -> IslandResult<Self> {
        let name = match component {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(IslandError::MissingComponent),
        };
        let entry = components
            .get(name)
            .ok_or_else(|| IslandError::ComponentNotFound(name.to_string()))?;
        let service = services.get(&entry.framework)?;
        let props = parse_props(body)?;

        Ok(Self {
            entry,
            props,
            service,
        })
    }

    /// The resolved component entry.
    pub fn entry(&self) -> &Arc<ComponentEntry> {
        &self.entry
    }

    /// The validated props, when the request carried any.
    pub fn props(&self) -> Option<&Props> {
        self.props.as_ref()
    }

    /// Invokes the SSR service.
    ///
    /// Framework adapters report their own rendering failures as
    /// [`IslandError::Render`]; anything else they raise is annotated
    /// here with the offending component and framework so the caller can
    /// identify the island that failed.
    pub async fn render(&self, options: &RenderOptions) -> IslandResult<RenderedIsland> {
        tracing::debug!(
            component = %self.entry.name,
            framework = %self.entry.framework,
            "rendering island"
        );
        self.service
            .render(&self.entry, self.props.as_ref(), options)
            .await
            .map_err(|err| match err {
                err @ (IslandError::Render { .. }
                | IslandError::Loader { .. }
                | IslandError::MissingDefaultExport(_)
                | IslandError::MissingNamedExport(_)) => err,
                other => IslandError::Render {
                    component: self.entry.name.clone(),
                    framework: self.entry.framework.clone(),
                    message: other.to_string(),
                },
            })
    }
}

impl std::fmt::Debug for ServerIsland {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerIsland")
            .field("component", &self.entry.name)
            .field("framework", &self.entry.framework)
            .field("has_props", &self.props.is_some())
            .finish_non_exhaustive()
    }
}
