//! Per-framework SSR service registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use phoria_core::{FrameworkRegistry, IslandError, IslandResult};

use crate::service::SsrService;

/// Maps framework names to their SSR render services.
///
/// At most one service per framework; a later registration overwrites
/// the earlier one (logged, not an error - mirroring component
/// registration). Both registration and lookup reject framework names
/// that were never registered: an SSR service miss must abort the
/// request rather than degrade silently.
pub struct SsrServiceRegistry {
    frameworks: Arc<FrameworkRegistry>,
    services: RwLock<HashMap<String, Arc<dyn SsrService>>>,
}

impl SsrServiceRegistry {
    /// Creates a registry validating against the given framework registry.
    pub fn new(frameworks: Arc<FrameworkRegistry>) -> Self {
        Self {
            frameworks,
            services: RwLock::new(HashMap::new()),
        }
    }

    /// The framework registry this registry validates against.
    pub fn frameworks(&self) -> &Arc<FrameworkRegistry> {
        &self.frameworks
    }

    /// Registers the render service for a framework, returning the
    /// canonical framework name.
    ///
    /// Fails with [`IslandError::FrameworkNotRegistered`] when the
    /// framework name was never registered.
    pub fn register(
        &self,
        framework: &str,
        service: Arc<dyn SsrService>,
    ) -> IslandResult<String> {
        let canonical = self
            .frameworks
            .get(framework)
            .ok_or_else(|| IslandError::FrameworkNotRegistered(framework.to_string()))?;
        if self.services.write().insert(canonical.clone(), service).is_some() {
            tracing::warn!(framework = %canonical, "SSR service re-registered, previous service replaced");
        }
        Ok(canonical)
    }

    /// Looks up the render service for a framework.
    ///
    /// Distinguishes the two failure modes: an unregistered framework
    /// name is a configuration bug
    /// ([`IslandError::FrameworkNotRegistered`]); a registered framework
    /// without a service fails with [`IslandError::SsrServiceNotFound`].
    pub fn get(&self, framework: &str) -> IslandResult<Arc<dyn SsrService>> {
        let canonical = self
            .frameworks
            .get(framework)
            .ok_or_else(|| IslandError::FrameworkNotRegistered(framework.to_string()))?;
        self.services
            .read()
            .get(&canonical)
            .cloned()
            .ok_or(IslandError::SsrServiceNotFound(canonical))
    }
}

impl std::fmt::Debug for SsrServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsrServiceRegistry")
            .field("services", &self.services.read().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{RenderBody, RenderOptions, RenderedIsland, SsrService};
    use phoria_core::{ComponentEntry, Props};

    struct NullService;

    #[async_trait::async_trait]
    impl SsrService for NullService {
        async fn render(
            &self,
            entry: &ComponentEntry,
            _props: Option<&Props>,
            _options: &RenderOptions,
        ) -> IslandResult<RenderedIsland> {
            Ok(RenderedIsland {
                framework: entry.framework.clone(),
                component_path: None,
                body: RenderBody::Markup(String::new()),
            })
        }
    }

    #[test]
    fn register_rejects_unknown_framework() {
        let registry = SsrServiceRegistry::new(Arc::new(FrameworkRegistry::new()));
        let err = registry.register("demo", Arc::new(NullService)).unwrap_err();
        assert!(matches!(err, IslandError::FrameworkNotRegistered(name) if name == "demo"));
    }

    #[test]
    fn lookup_distinguishes_unknown_framework_from_missing_service() {
        let frameworks = Arc::new(FrameworkRegistry::new());
        frameworks.register("demo");
        let registry = SsrServiceRegistry::new(frameworks);

        let err = registry.get("solid").err().unwrap();
        assert!(matches!(err, IslandError::FrameworkNotRegistered(_)));

        let err = registry.get("demo").err().unwrap();
        assert!(matches!(err, IslandError::SsrServiceNotFound(name) if name == "demo"));
    }

    #[test]
    fn register_canonicalizes_and_later_registration_wins() {
        let frameworks = Arc::new(FrameworkRegistry::new());
        frameworks.register("Demo");
        let registry = SsrServiceRegistry::new(frameworks);

        assert_eq!(registry.register("DEMO", Arc::new(NullService)).unwrap(), "demo");
        let first = registry.get("demo").unwrap();
        registry.register("demo", Arc::new(NullService)).unwrap();
        let second = registry.get("Demo").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
