//! Health check payload.
//!
//! Lets an operator verify the render pipeline is wired correctly -
//! which mode the server runs in and which frameworks are registered -
//! without performing an actual render.

use phoria_core::FrameworkRegistry;
use serde::Serialize;

use crate::config::RuntimeMode;

/// `GET /hc` payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    /// The running mode.
    pub mode: RuntimeMode,
    /// Registered framework names, in registration order.
    pub frameworks: Vec<String>,
}

impl HealthStatus {
    /// Builds the current status from the framework registry.
    pub fn current(mode: RuntimeMode, frameworks: &FrameworkRegistry) -> Self {
        Self {
            mode,
            frameworks: frameworks.list(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_mode_and_registered_frameworks() {
        let registry = FrameworkRegistry::new();
        registry.register("React");
        registry.register("vue");

        let status = HealthStatus::current(RuntimeMode::Development, &registry);
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mode": "development",
                "frameworks": ["react", "vue"],
            })
        );
    }
}
