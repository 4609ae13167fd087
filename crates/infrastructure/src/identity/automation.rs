//! Anti-automation gate stand-ins.

use async_trait::async_trait;
use dreamtrue_application::ports::{AutomationGate, AutomationProof, ProviderError};

/// Gate that issues a fixed proof without any user interaction.
///
/// Development and test environments mount this where production mounts
/// the real out-of-band challenge widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAutomationGate;

impl NoopAutomationGate {
    /// Creates the gate.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AutomationGate for NoopAutomationGate {
    async fn obtain_proof(&self) -> Result<AutomationProof, ProviderError> {
        Ok(AutomationProof("dev-automation-proof".to_string()))
    }
}
