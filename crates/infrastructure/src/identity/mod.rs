//! Identity provider adapters.

mod automation;
mod dev_provider;
mod http_provider;

pub use automation::NoopAutomationGate;
pub use dev_provider::DevIdentityProvider;
pub use http_provider::{HttpIdentityProvider, IdentityEndpoints};
