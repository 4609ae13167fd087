//! DreamTrue Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer, plus the demo data the client shows while the
//! real backends are external.

pub mod adapters;
pub mod identity;
pub mod persistence;
pub mod sample;
pub mod uploads;

pub use adapters::SystemClock;
pub use identity::{DevIdentityProvider, HttpIdentityProvider, IdentityEndpoints, NoopAutomationGate};
pub use persistence::{FileSettingsRepository, InMemoryProfileRepository};
pub use sample::{analysis_stages, brand_by_id, demo_playbook_html, sample_brands};
pub use uploads::inspect_upload;
