//! Authentication flows.
//!
//! This module provides:
//! - Explicit flow state for sign-in and MFA enrollment
//! - The controller that drives both against the injected ports

mod controller;
mod flow;

pub use controller::{AuthFlowController, SignInOutcome};
pub use flow::{EnrollmentFlow, SignInFlow};
