//! DreamTrue Application - Session core
//!
//! The session state store, the auth flow controller, and the simulated
//! analysis/upload tracking, all expressed over port traits so the
//! infrastructure layer (or a test mock) supplies the outside world.

pub mod analysis;
pub mod auth;
pub mod error;
pub mod ports;
pub mod store;
pub mod uploads;

pub use analysis::{AnalysisProgress, AnalysisSimulation, AnalysisStage};
pub use auth::{AuthFlowController, EnrollmentFlow, SignInFlow, SignInOutcome};
pub use error::{AuthFlowError, AuthFlowResult};
pub use store::{Action, AppState, SessionStore, reduce};
pub use uploads::{PROCESS_PHASE_TICKS, UPLOAD_PHASE_TICKS, UploadQueue};
