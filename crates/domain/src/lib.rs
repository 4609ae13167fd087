//! DreamTrue Domain - Core business types
//!
//! This crate defines the domain model for the DreamTrue client core.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod brand;
pub mod chat;
pub mod error;
pub mod id;
pub mod phone;
pub mod report;
pub mod settings;
pub mod upload;
pub mod user;

pub use auth::{AuthState, MfaChallenge, RESEND_COOLDOWN_TICKS, ResendCooldown, VerificationId};
pub use brand::{Brand, BrandStatus};
pub use chat::{ChatMessage, ChatRole};
pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use phone::PhoneNumber;
pub use report::{CompanyData, Report, ReportStatus};
pub use settings::{ThemeMode, UserSettings};
pub use upload::{FileCategory, UploadStatus, UploadedFile};
pub use user::{ProfilePatch, Role, User};
