#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod loader;
pub mod profile_service;
pub mod progress;
pub mod session;
pub mod toggle;

pub use tracker_core::Clock;

pub use app_services::AppServices;
pub use error::{LoadError, MutationError, ProfileError, SessionError};
pub use loader::{LoadedSession, SessionLoader};
pub use profile_service::ProfileService;
pub use progress::{ProgressSnapshot, ProgressTracker, ReportCache};
pub use session::SessionContext;
pub use toggle::{ToggleAction, toggle_problem};
