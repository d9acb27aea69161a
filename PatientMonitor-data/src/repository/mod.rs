// Repository module structure
pub mod errors;
mod session;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use session::{
    Session, SessionLookup, SessionRepositoryTrait, SessionSettings, SessionStats, SessionStore,
    DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL,
};

// Mock repository for both testing and when the mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub mod mock;
