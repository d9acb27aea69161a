// Patient Monitor Domain
// Filtering, aggregation and presentation of a session's patient table

// Domain entities
pub mod entities;

// Services that implement business logic
pub mod services;

// Health checks and system status
pub mod health;

// Testing utilities - only available with mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;

// Re-export the data layer settings needed to build a service
pub use patient_monitor_data::generator::GeneratorSettings;
pub use patient_monitor_data::repository::SessionSettings;
