// Public entities for the patient monitor API
// Dashboard views are served as the domain types themselves; this module
// holds what exists only at the HTTP boundary.

// Error body shared by every endpoint
pub mod common;

// Query string parameters and their conversion to domain selections
pub mod query;

// Session endpoint payloads
pub mod session;
