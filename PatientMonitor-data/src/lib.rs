// Patient Monitor Data
// This crate owns the synthetic patient table and its session-scoped storage

// Storage models
pub mod models;

// Deterministic synthetic data generation
pub mod generator;

// Session repository
pub mod repository;
