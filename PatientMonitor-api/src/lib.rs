// patient_monitor_api lib.rs
//
// HTTP surface of the patient monitor: router, handlers, session middleware,
// public response entities, OpenAPI document and configuration.

pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
