pub mod dashboard;
pub mod health;
pub mod page;
pub mod patients;
pub mod session;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use dashboard::{
    get_dashboard, get_department_chart, get_filter_options, get_metrics, get_status_chart,
    get_vitals_chart,
};
pub use health::health_check;
pub use patients::get_patients;
pub use session::{end_session, get_session};
