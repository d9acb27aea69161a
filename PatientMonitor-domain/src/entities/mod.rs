// Domain entities and value objects
pub mod conversions;
pub mod filter;
pub mod patient;
pub mod session;
pub mod view;

// Re-export common types for easier imports
pub use filter::{AgeRange, DashboardQuery, PatientFilter, SortColumn, SortDirection, TableQuery};
pub use patient::{Department, Gender, ParseLabelError, Patient, PatientStatus, VitalSign};
pub use session::{SessionOverview, SessionTable};
pub use view::{
    AppliedFilter, BoxGroup, BoxPoint, ColumnKind, DashboardSummary, DashboardView, DeltaPolarity,
    DepartmentBar, DepartmentChart, FilterOptions, FiveNumberSummary, Metric, PageInfo,
    PatientTable, PieSlice, StatusChart, TableColumn, VitalSignOption, VitalsChart,
};
