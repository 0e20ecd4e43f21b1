//! The shift matrix: roster template parsing, dynamic date × shift
//! columns, entry projection and payroll mark detection.

pub mod builder;
pub mod classifier;
pub mod columns;
pub mod headers;
pub mod layout;
pub mod payroll;
pub mod projector;
pub mod styles;
pub mod template;

pub use builder::rebuild;
pub use classifier::{ColorRole, classify};
pub use columns::{ColumnMap, DateRange};
pub use headers::{ColumnMeta, read_column_meta};
pub use payroll::{PayrollScan, scan_payroll_marks};
pub use projector::{ProjectionReport, project};
pub use template::{is_team_row, parse_template};
