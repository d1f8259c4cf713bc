pub mod args;
pub mod date;
pub mod endpoints;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod report;
pub mod timesheet;

pub use args::Args;
pub use error::{Result, TimesheetError};
pub use model::CommitRecord;
pub use timesheet::build_timesheet;
