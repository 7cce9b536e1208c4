pub mod executable;
pub mod outcome;
pub mod params;
pub mod report;

pub use crate::domain::DomainError;
pub use executable::ExecutableSpec;
pub use outcome::{ProcessOutput, StageOutcome};
pub use params::{RunConfig, RunParams};
pub use report::RunReport;
