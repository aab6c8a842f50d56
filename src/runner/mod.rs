pub mod context;
pub use context::Context;

pub mod report;
pub use report::{CaseReport, Fault, Phase, RunReport, Status};

#[allow(clippy::module_inception)]
pub mod runner;
pub use runner::{RunConfig, Runner};

pub mod scope;
pub use scope::Scope;
