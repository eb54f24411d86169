// src/health/mod.rs
mod checker;
mod report;
mod status;

pub use checker::{HealthProbe, ProbeError};
pub use report::ProbeReport;
pub use status::{ClusterStatus, HealthPayload, Severity};
