// src/health/report.rs
use super::checker::ProbeError;
use super::status::{HealthPayload, Severity};
use std::fmt;

/// The single result line handed to the monitoring supervisor.
///
/// `exit_status` tells whether the check itself ran (0) or could not be
/// carried out (1). Cluster health is carried by the severity only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub severity: Severity,
    pub service: String,
    pub message: String,
    exit_status: u8,
}

impl ProbeReport {
    pub fn from_payload(service: &str, host: &str, payload: &HealthPayload) -> Self {
        Self {
            severity: payload.severity(),
            service: service.to_string(),
            message: format!(
                "Elasticsearch cluster '{}' on {} has status '{}'",
                payload.cluster_name, host, payload.status
            ),
            exit_status: 0,
        }
    }

    pub fn from_error(service: &str, error: &ProbeError) -> Self {
        Self {
            severity: Severity::Crit,
            service: service.to_string(),
            message: error.to_string(),
            exit_status: 1,
        }
    }

    pub fn exit_status(&self) -> u8 {
        self.exit_status
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} - {}",
            self.severity.ordinal(),
            self.service,
            self.severity.label(),
            self.message
        )
    }
}
