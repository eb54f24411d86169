// src/health/status.rs
use serde::Deserialize;
use std::fmt;

/// Monitoring severity. The ordinal is the first token of the output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Warn,
    Crit,
    Unknown,
}

impl Severity {
    pub fn ordinal(self) -> u8 {
        match self {
            Severity::Ok => 0,
            Severity::Warn => 1,
            Severity::Crit => 2,
            Severity::Unknown => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warn => "WARN",
            Severity::Crit => "CRIT",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

/// Overall cluster status as reported by `/_cluster/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ClusterStatus {
    Green,
    Yellow,
    Red,
    Unrecognized(String),
}

impl From<String> for ClusterStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "green" => ClusterStatus::Green,
            "yellow" => ClusterStatus::Yellow,
            "red" => ClusterStatus::Red,
            _ => ClusterStatus::Unrecognized(value),
        }
    }
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterStatus::Green => f.write_str("green"),
            ClusterStatus::Yellow => f.write_str("yellow"),
            ClusterStatus::Red => f.write_str("red"),
            ClusterStatus::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

impl ClusterStatus {
    pub fn severity(&self) -> Severity {
        match self {
            ClusterStatus::Green => Severity::Ok,
            ClusterStatus::Yellow => Severity::Warn,
            ClusterStatus::Red => Severity::Crit,
            ClusterStatus::Unrecognized(_) => Severity::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthPayload {
    pub cluster_name: String,
    pub status: ClusterStatus,
}

impl HealthPayload {
    pub fn severity(&self) -> Severity {
        self.status.severity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> serde_json::Result<HealthPayload> {
        serde_json::from_str(body)
    }

    #[test]
    fn test_known_statuses_classify() {
        let cases = [
            ("green", 0, "OK"),
            ("yellow", 1, "WARN"),
            ("red", 2, "CRIT"),
        ];

        for (status, ordinal, label) in cases {
            let body = format!(r#"{{"cluster_name":"prod","status":"{}"}}"#, status);
            let severity = parse(&body).unwrap().severity();
            assert_eq!(severity.ordinal(), ordinal, "status {}", status);
            assert_eq!(severity.label(), label, "status {}", status);
        }
    }

    #[test]
    fn test_unrecognized_status_is_unknown() {
        let payload = parse(r#"{"cluster_name":"prod","status":"purple"}"#).unwrap();

        assert_eq!(
            payload.status,
            ClusterStatus::Unrecognized("purple".to_string())
        );
        assert_eq!(payload.severity(), Severity::Unknown);
        assert_eq!(payload.status.to_string(), "purple");
    }

    #[test]
    fn test_status_match_is_case_sensitive() {
        let payload = parse(r#"{"cluster_name":"prod","status":"GREEN"}"#).unwrap();
        assert_eq!(payload.severity(), Severity::Unknown);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let payload = parse(
            r#"{"cluster_name":"prod","status":"yellow","number_of_nodes":3,"timed_out":false}"#,
        )
        .unwrap();
        assert_eq!(payload.cluster_name, "prod");
        assert_eq!(payload.status, ClusterStatus::Yellow);
    }

    #[test]
    fn test_missing_fields_fail() {
        assert!(parse(r#"{"status":"green"}"#).is_err());
        assert!(parse(r#"{"cluster_name":"prod"}"#).is_err());
        assert!(parse(r#"{"cluster_name":"prod","status":1}"#).is_err());
    }
}
