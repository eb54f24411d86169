// src/config/models.rs
use super::cli::Cli;

pub const DEFAULT_PORT: u16 = 9200;
pub const HEALTH_PATH: &str = "/_cluster/health";

/// Settings for a single probe run. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub service: String,
    pub host: String,
    pub port: u16,
    /// Resolver server; `None` means system resolution.
    pub dns: Option<String>,
}

impl ProbeConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        Self {
            service: default_service_name(&host),
            host,
            port,
            dns: None,
        }
    }

    /// An empty name keeps the `Elasticsearch_<host>` default.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        let service = service.into();
        if !service.is_empty() {
            self.service = service;
        }
        self
    }

    /// An empty address keeps system resolution.
    pub fn with_dns(mut self, dns: impl Into<String>) -> Self {
        let dns = dns.into();
        self.dns = if dns.is_empty() { None } else { Some(dns) };
        self
    }

    pub fn health_url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, HEALTH_PATH)
    }
}

impl From<Cli> for ProbeConfig {
    fn from(cli: Cli) -> Self {
        ProbeConfig::new(cli.host, cli.port)
            .with_service(cli.service)
            .with_dns(cli.dns)
    }
}

pub fn default_service_name(host: &str) -> String {
    format!("Elasticsearch_{}", host)
}
