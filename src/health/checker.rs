// src/health/checker.rs
use super::report::ProbeReport;
use super::status::HealthPayload;
use crate::client::{build_client, DialError, Dialer};
use crate::config::ProbeConfig;
use crate::dns::{HickoryResolver, Resolve, ResolveError};
use hyper::{Body, Client, StatusCode, Uri};
use std::sync::Arc;
use tracing::{debug, info, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("No host given, use -host <host>")]
    MissingHost,

    #[error("Error building health URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: hyper::http::uri::InvalidUri,
    },

    #[error("Error getting health from '{host}': Error parsing address '{addr}': must have format <host>:<port>")]
    AddressFormat { host: String, addr: String },

    #[error("Error getting health from '{host}': {source}")]
    Resolution {
        host: String,
        #[source]
        source: ResolveError,
    },

    #[error("Error getting health from '{host}': error trying to connect to {addr}: {source}")]
    Connection {
        host: String,
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error getting health from '{host}': {source}")]
    Transport {
        host: String,
        #[source]
        source: BoxError,
    },

    #[error("Error getting health from '{host}' - {status}")]
    HttpStatus { host: String, status: StatusCode },

    #[error("Error reading response body from health request to '{host}': {source}")]
    Body {
        host: String,
        #[source]
        source: hyper::Error,
    },

    #[error("Error parsing response body from health request to '{host}': {source}")]
    Decode {
        host: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ProbeError {
    fn from_dial(host: &str, err: DialError) -> Self {
        match err {
            DialError::AddressFormat { addr } => ProbeError::AddressFormat {
                host: host.to_string(),
                addr,
            },
            DialError::Resolve(source) => ProbeError::Resolution {
                host: host.to_string(),
                source,
            },
            DialError::Connect { addr, source } => ProbeError::Connection {
                host: host.to_string(),
                addr,
                source,
            },
        }
    }

    /// Connect failures come back from hyper with the dialer's error as
    /// their cause; unwrap it so callers see the typed variant.
    fn from_transport(host: &str, err: hyper::Error) -> Self {
        if !err.is_connect() {
            return ProbeError::Transport {
                host: host.to_string(),
                source: err.into(),
            };
        }

        let message = err.to_string();
        match err.into_cause().map(|cause| cause.downcast::<DialError>()) {
            Some(Ok(dial)) => Self::from_dial(host, *dial),
            Some(Err(source)) => ProbeError::Transport {
                host: host.to_string(),
                source,
            },
            None => ProbeError::Transport {
                host: host.to_string(),
                source: message.into(),
            },
        }
    }
}

/// Runs one cluster health check against the configured host.
pub struct HealthProbe {
    config: ProbeConfig,
    client: Client<Dialer, Body>,
    custom_resolution: bool,
}

impl HealthProbe {
    /// Uses a [`HickoryResolver`] when a resolver server is configured and
    /// system resolution otherwise.
    pub fn new(config: ProbeConfig) -> Self {
        let resolver = config
            .dns
            .as_deref()
            .map(|server| Arc::new(HickoryResolver::new(server)) as Arc<dyn Resolve>);
        Self::with_resolver(config, resolver)
    }

    pub fn with_resolver(config: ProbeConfig, resolver: Option<Arc<dyn Resolve>>) -> Self {
        let custom_resolution = resolver.is_some();
        Self {
            config,
            client: build_client(resolver),
            custom_resolution,
        }
    }

    pub fn uses_custom_resolver(&self) -> bool {
        self.custom_resolution
    }

    /// Fetches and decodes the health payload. The body is only read for
    /// a 200 response.
    pub async fn fetch(&self) -> Result<HealthPayload, ProbeError> {
        let host = self.config.host.as_str();
        if host.is_empty() {
            return Err(ProbeError::MissingHost);
        }

        let url = self.config.health_url();
        let uri: Uri = url
            .parse()
            .map_err(|source| ProbeError::InvalidUrl {
                url: url.clone(),
                source,
            })?;

        debug!(
            "Requesting {} (custom resolver: {})",
            url, self.custom_resolution
        );

        let response = self
            .client
            .get(uri)
            .await
            .map_err(|err| ProbeError::from_transport(host, err))?;

        let status = response.status();
        debug!("Health endpoint answered {}", status);

        if status != StatusCode::OK {
            return Err(ProbeError::HttpStatus {
                host: host.to_string(),
                status,
            });
        }

        let body = hyper::body::to_bytes(response.into_body())
            .await
            .map_err(|source| ProbeError::Body {
                host: host.to_string(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| ProbeError::Decode {
            host: host.to_string(),
            source,
        })
    }

    pub async fn run(&self) -> ProbeReport {
        match self.fetch().await {
            Ok(payload) => {
                let report =
                    ProbeReport::from_payload(&self.config.service, &self.config.host, &payload);
                info!(
                    "Cluster {} reported {} ({})",
                    payload.cluster_name,
                    payload.status,
                    report.severity.label()
                );
                report
            }
            Err(err) => {
                warn!("Health check for {} failed: {}", self.config.host, err);
                ProbeReport::from_error(&self.config.service, &err)
            }
        }
    }
}
