// ────────────────────────────────
// src/client/connector.rs
// Connect step for the hyper client. Optionally swaps the host for an
// address from a custom resolver before opening the TCP stream.
// ────────────────────────────────
use crate::dns::{Resolve, ResolveError};
use futures::future::BoxFuture;
use hyper::Uri;
use std::fmt;
use std::sync::Arc;
use tokio::net::TcpStream;
use tower::Service;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum DialError {
    #[error("Error parsing address '{addr}': must have format <host>:<port>")]
    AddressFormat { addr: String },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("tcp connect to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Default)]
pub struct Dialer {
    resolver: Option<Arc<dyn Resolve>>,
}

impl fmt::Debug for Dialer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialer")
            .field("resolver", &self.resolver.as_ref().map(|r| r.server()))
            .finish()
    }
}

impl Dialer {
    pub fn new(resolver: Option<Arc<dyn Resolve>>) -> Self {
        Self { resolver }
    }

    /// Connects to a `host:port` address. With a resolver configured the
    /// host part is replaced by the resolved address first.
    pub async fn dial(&self, addr: &str) -> Result<TcpStream, DialError> {
        let target = match &self.resolver {
            Some(resolver) => {
                let (host, port) = split_host_port(addr)?;
                let ip = resolver.resolve(host).await?;
                format!("{}:{}", ip, port)
            }
            None => addr.to_string(),
        };

        debug!("Connecting to {}", target);

        TcpStream::connect(target.as_str())
            .await
            .map_err(|source| DialError::Connect {
                addr: target,
                source,
            })
    }
}

fn split_host_port(addr: &str) -> Result<(&str, &str), DialError> {
    let mut parts = addr.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(host), Some(port), None) => Ok((host, port)),
        _ => Err(DialError::AddressFormat {
            addr: addr.to_string(),
        }),
    }
}

fn authority(uri: &Uri) -> Result<String, DialError> {
    let host = uri.host().ok_or_else(|| DialError::AddressFormat {
        addr: uri.to_string(),
    })?;
    let port = uri.port_u16().unwrap_or(80);
    Ok(format!("{}:{}", host, port))
}

impl Service<Uri> for Dialer {
    type Response = TcpStream;
    type Error = DialError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, uri: Uri) -> Self::Future {
        let dialer = self.clone();
        Box::pin(async move {
            let addr = authority(&uri)?;
            dialer.dial(&addr).await
        })
    }
}
