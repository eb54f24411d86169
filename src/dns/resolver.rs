// src/dns/resolver.rs
use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError as HickoryError, ResolveErrorKind};
use hickory_resolver::TokioAsyncResolver;
use std::io;
use std::net::{IpAddr, SocketAddr};
use tokio::net::lookup_host;
use tracing::debug;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Hostname lookup used in place of system resolution when dialing.
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve(&self, hostname: &str) -> Result<IpAddr, ResolveError>;

    /// Resolver address shown in diagnostics.
    fn server(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Can't resolve '{host}' on {server}: {source}")]
    Query {
        host: String,
        server: String,
        #[source]
        source: HickoryError,
    },

    #[error("Can't resolve '{host}' on {server}: No results")]
    NoResults { host: String, server: String },

    #[error("Can't resolve '{host}' on {server}: invalid resolver address: {source}")]
    InvalidServer {
        host: String,
        server: String,
        #[source]
        source: io::Error,
    },
}

/// Sends a single A query to one name server. Nothing is cached and
/// failures are not retried.
#[derive(Debug, Clone)]
pub struct HickoryResolver {
    server: String,
}

impl HickoryResolver {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
        }
    }

    /// Accepts `ip:port`, a bare IP or a resolver hostname. A missing port
    /// defaults to 53; hostnames are looked up once through the system.
    pub async fn server_addr(&self) -> io::Result<SocketAddr> {
        if let Ok(addr) = self.server.parse::<SocketAddr>() {
            return Ok(addr);
        }
        if let Ok(ip) = self.server.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, DEFAULT_DNS_PORT));
        }

        let target = if self.server.contains(':') {
            self.server.clone()
        } else {
            format!("{}:{}", self.server, DEFAULT_DNS_PORT)
        };

        let addrs: Vec<SocketAddr> = lookup_host(target.as_str()).await?.collect();
        addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "resolver host has no addresses")
            })
    }

    fn build(&self, addr: SocketAddr) -> TokioAsyncResolver {
        let mut config = ResolverConfig::new();
        config.add_name_server(NameServerConfig::new(addr, Protocol::Udp));

        let mut opts = ResolverOpts::default();
        opts.attempts = 0;
        opts.cache_size = 0;
        opts.use_hosts_file = false;

        TokioAsyncResolver::tokio(config, opts)
    }
}

#[async_trait]
impl Resolve for HickoryResolver {
    async fn resolve(&self, hostname: &str) -> Result<IpAddr, ResolveError> {
        let addr = self
            .server_addr()
            .await
            .map_err(|source| ResolveError::InvalidServer {
                host: hostname.to_string(),
                server: self.server.clone(),
                source,
            })?;

        debug!("Resolving {} via {}", hostname, addr);

        let fqdn = format!("{}.", hostname);
        let lookup = match self.build(addr).ipv4_lookup(fqdn.as_str()).await {
            Ok(lookup) => lookup,
            Err(err) if matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. }) => {
                return Err(ResolveError::NoResults {
                    host: hostname.to_string(),
                    server: self.server.clone(),
                });
            }
            Err(source) => {
                return Err(ResolveError::Query {
                    host: hostname.to_string(),
                    server: self.server.clone(),
                    source,
                });
            }
        };

        let ip = lookup
            .iter()
            .next()
            .map(|record| IpAddr::V4(record.0))
            .ok_or_else(|| ResolveError::NoResults {
                host: hostname.to_string(),
                server: self.server.clone(),
            })?;

        debug!("Resolved {} to {}", hostname, ip);
        Ok(ip)
    }

    fn server(&self) -> &str {
        &self.server
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::op::{Message, MessageType, ResponseCode};
    use hickory_resolver::proto::rr::rdata::A;
    use hickory_resolver::proto::rr::{RData, Record};
    use std::net::Ipv4Addr;
    use tokio::net::UdpSocket;

    /// Answers every A query on a local UDP port with `answer`, or with an
    /// empty NOERROR response when `answer` is `None`.
    async fn spawn_name_server(answer: Option<Ipv4Addr>) -> SocketAddr {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            loop {
                let (len, peer) = match socket.recv_from(&mut buf).await {
                    Ok(received) => received,
                    Err(_) => return,
                };
                let query = match Message::from_vec(&buf[..len]) {
                    Ok(query) => query,
                    Err(_) => continue,
                };

                let mut response = Message::new();
                response
                    .set_id(query.id())
                    .set_message_type(MessageType::Response)
                    .set_op_code(query.op_code())
                    .set_recursion_desired(query.recursion_desired())
                    .set_recursion_available(true)
                    .set_response_code(ResponseCode::NoError);
                response.add_queries(query.queries().to_vec());

                if let (Some(ip), Some(question)) = (answer, query.queries().first()) {
                    response.add_answer(Record::from_rdata(
                        question.name().clone(),
                        60,
                        RData::A(A(ip)),
                    ));
                }

                let bytes = response.to_vec().unwrap();
                let _ = socket.send_to(&bytes, peer).await;
            }
        });

        addr
    }

    #[tokio::test]
    async fn test_server_addr_with_port() {
        let resolver = HickoryResolver::new("10.0.0.2:5353");
        assert_eq!(
            resolver.server_addr().await.unwrap(),
            "10.0.0.2:5353".parse::<SocketAddr>().unwrap()
        );
    }

    #[tokio::test]
    async fn test_server_addr_defaults_port() {
        let resolver = HickoryResolver::new("10.0.0.2");
        assert_eq!(resolver.server_addr().await.unwrap().port(), DEFAULT_DNS_PORT);
    }

    #[tokio::test]
    async fn test_server_addr_accepts_hostname() {
        let resolver = HickoryResolver::new("localhost:5353");
        let addr = resolver.server_addr().await.unwrap();

        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 5353);
    }

    #[tokio::test]
    async fn test_invalid_server_fails_before_query() {
        let resolver = HickoryResolver::new("10.0.0.2:notaport");
        let err = resolver.resolve("es1").await.unwrap_err();

        assert!(matches!(err, ResolveError::InvalidServer { .. }));
        assert!(err
            .to_string()
            .starts_with("Can't resolve 'es1' on 10.0.0.2:notaport:"));
    }

    #[tokio::test]
    async fn test_resolve_returns_first_a_record() {
        let server = spawn_name_server(Some(Ipv4Addr::new(10, 9, 8, 7))).await;
        let resolver = HickoryResolver::new(server.to_string());

        let ip = resolver.resolve("es1").await.unwrap();

        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(10, 9, 8, 7)));
    }

    #[tokio::test]
    async fn test_resolve_empty_answer_is_no_results() {
        let server = spawn_name_server(None).await;
        let resolver = HickoryResolver::new(server.to_string());

        let err = resolver.resolve("es1").await.unwrap_err();

        assert!(matches!(err, ResolveError::NoResults { .. }));
        assert_eq!(
            err.to_string(),
            format!("Can't resolve 'es1' on {}: No results", server)
        );
    }

    #[tokio::test]
    async fn test_resolve_through_resolver_hostname() {
        let server = spawn_name_server(Some(Ipv4Addr::new(10, 9, 8, 7))).await;
        let resolver = HickoryResolver::new(format!("localhost:{}", server.port()));

        let ip = resolver.resolve("es1").await.unwrap();

        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(10, 9, 8, 7)));
    }

    #[test]
    fn test_no_results_message() {
        let err = ResolveError::NoResults {
            host: "es1".into(),
            server: "10.0.0.2:53".into(),
        };
        assert_eq!(err.to_string(), "Can't resolve 'es1' on 10.0.0.2:53: No results");
    }
}
