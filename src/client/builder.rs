// ────────────────────────────────
// src/client/builder.rs
// ────────────────────────────────
use crate::client::Dialer;
use crate::dns::Resolve;
use hyper::{Body, Client};
use std::sync::Arc;

/// One-shot HTTP client whose connect step goes through [`Dialer`].
/// Idle connections are never kept around.
pub fn build_client(resolver: Option<Arc<dyn Resolve>>) -> Client<Dialer, Body> {
    Client::builder()
        .pool_max_idle_per_host(0)
        .build(Dialer::new(resolver))
}
