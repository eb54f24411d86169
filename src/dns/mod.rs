// src/dns/mod.rs
mod resolver;

pub use resolver::{HickoryResolver, Resolve, ResolveError, DEFAULT_DNS_PORT};
