pub mod builder;
pub mod connector;

pub use builder::build_client;
pub use connector::{DialError, Dialer};
