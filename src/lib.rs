// src/lib.rs
pub mod client;
pub mod config;
pub mod dns;
pub mod health;
