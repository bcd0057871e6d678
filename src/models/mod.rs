//! Models loaded from outside the domain, such as the server configuration.

pub mod config;
