//! HTTP transport for the automation service
//!
//! This module contains the [`Transport`] and its builder.

mod transport;
pub use transport::Transport;

mod builder;
pub use builder::TransportBuilder;
