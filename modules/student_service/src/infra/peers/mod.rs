//! Outbound peer clients

pub mod http;

pub use http::HttpPeerGateway;
