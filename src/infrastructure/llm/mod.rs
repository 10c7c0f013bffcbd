//! Generation endpoint client and HTTP plumbing

mod client;
mod http_client;

pub use client::GenerationClient;
pub use http_client::{HttpClient, HttpClientTrait};

#[cfg(test)]
pub use http_client::mock;
