//! HTTP client module
//!
//! Thin wrapper over `reqwest` used to call the CI provider:
//! default headers, ordered query parameters, Basic credentials, and
//! status checking. Requests are attempted exactly once.

mod client;

pub use client::{Credentials, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};

#[cfg(test)]
mod tests;
