//! HTTP client module
//!
//! Blocking HTTP client shared by the HTTP page source and the HTTP sink.
//! The transfer loop is synchronous, so every request completes before the
//! next pipeline step begins.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};

#[cfg(test)]
mod tests;
