//! Network access for the dataset.
//!
//! This module provides:
//! - The [`DatasetSource`] trait with HTTP and file implementations
//! - An HTTP client that classifies non-2xx responses
//! - Retry with exponential backoff and jitter

mod client;
mod retry;
mod source;

pub use client::{extract_domain, HttpClient};
pub use retry::{retry_fetch, RetryConfig, RetryStats};
pub use source::{
    source_for_location, DatasetSource, DynDatasetSource, FileDatasetSource, HttpDatasetSource,
};
