//! Core components of the `timeflow-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`TfClient`] and its builder.
//! - The primary [`TfError`] type.
//! - The injected [`RequestCache`].
//! - The single-attempt fetch path shared by every endpoint.

/// The request cache and its keys.
pub mod cache;
/// The main client (`TfClient`), builder, retry policy, and configuration.
pub mod client;
/// The primary error type (`TfError`) for the crate.
pub mod error;

pub(crate) mod net;
pub(crate) mod wire;

// convenient re-exports so most code can just `use crate::core::TfClient`
pub use cache::{CacheKey, RequestCache};
pub use client::{Backoff, CacheMode, RetryConfig, TfClient, TfClientBuilder};
pub use error::{RequestErrorKind, TfError};
