//! REST gateway module for the CityScope backend.
//!
//! This module provides the `ApiClient`, the single chokepoint through
//! which every backend call is issued. Requests carry JWT bearer
//! authentication when a token is persisted; authorization failures are
//! handled centrally (see `client`).

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
