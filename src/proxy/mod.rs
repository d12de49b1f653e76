//! Proxy Module
//!
//! Same-origin pass-through for fetching arbitrary external URLs.

mod fetch;

pub use fetch::{FetchProxy, Fetched};
