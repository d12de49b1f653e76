//! Character Keeper - key-addressed JSON document store
//!
//! Saves, loads and deletes opaque JSON documents under short keys with a
//! 30-day expiry, backed by Redis, plus a same-origin fetch proxy.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
