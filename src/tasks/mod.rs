//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweep: removes expired entries from the in-process engine

mod cleanup;

pub use cleanup::spawn_cleanup_task;
