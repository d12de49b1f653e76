//! Store Module
//!
//! Key-addressed JSON document store with expiry, layered over a `KvBackend`.

mod key;
mod service;


pub use key::DocumentKey;
pub use service::{Deletion, DocumentStore, Loaded};

use std::time::Duration;

// == Public Constants ==
/// Prefix applied to every logical key before it reaches the engine
pub const KEY_NAMESPACE: &str = "user_save:";

/// Minimum logical key length for writes, in characters
pub const MIN_KEY_LENGTH: usize = 3;

/// Maximum logical key length for writes, in characters
pub const MAX_KEY_LENGTH: usize = 50;

/// Lifetime of a document after its most recent save
pub const DOCUMENT_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);
