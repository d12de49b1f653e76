//! Redis Backend Module
//!
//! Talks to a Redis-compatible server (Upstash in production) through a
//! multiplexed `ConnectionManager`. The manager is built once at startup and
//! cloned per command; clones share the underlying connection and reconnect
//! on their own.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::info;

use super::KvBackend;
use crate::error::BackendError;

// == Redis Backend ==
#[derive(Clone)]
pub struct RedisBackend {
    manager: ConnectionManager,
}

impl RedisBackend {
    /// Parses `url` and establishes the connection.
    ///
    /// Fails if the URL is malformed or the server cannot be reached, so
    /// callers learn about a bad connection string before serving traffic.
    pub async fn connect(url: &str) -> Result<Self, BackendError> {
        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;
        info!("Connected to Redis backend");
        Ok(Self { manager })
    }
}

#[async_trait]
impl KvBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        let mut conn = self.manager.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), BackendError> {
        // SET EX takes whole seconds and rejects zero
        let seconds = ttl.as_secs().max(1);
        let mut conn = self.manager.clone();
        let _: () = conn.set_ex(key, value, seconds).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, BackendError> {
        let mut conn = self.manager.clone();
        let removed: u64 = conn.del(key).await?;
        Ok(removed > 0)
    }
}
