//! Storage layer
//!
//! Cache backends, the store client capability, and the Redis implementation of it.

pub mod backend;
pub mod client;
pub mod redis;

pub use backend::{
    BackendHandle, BackendKind, BackendPool, CacheBackend, LegacyRedisBackend, OpaqueBackend,
    RedisBackend, SynchronizedBackend,
};
pub use client::{InfoReply, InfoValue, StoreClient};
pub use redis::RedisPool;
