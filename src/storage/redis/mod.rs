//! Redis storage implementation
//!
//! ## Module Structure
//!
//! - `pool` - Client handle implementing `StoreClient` (INFO, FLUSHALL)
//! - `tests` - Module tests

mod pool;

pub use pool::RedisPool;
