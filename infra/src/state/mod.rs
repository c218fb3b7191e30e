//! Single-use OAuth state stores

pub mod memory;
pub mod redis;

pub use memory::MemoryStateStore;
pub use self::redis::RedisStateStore;
