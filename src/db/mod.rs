pub mod cache;
pub mod redis;

pub use cache::{CacheKey, MemoryCache, PosterCache};
pub use self::redis::{create_redis_client, CacheWriterHandle, RedisCache};
