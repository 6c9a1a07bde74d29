mod store;

pub use store::RedisStore;
