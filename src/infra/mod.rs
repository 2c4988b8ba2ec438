//! Remote services, caches and the batch lookups built on them.

pub mod breakdown;
pub mod directory;
pub mod discovery;
pub mod esi;
pub mod everef;
pub mod http;
pub mod names;
pub mod resolver;
pub mod services;
pub mod store;

#[cfg(test)]
pub mod testing;
