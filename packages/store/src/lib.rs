pub mod cache;
pub mod config;

pub use cache::{mutate_optimistic, QueryCache, QueryKey, Snapshot};
pub use config::ClientConfig;
