pub mod config;
pub mod limiter;

// Re-export the entry points most callers need
pub use config::{get, update, ConfigUpdate, RuntimeConfig};
pub use limiter::{RateLimiter, WindowLimiter};
