pub mod entity;
pub mod global;
pub mod properties;
pub mod runtime;

pub use entity::*;
pub use global::{get, install_limiter, limiter, reset_limiter, update, LimiterSlot};
pub use properties::*;
pub use runtime::*;
