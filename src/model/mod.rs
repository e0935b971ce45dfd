pub mod config;
pub mod item;
pub mod query;

pub use config::*;
pub use item::*;
pub use query::*;
