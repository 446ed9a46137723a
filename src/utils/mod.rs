pub mod config;
pub mod logger;

pub use config::{Config, StoreBackend};
pub use logger::{init_from_config, init_logger};
