pub mod config;
pub mod errors;
pub mod telemetry;
pub mod types;

pub use config::BotConfig;
pub use errors::{Result, ServiceError};
pub use telemetry::{init_metrics, init_tracing, record_counter};
pub use types::Lead;
