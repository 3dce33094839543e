pub mod config;
pub mod connector;
pub mod error;
pub mod kind;
pub mod logger;
pub mod macros;
pub mod manager;
pub mod record;
pub mod telemetry;
