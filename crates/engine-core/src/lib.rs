pub mod connectors;
pub mod error;
pub mod mapper;
pub mod metrics;
pub mod progress;
pub mod projection;
pub mod selector;
pub mod stage;
pub mod upsert;
